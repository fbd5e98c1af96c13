use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::catalog::models::Item;

pub const ITEM_COLUMNS: &str = "id, name, image, description, category_id, subcategory_id, \
     tax_applicability, tax, base_amount, discount, total_amount, created_at, updated_at";

/// SQL query builder for item searches
/// Builds a single parameterized SELECT with filters and sorting
pub struct ItemQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
}

impl ItemQueryBuilder {
    /// Creates a new ItemQueryBuilder selecting every item column
    pub fn new() -> Self {
        Self {
            base_query: format!("SELECT {} FROM items", ITEM_COLUMNS),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
        }
    }

    /// Builds a query for everything the filter asks for
    pub fn from_filter(filter: &ItemFilter) -> Self {
        let mut builder = Self::new();
        if let Some(ref search) = filter.search {
            builder.add_search_filter(search);
        }
        if let Some(category_id) = filter.category_id {
            builder.add_category_filter(category_id);
        }
        if let Some(subcategory_id) = filter.subcategory_id {
            builder.add_subcategory_filter(subcategory_id);
        }
        builder.add_total_range(filter.min_total, filter.max_total);
        if let Some(field) = filter.sort_field {
            builder.set_sort(field, filter.sort_order);
        }
        builder
    }

    fn next_param(&mut self, value: String) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Adds a case-insensitive partial name match
    /// LIKE wildcards in the search term are escaped so they match literally
    pub fn add_search_filter(&mut self, search: &str) {
        let escaped = search
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let index = self.next_param(format!("%{}%", escaped));
        self.where_clauses.push(format!("name ILIKE ${}", index));
    }

    pub fn add_category_filter(&mut self, category_id: Uuid) {
        let index = self.next_param(category_id.to_string());
        self.where_clauses.push(format!("category_id = ${}::uuid", index));
    }

    pub fn add_subcategory_filter(&mut self, subcategory_id: Uuid) {
        let index = self.next_param(subcategory_id.to_string());
        self.where_clauses.push(format!("subcategory_id = ${}::uuid", index));
    }

    /// Adds total amount bounds, both inclusive
    pub fn add_total_range(&mut self, min: Option<Decimal>, max: Option<Decimal>) {
        if let Some(min_total) = min {
            let index = self.next_param(min_total.to_string());
            self.where_clauses.push(format!("total_amount >= ${}::numeric", index));
        }

        if let Some(max_total) = max {
            let index = self.next_param(max_total.to_string());
            self.where_clauses.push(format!("total_amount <= ${}::numeric", index));
        }
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        let order_str = match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        self.order_clause = Some(format!("{} {}", field.column(), order_str));
    }

    /// Builds the final SQL query string and its bind parameters
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        query.push_str(" ORDER BY ");
        match self.order_clause {
            Some(ref order) => {
                query.push_str(order);
                query.push_str(", created_at ASC");
            }
            None => query.push_str("created_at ASC"),
        }

        (query, self.params.clone())
    }
}

impl Default for ItemQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for GET /api/items
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ItemQueryParams {
    /// Case-insensitive partial name match
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    /// Minimum total amount (inclusive)
    #[param(value_type = Option<f64>)]
    pub min_total: Option<Decimal>,
    /// Maximum total amount (inclusive)
    #[param(value_type = Option<f64>)]
    pub max_total: Option<Decimal>,
    /// Sort field: "name", "totalAmount" or "baseAmount"
    pub sort: Option<String>,
    /// Sort order: "asc" or "desc"
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    TotalAmount,
    BaseAmount,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::TotalAmount => "total_amount",
            SortField::BaseAmount => "base_amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Validated item search, shared by every item store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Case-insensitive name substring
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub min_total: Option<Decimal>,
    pub max_total: Option<Decimal>,
    pub sort_field: Option<SortField>,
    pub sort_order: SortOrder,
}

impl ItemFilter {
    /// Substring search on the name, taken as given
    ///
    /// Whitespace is part of the term, so a blank segment only matches
    /// names containing it.
    pub fn by_name(search: &str) -> Self {
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            ..Self::default()
        }
    }

    pub fn by_category(category_id: Uuid) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn by_subcategory(subcategory_id: Uuid) -> Self {
        Self {
            subcategory_id: Some(subcategory_id),
            ..Self::default()
        }
    }

    /// Whether an item passes every filter (sorting is not considered)
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(ref search) = self.search {
            if !item.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if self.category_id.is_some_and(|id| item.category_id != id) {
            return false;
        }
        if self
            .subcategory_id
            .is_some_and(|id| item.subcategory_id != Some(id))
        {
            return false;
        }
        if self.min_total.is_some_and(|min| item.total_amount < min) {
            return false;
        }
        if self.max_total.is_some_and(|max| item.total_amount > max) {
            return false;
        }
        true
    }

    /// Sort items in place the way the SQL ORDER BY would
    pub fn sort(&self, items: &mut [Item]) {
        let Some(field) = self.sort_field else {
            return;
        };
        items.sort_by(|a, b| {
            let ordering = match field {
                SortField::Name => a.name.cmp(&b.name),
                SortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
                SortField::BaseAmount => a.base_amount.cmp(&b.base_amount),
            };
            match self.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

/// Validation error type
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

/// Query parameter validator
pub struct QueryValidator;

impl QueryValidator {
    /// Validates and normalizes item query parameters
    pub fn validate(params: ItemQueryParams) -> Result<ItemFilter, QueryError> {
        let search = Self::normalize_string(params.search);

        if let (Some(min), Some(max)) = (params.min_total, params.max_total) {
            if min > max {
                return Err(QueryError {
                    message: "minTotal cannot be greater than maxTotal".to_string(),
                });
            }
        }

        let sort_field = match Self::normalize_string(params.sort) {
            Some(sort_str) => Some(Self::parse_sort_field(&sort_str)?),
            None => None,
        };

        let sort_order = match Self::normalize_string(params.order) {
            Some(order_str) => Self::parse_sort_order(&order_str)?,
            None => SortOrder::Asc,
        };

        Ok(ItemFilter {
            search,
            category_id: params.category_id,
            subcategory_id: params.subcategory_id,
            min_total: params.min_total,
            max_total: params.max_total,
            sort_field,
            sort_order,
        })
    }

    /// Trims whitespace, None if the string is empty or whitespace-only
    fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    fn parse_sort_field(s: &str) -> Result<SortField, QueryError> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "totalamount" | "total_amount" => Ok(SortField::TotalAmount),
            "baseamount" | "base_amount" => Ok(SortField::BaseAmount),
            _ => Err(QueryError {
                message: format!(
                    "Invalid sort field '{}'. Must be 'name', 'totalAmount' or 'baseAmount'",
                    s
                ),
            }),
        }
    }

    fn parse_sort_order(s: &str) -> Result<SortOrder, QueryError> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(QueryError {
                message: format!("Invalid sort order '{}'. Must be 'asc' or 'desc'", s),
            }),
        }
    }
}
