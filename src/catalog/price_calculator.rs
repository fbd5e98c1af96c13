use rust_decimal::Decimal;

/// Service for calculating item totals
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate the total amount for an item
    ///
    /// # Arguments
    /// * `base_amount` - Price before discount
    /// * `discount` - Flat discount, treated as zero when absent
    ///
    /// # Returns
    /// `base_amount - discount`. There is no floor at zero: a discount larger
    /// than the base amount produces a negative total.
    pub fn compute_total(base_amount: Decimal, discount: Option<Decimal>) -> Decimal {
        base_amount - discount.unwrap_or(Decimal::ZERO)
    }
}

/// The three monetary fields of an item, kept consistent with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAmounts {
    pub base_amount: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
}

impl ItemAmounts {
    /// Amounts for a newly created item
    pub fn new(base_amount: Decimal, discount: Option<Decimal>) -> Self {
        let discount = discount.unwrap_or(Decimal::ZERO);
        Self {
            base_amount,
            discount,
            total_amount: PriceCalculator::compute_total(base_amount, Some(discount)),
        }
    }

    /// Apply a partial update to stored amounts
    ///
    /// The total is re-derived only when the update touches `base_amount` or
    /// `discount`. A field the update leaves out keeps its stored value; an
    /// explicit zero is a real value.
    pub fn apply_update(&self, base_amount: Option<Decimal>, discount: Option<Decimal>) -> Self {
        if base_amount.is_none() && discount.is_none() {
            return *self;
        }

        let base_amount = base_amount.unwrap_or(self.base_amount);
        let discount = discount.unwrap_or(self.discount);
        Self {
            base_amount,
            discount,
            total_amount: PriceCalculator::compute_total(base_amount, Some(discount)),
        }
    }
}
