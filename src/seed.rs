// Sample menu inserted at startup when SEED_DATA=true

use rust_decimal::Decimal;

use crate::catalog::{CatalogError, CatalogService, CreateCategory, CreateItem, CreateSubcategory};

struct SampleItem {
    name: &'static str,
    image: &'static str,
    description: &'static str,
    tax: u32,
    base_amount: u32,
    discount: u32,
}

const HOT_DRINKS: &[SampleItem] = &[
    SampleItem {
        name: "Coffee",
        image: "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=400",
        description: "Freshly brewed coffee",
        tax: 5,
        base_amount: 50,
        discount: 5,
    },
    SampleItem {
        name: "Tea",
        image: "https://images.unsplash.com/photo-1544787219-7f47ccb76574?w=400",
        description: "Traditional tea varieties",
        tax: 5,
        base_amount: 30,
        discount: 0,
    },
];

const COLD_DRINKS: &[SampleItem] = &[
    SampleItem {
        name: "Cola",
        image: "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b?w=400",
        description: "Refreshing cola drink",
        tax: 5,
        base_amount: 40,
        discount: 0,
    },
    SampleItem {
        name: "Orange Juice",
        image: "https://images.unsplash.com/photo-1600271886742-f049cd451bba?w=400",
        description: "Fresh orange juice",
        tax: 5,
        base_amount: 60,
        discount: 10,
    },
];

const MAIN_COURSE: &[SampleItem] = &[
    SampleItem {
        name: "Chicken Burger",
        image: "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400",
        description: "Juicy chicken burger with fries",
        tax: 12,
        base_amount: 150,
        discount: 20,
    },
    SampleItem {
        name: "Pizza Margherita",
        image: "https://images.unsplash.com/photo-1513104890138-7c749659a591?w=400",
        description: "Classic margherita pizza",
        tax: 12,
        base_amount: 200,
        discount: 25,
    },
];

/// Insert the sample menu through the catalog service
///
/// Skipped when the catalog already has categories, so restarting with
/// SEED_DATA=true does not duplicate the menu.
/// Returns the number of items created.
pub async fn seed_catalog(catalog: &CatalogService) -> Result<usize, CatalogError> {
    if !catalog.list_categories().await?.is_empty() {
        tracing::info!("Catalog already populated, skipping seed data");
        return Ok(0);
    }

    let beverages = catalog
        .create_category(gst_category(
            "Beverages",
            "https://images.unsplash.com/photo-1544145945-f90425340c7e?w=400",
            "Refreshing drinks and beverages",
            5,
        ))
        .await?;
    let food = catalog
        .create_category(gst_category(
            "Food",
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400",
            "Delicious food items",
            12,
        ))
        .await?;

    let subcategories = [
        (
            "Hot Drinks",
            "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=400",
            "Coffee, tea, and hot beverages",
            beverages.id,
            HOT_DRINKS,
        ),
        (
            "Cold Drinks",
            "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b?w=400",
            "Cold beverages and juices",
            beverages.id,
            COLD_DRINKS,
        ),
        (
            "Main Course",
            "https://images.unsplash.com/photo-1546833999-b9f581a1996d?w=400",
            "Main dishes and entrees",
            food.id,
            MAIN_COURSE,
        ),
    ];

    let mut created = 0;
    for (name, image, description, category_id, items) in subcategories {
        let subcategory = catalog
            .create_subcategory(CreateSubcategory {
                name: Some(name.to_string()),
                image: Some(image.to_string()),
                description: Some(description.to_string()),
                category_id: Some(category_id),
                ..CreateSubcategory::default()
            })
            .await?;

        for item in items {
            catalog
                .create_item(CreateItem {
                    name: Some(item.name.to_string()),
                    image: Some(item.image.to_string()),
                    description: Some(item.description.to_string()),
                    tax_applicability: Some(true),
                    tax: Some(Decimal::from(item.tax)),
                    base_amount: Some(Decimal::from(item.base_amount)),
                    discount: Some(Decimal::from(item.discount)),
                    category_id: Some(category_id),
                    subcategory_id: Some(subcategory.id),
                })
                .await?;
            created += 1;
        }
    }

    tracing::info!("Seeded sample menu with {} items", created);
    Ok(created)
}

fn gst_category(name: &str, image: &str, description: &str, tax: u32) -> CreateCategory {
    CreateCategory {
        name: Some(name.to_string()),
        image: Some(image.to_string()),
        description: Some(description.to_string()),
        tax_applicability: Some(true),
        tax: Some(Decimal::from(tax)),
        tax_type: Some("GST".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ItemFilter;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seed_builds_sample_menu() {
        let catalog = CatalogService::in_memory();

        let created = seed_catalog(&catalog).await.unwrap();

        assert_eq!(created, 6);
        assert_eq!(catalog.list_categories().await.unwrap().len(), 2);

        let hot = catalog.get_subcategory("Hot Drinks").await.unwrap();
        assert!(hot.tax_applicability);
        assert_eq!(hot.tax, Some(dec!(5)));

        let pizza = catalog.get_item("Pizza Margherita").await.unwrap();
        assert_eq!(pizza.total_amount, dec!(175));

        let juice = catalog.get_item("Orange Juice").await.unwrap();
        assert_eq!(juice.total_amount, dec!(50));
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_populated() {
        let catalog = CatalogService::in_memory();
        seed_catalog(&catalog).await.unwrap();

        let created = seed_catalog(&catalog).await.unwrap();

        assert_eq!(created, 0);
        let items = catalog.list_items(&ItemFilter::default()).await.unwrap();
        assert_eq!(items.len(), 6);
    }
}
