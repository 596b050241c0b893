use super::money::Money;
use serde::{Deserialize, Serialize};

/// A product as listed in the catalog. Prices are per `unit`, in the base currency.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Category {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// Read-only reference data supplied at startup.
///
/// Categories and the items within them keep the order they were listed in.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Files an item under `category`, creating the category on first use.
    pub fn insert(&mut self, category: &str, item: CatalogItem) {
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.items.push(item),
            None => self.categories.push(Category {
                name: category.to_string(),
                items: vec![item],
            }),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(id: &str, price: rust_decimal::Decimal) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            price: Money::new(price),
            unit: "kg".to_string(),
        }
    }

    #[test]
    fn test_insert_groups_by_category_in_order() {
        let mut catalog = Catalog::default();
        catalog.insert("Fruits", item("apple", dec!(120)));
        catalog.insert("Dairy", item("milk", dec!(60)));
        catalog.insert("Fruits", item("banana", dec!(40)));

        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Fruits", "Dairy"]);
        let fruit_ids: Vec<&str> = catalog.categories()[0]
            .items
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(fruit_ids, ["apple", "banana"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::new(vec![Category {
            name: "Dairy".to_string(),
            items: vec![item("milk", dec!(60))],
        }]);

        assert_eq!(catalog.find("milk").unwrap().price, Money::new(dec!(60)));
        assert!(catalog.find("cheese").is_none());
        assert!(!catalog.is_empty());
    }
}
