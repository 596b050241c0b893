use crate::domain::catalog::{Catalog, CatalogItem};
use crate::domain::money::Money;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a catalog file: `category,id,name,description,price,unit`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CatalogRecord {
    pub category: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub unit: String,
}

impl CatalogRecord {
    fn into_item(self) -> Result<(String, CatalogItem)> {
        if self.price < Decimal::ZERO {
            return Err(PaymentError::Config(format!(
                "item {} has a negative price",
                self.id
            )));
        }
        let item = CatalogItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::new(self.price),
            unit: self.unit,
        };
        Ok((self.category, item))
    }
}

/// Reads catalog items from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming, like every CSV input of
/// this crate.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    /// Creates a new `CatalogReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes the rows.
    pub fn records(self) -> impl Iterator<Item = Result<CatalogRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }

    /// Reads the whole file into a [`Catalog`].
    ///
    /// Stops at the first malformed row or duplicate item id.
    pub fn read_catalog(self) -> Result<Catalog> {
        let mut catalog = Catalog::default();
        for record in self.records() {
            let (category, item) = record?.into_item()?;
            if catalog.find(&item.id).is_some() {
                return Err(PaymentError::Config(format!(
                    "duplicate catalog item {}",
                    item.id
                )));
            }
            catalog.insert(&category, item);
        }
        Ok(catalog)
    }
}
