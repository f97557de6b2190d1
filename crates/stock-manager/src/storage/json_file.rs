use super::{read_if_exists, write_atomic, StorageError};
use crate::model::{normalize_category, Product, ProductId};
use record_actor::{BoxError, Repository};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A product as stored under its id key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredProduct {
    name: String,
    quantity: u32,
    price: f64,
    #[serde(default)]
    category: Option<String>,
}

/// Entries of the stock object in file order.
///
/// Repeated keys are kept so they can be rejected instead of overwriting each other.
struct StoredEntries(Vec<(String, StoredProduct)>);

impl<'de> Deserialize<'de> for StoredEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = StoredEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by product id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StoredEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, StoredProduct>()? {
                    entries.push(entry);
                }
                Ok(StoredEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Product store kept as a JSON object keyed by product id.
///
/// ```json
/// {
///   "001": { "name": "Gentle Foam", "quantity": 25, "price": 12.5, "category": "Cleanser" }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonRepository {
    path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<Product>, StorageError> {
        let StoredEntries(stored) = serde_json::from_slice(bytes).map_err(|e| {
            StorageError::invalid(
                &self.path,
                format!("line {}, column {}", e.line(), e.column()),
                e,
            )
        })?;

        let mut seen = BTreeSet::new();
        let mut products = stored
            .into_iter()
            .map(|(id, record)| -> Result<Product, StorageError> {
                if !seen.insert(id.clone()) {
                    return Err(StorageError::invalid(
                        &self.path,
                        format!("product {id}"),
                        "duplicate product id",
                    ));
                }
                let product = Product::new(
                    ProductId::from(id.as_str()),
                    record.name,
                    record.quantity,
                    record.price,
                    normalize_category(record.category),
                );
                product
                    .validate()
                    .map_err(|e| StorageError::invalid(&self.path, format!("product {id}"), e))?;
                Ok(product)
            })
            .collect::<Result<Vec<_>, _>>()?;
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    fn encode(&self, items: &[&Product]) -> Result<Vec<u8>, StorageError> {
        let stored: BTreeMap<&str, StoredProduct> = items
            .iter()
            .map(|product| {
                (
                    product.id.as_str(),
                    StoredProduct {
                        name: product.name.clone(),
                        quantity: product.quantity,
                        price: product.price,
                        category: Some(product.category.clone()),
                    },
                )
            })
            .collect();
        let mut bytes = serde_json::to_vec_pretty(&stored).map_err(|e| StorageError::Encode {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

impl Repository<Product> for JsonRepository {
    fn load(&self) -> Result<Vec<Product>, BoxError> {
        let Some(bytes) = read_if_exists(&self.path)? else {
            debug!(path = %self.path.display(), "No stock file yet, starting empty");
            return Ok(Vec::new());
        };
        Ok(self.parse(&bytes)?)
    }

    fn save(&self, items: &[&Product]) -> Result<(), BoxError> {
        let bytes = self.encode(items)?;
        write_atomic(&self.path, &bytes)?;
        debug!(path = %self.path.display(), count = items.len(), "Stock file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_object_keyed_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(
            &path,
            r#"{
                "002": { "name": "Night Cream", "quantity": 4, "price": 30.0 },
                "001": { "name": "Gentle Foam", "quantity": 25, "price": 12.5, "category": "Cleanser" }
            }"#,
        )
        .unwrap();

        let products = JsonRepository::new(path).load().unwrap();
        assert_eq!(
            products,
            vec![
                Product::new("001", "Gentle Foam", 25, 12.5, "Cleanser"),
                Product::new("002", "Night Cream", 4, 30.0, "Unknown"),
            ]
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(&path, r#"{"001": {"name": "Toner", "quantity": -1, "price": 2.0}}"#)
            .unwrap();
        assert!(JsonRepository::new(path).load().is_err());
    }

    #[test]
    fn test_repeated_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(
            &path,
            r#"{
                "001": { "name": "Toner", "quantity": 1, "price": 2.0 },
                "001": { "name": "Peel", "quantity": 5, "price": 9.0 }
            }"#,
        )
        .unwrap();

        let err = JsonRepository::new(path).load().unwrap_err().to_string();
        assert!(err.contains("product 001"), "{err}");
        assert!(err.contains("duplicate product id"), "{err}");
    }

    #[test]
    fn test_invalid_fields_report_their_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");

        std::fs::write(&path, r#"{"004": {"name": "  ", "quantity": 1, "price": 2.0}}"#).unwrap();
        let err = JsonRepository::new(&path).load().unwrap_err().to_string();
        assert!(err.contains("product 004"), "{err}");
        assert!(err.contains("must not be empty"), "{err}");

        std::fs::write(&path, r#"{"005": {"name": "Toner", "quantity": 1, "price": -2.0}}"#)
            .unwrap();
        let err = JsonRepository::new(&path).load().unwrap_err().to_string();
        assert!(err.contains("product 005"), "{err}");
        assert!(err.contains("Invalid price"), "{err}");

        std::fs::write(&path, r#"{"": {"name": "Toner", "quantity": 1, "price": 2.0}}"#).unwrap();
        let err = JsonRepository::new(&path).load().unwrap_err().to_string();
        assert!(err.contains("Product ID must not be empty"), "{err}");
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRepository::new(dir.path().join("absent.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_is_pretty_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRepository::new(dir.path().join("stock.json"));
        let product = Product::new("007", "Aloe Gel", 3, 7.25, "Serum");

        repo.save(&[&product]).unwrap();

        let text = std::fs::read_to_string(repo.path()).unwrap();
        assert!(text.contains("\n  \"007\": {"), "{text}");
        assert_eq!(repo.load().unwrap(), vec![product]);
    }
}
