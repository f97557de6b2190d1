use super::{read_if_exists, write_atomic, StorageError};
use crate::model::Product;
use record_actor::{BoxError, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column order of the stock file.
pub const HEADER: [&str; 5] = ["product_id", "name", "quantity", "price", "category"];

/// Product store kept as a CSV file with a header row.
///
/// Columns are matched by header name, so a file written without the
/// `category` column still loads (every product becomes `"Unknown"`).
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<Product>, StorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|e| StorageError::invalid(&self.path, "header", e))?
            .clone();

        let mut products = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                let location = e
                    .position()
                    .map_or_else(|| "unknown line".to_string(), |p| format!("line {}", p.line()));
                StorageError::invalid(&self.path, location, e)
            })?;
            let location = record
                .position()
                .map_or_else(|| "unknown line".to_string(), |p| format!("line {}", p.line()));
            let product: Product = record
                .deserialize(Some(&headers))
                .map_err(|e| StorageError::invalid(&self.path, location.clone(), e))?;
            product
                .validate()
                .map_err(|e| StorageError::invalid(&self.path, location, e))?;
            products.push(product);
        }
        Ok(products)
    }

    fn encode(&self, items: &[&Product]) -> Result<Vec<u8>, StorageError> {
        let encode_error = |message: String| StorageError::Encode {
            path: self.path.clone(),
            message,
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| encode_error(e.to_string()))?;
        for product in items {
            writer
                .serialize(product)
                .map_err(|e| encode_error(e.to_string()))?;
        }
        writer.into_inner().map_err(|e| encode_error(e.to_string()))
    }
}

impl Repository<Product> for CsvRepository {
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
