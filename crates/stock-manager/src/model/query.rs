//! Filters applied to a product listing.
//!
//! The store is small and unindexed; every query is a linear scan over the
//! list returned by the actor.

use super::Product;
use crate::product_actor::ProductError;

/// Default cut-off below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Selects a subset of products.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductQuery {
    All,
    /// Exact category match.
    Category(String),
    /// Case-insensitive substring match on id, name or category.
    Search(SearchTerm),
    /// Products with `quantity < threshold`.
    LowStock(u32),
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductQuery::All => true,
            ProductQuery::Category(category) => product.category == *category,
            ProductQuery::Search(term) => term.matches(product),
            ProductQuery::LowStock(threshold) => product.quantity < *threshold,
        }
    }

    /// Keeps the products this query selects, preserving their order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// A validated free-text search term: letters and spaces only, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Result<Self, ProductError> {
        let term = raw.trim();
        let valid = !term.is_empty() && term.chars().all(|c| c.is_alphabetic() || c == ' ');
        if !valid {
            return Err(ProductError::InvalidSearchTerm(raw.to_string()));
        }
        Ok(Self(term.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, product: &Product) -> bool {
        [
            product.id.as_str(),
            product.name.as_str(),
            product.category.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.0))
    }
}
