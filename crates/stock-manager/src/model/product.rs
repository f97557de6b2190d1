use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::product_actor::ProductError;

/// Category assigned when a record has none.
pub const DEFAULT_CATEGORY: &str = "Unknown";

/// Type-safe identifier for Products.
///
/// Identifiers are free-form strings. Generated ones are the next free number,
/// zero-padded to three digits (`"001"`, `"002"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of this id, if it is purely digits.
    pub fn number(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }

    /// Next id after the largest numeric id in `existing`.
    ///
    /// An id holding `u64::MAX` has no successor and is skipped.
    pub fn next_after<'a>(existing: impl Iterator<Item = &'a ProductId>) -> Self {
        let next = existing
            .filter_map(ProductId::number)
            .filter_map(|n| n.checked_add(1))
            .max()
            .unwrap_or(1);
        Self(format!("{next:03}"))
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a product in the inventory.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](record_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](record_actor::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let category = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_category(category))
}

/// Trims `category`, falling back to [`DEFAULT_CATEGORY`] when it is missing or blank.
pub fn normalize_category(category: Option<String>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => default_category(),
    }
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Product name
    /// * `quantity` - Available stock quantity
    /// * `price` - Unit price
    /// * `category` - Category label
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
            category: category.into(),
        }
    }

    /// Checks the field rules every stored product must satisfy.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

/// Payload for creating a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    /// `None` or blank becomes [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
}

/// Payload for editing a product's descriptive fields.
///
/// Quantity is deliberately absent: stock only moves through
/// [`ProductAction`](crate::product_actor::ProductAction)s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none()
    }
}
