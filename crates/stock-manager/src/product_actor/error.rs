//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A product with this id is already in stock.
    #[error("Product ID already exists: {0}")]
    AlreadyExists(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Stock adjustments must move at least one unit.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Adding the requested amount would exceed the largest storable quantity.
    #[error("Quantity overflow: {current} + {added} is too large")]
    QuantityOverflow { current: u32, added: u32 },

    /// Prices must be finite and not negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Product ids must contain a non-blank character.
    #[error("Product ID must not be empty")]
    EmptyId,

    /// Products need a non-blank name.
    #[error("Product name must not be empty")]
    EmptyName,

    /// Search terms may contain only letters and spaces.
    #[error("Invalid search term: {0:?}")]
    InvalidSearchTerm(String),

    /// The stock file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}
