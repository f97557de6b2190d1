//! # Product Actor
//!
//! The Product resource actor: the record store of the application.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](record_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock movements
//! - [`new()`] / [`with_repository()`] - factory functions for the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use stock_manager::product_actor;
//! use stock_manager::clients::ProductClient;
//! use stock_manager::model::ProductCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new();
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Clay Mask".to_string(),
//!         quantity: 12,
//!         price: 14.5,
//!         category: Some("Cleanser".to_string()),
//!     };
//!     let id = client.create_product(params).await?;
//!     assert_eq!(id.as_str(), "001");
//!
//!     assert_eq!(client.reduce_stock(id, 5).await?, 7);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use record_actor::{FrameworkError, Repository, ResourceActor, ResourceClient};

/// Default request channel capacity.
pub const CHANNEL_CAPACITY: usize = 32;

/// Creates an in-memory Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(CHANNEL_CAPACITY)
}

/// Creates a Product actor backed by `repository`, loading its records first.
pub fn with_repository(
    capacity: usize,
    repository: impl Repository<Product>,
) -> Result<(ResourceActor<Product>, ResourceClient<Product>), FrameworkError> {
    ResourceActor::with_repository(capacity, repository)
}
