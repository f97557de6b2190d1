//! Type-safe wrappers around [`ResourceClient`](record_actor::ResourceClient).

pub mod product_client;

pub use product_client::*;
