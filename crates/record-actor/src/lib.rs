//! # Record Actor
//!
//! A generic, type-safe record store built on the Actor Model. One Tokio task owns
//! a keyed collection of records; everything else talks to it through a cloneable
//! client. The store can be mirrored to a [`Repository`] so it survives restarts.
//!
//! ## Core Concepts
//!
//! - **[`ActorEntity`]**: the contract a record type implements (identity,
//!   construction, updates, custom actions).
//! - **[`ResourceActor`]**: the server half. Owns the `BTreeMap` store and processes
//!   requests sequentially, so there are no locks around the data.
//! - **[`ResourceClient`]**: the client half. Each call sends one
//!   [`ResourceRequest`] and awaits its oneshot reply.
//! - **[`ActorClient`]**: a trait domain clients implement to inherit `get`,
//!   `list` and `delete` with their own error type.
//! - **[`Repository`]**: where records live between runs. Loaded once at startup,
//!   saved after every successful mutation.
//!
//! ## Invariants
//!
//! - Keys are unique. Creating under an existing key fails with
//!   [`FrameworkError::AlreadyExists`] and leaves the store untouched; so does
//!   loading a repository that contains the same key twice.
//! - A failed hook or a failed save leaves the record exactly as it was.
//! - Listings and repository snapshots are in ascending key order.
//!
//! ## Testing
//!
//! See [`mock`] for utilities to test clients without spawning actors, and
//! [`MemoryRepository`] for an in-memory backing store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod repository;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{BoxError, FrameworkError};
pub use message::{ResourceRequest, Response};
pub use repository::{MemoryRepository, Repository};
