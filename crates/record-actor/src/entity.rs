//! # Entity Contract
//!
//! The [`ActorEntity`] trait is the single seam between the generic
//! [`ResourceActor`](crate::ResourceActor) and a concrete record type.
//!
//! An entity is responsible for:
//!
//! - **Identity**: exposing its own key ([`ActorEntity::id`]) so records loaded
//!   from a [`Repository`](crate::Repository) can be indexed, and choosing the
//!   next key when the caller does not supply one ([`ActorEntity::next_id`]).
//! - **Construction**: validating a creation payload ([`ActorEntity::from_create_params`]).
//! - **Mutation**: applying updates and custom actions to itself.
//!
//! Everything else (channels, the store, persistence, logging) belongs to the actor.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await other clients. The `Context`
/// type is injected into every hook when the actor is started with `run(context)`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique key for this entity. Must be ordered so listings and
    /// snapshots handed to a repository have a stable order.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing record-specific operations (e.g., `Reduce`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum covers every operation on the entity, so clients match on a
    /// single error type regardless of which request failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Picks the key for a new entity when the caller did not supply one.
    ///
    /// `existing` yields every key currently in the store, in ascending order.
    fn next_id<'a>(existing: impl Iterator<Item = &'a Self::Id>) -> Self::Id;

    /// Construct the full entity from its key and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    ///
    /// If this returns an error the actor restores the entity to its state
    /// before the call, so partial writes to `self` are discarded.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Whether `action` can change the entity.
    ///
    /// Read-only actions return `false` and never trigger a repository write.
    fn is_mutating(_action: &Self::Action) -> bool {
        true
    }
}
