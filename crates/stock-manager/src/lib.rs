//! # Stock Manager
//!
//! An inventory record store built on [`record_actor`].
//!
//! ## Core Components
//!
//! - **[model]**: [`Product`](model::Product) records, their payloads and the listing queries.
//! - **[product_actor]**: the [`ActorEntity`](record_actor::ActorEntity) implementation,
//!   stock actions and [`ProductError`](product_actor::ProductError).
//! - **[clients]**: [`ProductClient`](clients::ProductClient), the type-safe API over the actor.
//! - **[storage]**: CSV and JSON stock files behind the [`Repository`](record_actor::Repository) seam.
//! - **[lifecycle]**: configuration and the [`StockSystem`](lifecycle::StockSystem) that wires it all up.
//! - **[menu]** and **[cli]**: the interactive menu and the one-shot commands.
//!
//! ## Testing
//!
//! See [`record_actor::mock`] for utilities to test clients without spawning full actors.

pub mod cli;
pub mod clients;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod product_actor;
pub mod storage;
