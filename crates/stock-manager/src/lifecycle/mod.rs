//! # System Lifecycle
//!
//! Configuration loading and the runtime wiring of the stock manager.
//!
//! ## Startup
//!
//! 1. [`AppConfig::load`] merges built-in defaults, an optional `stock.toml`
//!    (or the `--config` file) and `STOCK_*` environment variables.
//! 2. [`StockSystem::new`] opens the stock file in the configured format,
//!    loads it into the Product actor and spawns the actor.
//!
//! ```rust,ignore
//! let config = AppConfig::load(None)?;
//! let system = StockSystem::new(&config)?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - [`StockSystem::shutdown`] waits for the actor task
//!
//! The stock file is already up to date at this point: every mutation is
//! saved before its reply is sent.
//!
//! ## Observability
//!
//! Logging is installed by [`record_actor::tracing::setup_tracing`]; run with
//! `RUST_LOG=info` to see loads, mutations and shutdown on stderr.

pub mod config;
pub mod stock_system;

pub use config::*;
pub use stock_system::*;
