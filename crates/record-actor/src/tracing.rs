//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for any application built on
//! the framework.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Loaded`, `Actor started` and `Shutdown`, each with the store `size`
//! - **Requests**: Create, Get, List, Update, Delete and Action at `debug`, with payloads
//! - **Mutations**: `Created`, `Updated`, `Deleted`, `Action ok` at `info`
//! - **Failures**: `warn` with `error = %e` and the record `id`
//!
//! ## Usage
//!
//! ```bash
//! # Mutations only
//! RUST_LOG=info stock-manager view
//!
//! # Full payloads
//! RUST_LOG=debug stock-manager restock 001 5
//!
//! # Only the framework
//! RUST_LOG=record_actor=debug stock-manager
//! ```
//!
//! With `RUST_LOG=info` a restock looks like:
//!
//! ```text
//! INFO Loaded entity_type="Product" size=3
//! INFO Actor started entity_type="Product" size=3
//! INFO Action ok entity_type="Product" id=001
//! INFO Shutdown entity_type="Product" size=3
//! ```
//!
//! Logs go to stderr. Stdout is left to the application, which for an
//! interactive program is where prompts and tables are printed.

/// Installs a compact `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
///
/// Calling it twice is harmless; the second installation is ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
