//! Pure data structures implementing the [`ActorEntity`](record_actor::ActorEntity) trait,
//! plus the queries run over them.

pub mod product;
pub mod query;

pub use product::*;
pub use query::*;
