//! Custom actions for the Product actor.
//!
//! These are the stock movements that go beyond plain CRUD. All of them are
//! handled by [`ActorEntity::handle_action`](record_actor::ActorEntity::handle_action)
//! on [`Product`](crate::model::Product).

/// Stock operations on a single product.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Adds units to the stock.
    ///
    /// # Errors
    /// Fails for an amount of zero, or if the total would overflow.
    Restock(u32),
    /// Removes units from the stock.
    ///
    /// # Errors
    /// Fails for an amount of zero, or if it exceeds the available stock.
    Reduce(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level.
    CheckStock(u32),
    /// Stock level after restocking.
    Restock(u32),
    /// Stock level after the reduction.
    Reduce(u32),
}
