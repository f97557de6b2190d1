//! [`ActorEntity`] implementation for [`Product`].
//!
//! Holds the quantity adjustment rule: stock never goes negative and never
//! overflows, and every adjustment moves at least one unit.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{
    normalize_category, product::validate_name, product::validate_price, Product, ProductCreate,
    ProductId, ProductUpdate,
};
use async_trait::async_trait;
use record_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Largest numeric id plus one, zero-padded to three digits.
    fn next_id<'a>(existing: impl Iterator<Item = &'a ProductId>) -> ProductId {
        ProductId::next_after(existing)
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let product = Self::new(
            id,
            params.name.trim(),
            params.quantity,
            params.price,
            normalize_category(params.category),
        );
        product.validate()?;
        Ok(product)
    }

    /// Applies name, price and category edits. A rejected field leaves the
    /// product unchanged.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if update.category.is_some() {
            self.category = normalize_category(update.category);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::Restock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                self.quantity =
                    self.quantity
                        .checked_add(amount)
                        .ok_or(ProductError::QuantityOverflow {
                            current: self.quantity,
                            added: amount,
                        })?;
                Ok(ProductActionResult::Restock(self.quantity))
            }
            ProductAction::Reduce(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                if amount > self.quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.quantity,
                    });
                }
                self.quantity -= amount;
                Ok(ProductActionResult::Reduce(self.quantity))
            }
        }
    }

    fn is_mutating(action: &ProductAction) -> bool {
        !matches!(action, ProductAction::CheckStock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(quantity: u32) -> Product {
        Product::new("001", "Widget", quantity, 4.25, "Serum")
    }

    #[tokio::test]
    async fn test_reduce_to_zero_is_allowed() {
        let mut product = widget(5);
        let result = product.handle_action(ProductAction::Reduce(5), &()).await;
        assert_eq!(result, Ok(ProductActionResult::Reduce(0)));
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn test_reduce_below_zero_is_rejected() {
        let mut product = widget(5);
        let result = product.handle_action(ProductAction::Reduce(6), &()).await;
        assert_eq!(
            result,
            Err(ProductError::InsufficientStock {
                requested: 6,
                available: 5
            })
        );
        assert_eq!(product.quantity, 5);
    }

    #[tokio::test]
    async fn test_zero_adjustments_are_rejected() {
        let mut product = widget(5);
        for action in [ProductAction::Restock(0), ProductAction::Reduce(0)] {
            let result = product.handle_action(action, &()).await;
            assert_eq!(result, Err(ProductError::InvalidQuantity(0)));
        }
        assert_eq!(product.quantity, 5);
    }

    #[tokio::test]
    async fn test_restock_overflow_is_rejected() {
        let mut product = widget(u32::MAX - 1);
        let result = product.handle_action(ProductAction::Restock(2), &()).await;
        assert!(matches!(result, Err(ProductError::QuantityOverflow { .. })));
        assert_eq!(product.quantity, u32::MAX - 1);

        let result = product.handle_action(ProductAction::Restock(1), &()).await;
        assert_eq!(result, Ok(ProductActionResult::Restock(u32::MAX)));
    }

    #[test]
    fn test_create_normalizes_fields() {
        let params = ProductCreate {
            name: "  Aloe Gel ".into(),
            quantity: 3,
            price: 7.0,
            category: None,
        };
        let product = Product::from_create_params(ProductId::from("009"), params).unwrap();
        assert_eq!(product.name, "Aloe Gel");
        assert_eq!(product.category, "Unknown");
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let params = ProductCreate {
            name: "Aloe Gel".into(),
            quantity: 3,
            price: -0.5,
            category: Some("Serum".into()),
        };
        let result = Product::from_create_params(ProductId::from("009"), params);
        assert_eq!(result, Err(ProductError::InvalidPrice(-0.5)));
    }

    #[tokio::test]
    async fn test_rejected_update_changes_nothing() {
        let mut product = widget(5);
        let update = ProductUpdate {
            name: Some("Renamed".into()),
            price: Some(-3.0),
            category: None,
        };
        assert!(product.on_update(update, &()).await.is_err());
        assert_eq!(product, widget(5));
    }

    #[test]
    fn test_only_check_stock_is_read_only() {
        assert!(!Product::is_mutating(&ProductAction::CheckStock));
        assert!(Product::is_mutating(&ProductAction::Restock(1)));
        assert!(Product::is_mutating(&ProductAction::Reduce(1)));
    }
}
