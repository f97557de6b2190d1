//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes the inventory operations:
//! adding, looking up, filtering, adjusting stock, editing and removing products.
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate, SearchTerm};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use record_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::AlreadyExists(id) => ProductError::AlreadyExists(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::Persistence(inner) => ProductError::Storage(inner.to_string()),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Adds a product under the next free generated id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Adds a product under a caller-chosen id.
    ///
    /// Fails with [`ProductError::AlreadyExists`] if the id is taken.
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        id: ProductId,
        params: ProductCreate,
    ) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner
            .create_with_id(id, params)
            .await
            .map_err(Self::map_error)
    }

    /// Fetches a product, treating absence as [`ProductError::NotFound`].
    #[instrument(skip(self))]
    pub async fn require(&self, id: ProductId) -> Result<Product, ProductError> {
        let not_found = id.to_string();
        self.get(id)
            .await?
            .ok_or(ProductError::NotFound(not_found))
    }

    /// Lists the products selected by `query`, in id order.
    #[instrument(skip(self))]
    pub async fn query(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        let products = self.list().await?;
        Ok(query.apply(products))
    }

    /// Validates `raw` as a search term, then searches id, name and category.
    pub async fn search(&self, raw: &str) -> Result<Vec<Product>, ProductError> {
        let term = SearchTerm::parse(raw)?;
        self.query(ProductQuery::Search(term)).await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, ProductError> {
        self.query(ProductQuery::Category(category.to_string()))
            .await
    }

    /// Products whose quantity is strictly below `threshold`.
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<Product>, ProductError> {
        self.query(ProductQuery::LowStock(threshold)).await
    }

    /// Check the current stock level for a product.
    ///
    /// Returns the quantity available.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
        {
            Ok(ProductActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => unreachable!("CheckStock action must return CheckStock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Adds `amount` units and returns the new stock level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, amount: u32) -> Result<u32, ProductError> {
        debug!("Restocking {} units of product {}", amount, id);
        match self
            .inner
            .perform_action(id, ProductAction::Restock(amount))
            .await
        {
            Ok(ProductActionResult::Restock(level)) => Ok(level),
            Ok(_) => unreachable!("Restock action must return Restock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes `amount` units and returns the remaining stock level.
    ///
    /// Fails with [`ProductError::InsufficientStock`] rather than going below zero.
    #[instrument(skip(self))]
    pub async fn reduce_stock(&self, id: ProductId, amount: u32) -> Result<u32, ProductError> {
        debug!("Reducing product {} by {} units", id, amount);
        match self
            .inner
            .perform_action(id, ProductAction::Reduce(amount))
            .await
        {
            Ok(ProductActionResult::Reduce(level)) => Ok(level),
            Ok(_) => unreachable!("Reduce action must return Reduce result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Edits name, price or category and returns the updated product.
    #[instrument(skip(self))]
    pub async fn edit_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
