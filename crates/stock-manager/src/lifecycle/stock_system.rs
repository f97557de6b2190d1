use super::config::AppConfig;
use crate::clients::ProductClient;
use crate::product_actor;
use crate::storage::open_repository;
use record_actor::FrameworkError;
use tracing::{error, info};

/// The runtime orchestrator for the stock manager.
///
/// `StockSystem` opens the configured stock file, loads it into a Product
/// actor and spawns that actor on the Tokio runtime. Every presentation layer
/// talks to the store through [`StockSystem::product_client`].
///
/// # Example
///
/// ```ignore
/// let system = StockSystem::new(&AppConfig::load(None)?)?;
///
/// let id = system.product_client.create_product(params).await?;
/// system.product_client.reduce_stock(id, 2).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct StockSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Categories offered by the menu.
    pub categories: Vec<String>,

    /// Cut-off for the low stock listing.
    pub low_stock_threshold: u32,

    handle: tokio::task::JoinHandle<()>,
}

impl StockSystem {
    /// Loads the stock file and starts the Product actor.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails if the stock file exists but cannot be read, holds an invalid
    /// record, or lists the same product id twice.
    pub fn new(config: &AppConfig) -> Result<Self, FrameworkError> {
        let repository = open_repository(&config.data_file, config.format);
        info!(path = %repository.path().display(), "Opening stock file");

        let (product_actor, generic_client) =
            product_actor::with_repository(config.channel_capacity, repository)?;
        let handle = tokio::spawn(product_actor.run(()));

        Ok(Self {
            product_client: ProductClient::new(generic_client),
            categories: config.categories.clone(),
            low_stock_threshold: config.low_stock_threshold,
            handle,
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the actor's channel; the actor finishes the
    /// requests already queued and exits its loop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
