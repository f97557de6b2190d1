use crate::model::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::product_actor::CHANNEL_CAPACITY;
use crate::storage::StorageFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_NAME: &str = "stock";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the stock is persisted.
    pub data_file: PathBuf,
    pub format: StorageFormat,
    /// Quantities strictly below this count as low stock.
    pub low_stock_threshold: u32,
    /// Request buffer of the product actor.
    pub channel_capacity: usize,
    /// Choices offered by the menu when adding or filtering.
    pub categories: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("stock_data.csv"),
            format: StorageFormat::Auto,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            channel_capacity: CHANNEL_CAPACITY,
            categories: ["Cleanser", "Moisturizer", "Serum", "Sunscreen"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, a config file and `STOCK_*` environment variables.
    ///
    /// With `path` the file must exist; otherwise `stock.{toml,json,yaml,..}` is
    /// read from the working directory if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> config::Environment {
        // Double underscore so keys like `data_file` survive: STOCK_DATA_FILE.
        config::Environment::with_prefix("STOCK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("categories")
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = match path {
            Some(path) => config.add_source(config::File::from(path).required(true)),
            None => config.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        config = config.add_source(env);

        let app_config: AppConfig = config.build()?.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.channel_capacity == 0 {
            anyhow::bail!("channel_capacity must be at least 1");
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            anyhow::bail!("categories must not contain blank entries");
        }
        Ok(())
    }
}
