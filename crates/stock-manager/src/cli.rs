//! Command-line surface: one subcommand per inventory operation, plus the
//! interactive [`Menu`](crate::menu::Menu) as the default.

use crate::clients::ProductClient;
use crate::lifecycle::{AppConfig, StockSystem};
use crate::menu::render::{product_details, product_table};
use crate::menu::Menu;
use crate::model::{ProductCreate, ProductId, ProductQuery, ProductUpdate};
use crate::storage::StorageFormat;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use record_actor::ActorClient;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "stock-manager")]
#[command(about = "Inventory records kept in a flat file")]
#[command(
    after_help = "Environment:\n  STOCK_CONFIG      Configuration file\n  STOCK_DATA_FILE   Stock file path\n  STOCK_FORMAT      csv, json or auto\n  RUST_LOG          Log filter (logs go to stderr)"
)]
pub struct Cli {
    /// Configuration file (defaults to ./stock.toml when present).
    #[arg(long, global = true, env = "STOCK_CONFIG")]
    pub config: Option<PathBuf>,
    /// Stock file, overriding the configuration.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
    /// Stock file encoding, overriding the configuration.
    #[arg(long, global = true, value_enum)]
    pub format: Option<StorageFormat>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Interactive text menu (the default).
    Menu,
    /// Print the stock table.
    View {
        #[arg(long)]
        category: Option<String>,
        /// Only products below the low stock threshold.
        #[arg(long, default_value_t = false)]
        low_stock: bool,
    },
    /// Add a product; the id defaults to the next free number.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: u32,
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Case-insensitive search over id, name and category.
    Search { term: String },
    /// Show one product.
    Show { id: String },
    /// Add units to a product's stock.
    Restock { id: String, amount: u32 },
    /// Remove units from a product's stock.
    Reduce { id: String, amount: u32 },
    /// Change a product's name, price or category.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a product.
    Remove { id: String },
}

impl Cli {
    /// Loads the configuration and applies the command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

/// Runs `cli` against a freshly started [`StockSystem`], then shuts it down.
///
/// Single commands write to stdout. The menu also reads stdin.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let system = StockSystem::new(&config)
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;

    let command = cli.command.unwrap_or(Command::Menu);
    info!(?command, "Running command");

    let result = match command {
        Command::Menu => {
            let mut menu = Menu::new(
                system.product_client.clone(),
                system.categories.clone(),
                system.low_stock_threshold,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            );
            menu.run().await.map_err(anyhow::Error::from)
        }
        command => {
            let mut stdout = tokio::io::stdout();
            execute(&system, command, &mut stdout).await
        }
    };

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    result
}

/// Runs a non-interactive command, writing its result to `out`.
pub async fn execute<W>(system: &StockSystem, command: Command, out: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let client: &ProductClient = &system.product_client;
    let text = match command {
        Command::Menu => anyhow::bail!("the menu needs an interactive session"),
        Command::View {
            category,
            low_stock,
        } => {
            let mut products = client.list().await?;
            if let Some(category) = category {
                products = ProductQuery::Category(category).apply(products);
            }
            if low_stock {
                products = ProductQuery::LowStock(system.low_stock_threshold).apply(products);
            }
            product_table(&products)
        }
        Command::Add {
            name,
            quantity,
            price,
            category,
            id,
        } => {
            let params = ProductCreate {
                name,
                quantity,
                price,
                category,
            };
            let id = match id {
                Some(id) => client.add_product(ProductId::from(id), params).await?,
                None => client.create_product(params).await?,
            };
            format!("Added product {id}.\n")
        }
        Command::Search { term } => product_table(&client.search(&term).await?),
        Command::Show { id } => product_details(&client.require(ProductId::from(id)).await?),
        Command::Restock { id, amount } => {
            let level = client.restock(ProductId::from(id.as_str()), amount).await?;
            format!("Product {id} now has {level} in stock.\n")
        }
        Command::Reduce { id, amount } => {
            let level = client
                .reduce_stock(ProductId::from(id.as_str()), amount)
                .await?;
            format!("Product {id} now has {level} in stock.\n")
        }
        Command::Edit {
            id,
            name,
            price,
            category,
        } => {
            let update = ProductUpdate {
                name,
                price,
                category,
            };
            if update.is_empty() {
                anyhow::bail!("nothing to edit: pass --name, --price or --category");
            }
            product_details(&client.edit_product(ProductId::from(id), update).await?)
        }
        Command::Remove { id } => {
            client.delete(ProductId::from(id.as_str())).await?;
            format!("Removed product {id}.\n")
        }
    };

    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["stock-manager"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_global_overrides_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stock-manager",
            "view",
            "--low-stock",
            "--data-file",
            "shop.json",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("shop.json")));
        assert_eq!(cli.format, Some(StorageFormat::Json));
        assert_eq!(
            cli.command,
            Some(Command::View {
                category: None,
                low_stock: true
            })
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.toml");
        std::fs::write(&path, "data_file = \"a.csv\"\n").unwrap();
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["stock-manager", "--config", path, "view"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap().data_file, PathBuf::from("a.csv"));

        let cli = Cli::try_parse_from([
            "stock-manager",
            "--config",
            path,
            "--data-file",
            "b.json",
            "--format",
            "json",
            "view",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.data_file, PathBuf::from("b.json"));
        assert_eq!(config.format, StorageFormat::Json);
    }

    #[test]
    fn test_add_rejects_negative_quantity() {
        let result = Cli::try_parse_from([
            "stock-manager",
            "add",
            "--name",
            "Toner",
            "--quantity",
            "-3",
            "--price",
            "2.5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reduce_takes_id_and_amount() {
        let cli = Cli::try_parse_from(["stock-manager", "reduce", "004", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Reduce {
                id: "004".into(),
                amount: 2
            })
        );
    }
}
