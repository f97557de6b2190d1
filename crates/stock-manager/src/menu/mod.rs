//! # Text menu
//!
//! The interactive console front end. [`Menu`] reads one answer per line and
//! writes prompts and results as plain text, so it runs the same over a
//! terminal or over in-memory buffers in tests.
//!
//! ```text
//! Stock Management System
//!
//! [1] Add Product      [2] Update Product
//! [3] View Products    [4] Search Product
//! [5] Exit
//! Enter your choice:
//! ```
//!
//! End of input at any prompt leaves the menu without further output.

pub mod render;

use crate::clients::ProductClient;
use crate::model::{Product, ProductCreate, ProductId, ProductQuery};
use crate::product_actor::ProductError;
use record_actor::ActorClient;
use render::{product_details, product_table};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const MAIN_MENU: &str = "\nStock Management System\n\n\
[1] Add Product      [2] Update Product\n\
[3] View Products    [4] Search Product\n\
[5] Exit\n";

/// Whether the main loop keeps going after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Reads a line for `$prompt`, leaving the screen with [`Flow::Exit`] on end of input.
macro_rules! answer {
    ($menu:expr, $prompt:expr) => {
        match $menu.prompt($prompt).await? {
            Some(line) => line,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Interactive menu over any line-based reader and writer.
pub struct Menu<R, W> {
    client: ProductClient,
    categories: Vec<String>,
    low_stock_threshold: u32,
    input: R,
    output: W,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        client: ProductClient,
        categories: Vec<String>,
        low_stock_threshold: u32,
        input: R,
        output: W,
    ) -> Self {
        Self {
            client,
            categories,
            low_stock_threshold,
            input,
            output,
        }
    }

    /// Gives back the writer, e.g. to inspect what a test session printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the main loop until the user exits or the input ends.
    ///
    /// Product errors are reported to the user and the loop carries on; only
    /// I/O errors on the reader or writer end the session with an error.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.write(MAIN_MENU).await?;
            let choice = match self.prompt("Enter your choice: ").await? {
                Some(choice) => choice,
                None => break,
            };
            debug!(%choice, "Menu choice");

            let flow = match choice.as_str() {
                "1" => self.add_product().await?,
                "2" => self.update_stock().await?,
                "3" => self.view_stock().await?,
                "4" => self.search_product().await?,
                "5" => {
                    self.write("Exiting Stock Management System. Goodbye!\n")
                        .await?;
                    Flow::Exit
                }
                _ => {
                    self.write("Invalid choice. Please try again.\n").await?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        self.output.flush().await
    }

    async fn add_product(&mut self) -> io::Result<Flow> {
        let id = answer!(self, "Enter Product ID (blank for next free ID): ");
        if !id.is_empty() && self.lookup(&id).await?.is_some() {
            self.write("Product ID already exists. Try updating the stock instead.\n")
                .await?;
            return Ok(Flow::Continue);
        }

        let name = answer!(self, "Enter Product Name: ");
        let quantity = answer!(self, "Enter Initial Quantity: ");
        let price = answer!(self, "Enter Product Price: ");
        let (Ok(quantity), Ok(price)) = (quantity.parse::<u32>(), price.parse::<f64>()) else {
            self.write(
                "Invalid input. Quantity should be a whole number and price should be a number.\n",
            )
            .await?;
            return Ok(Flow::Continue);
        };

        let Some(category) = self.choose_category().await? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = category else {
            self.write("Invalid category choice. Product not added.\n")
                .await?;
            return Ok(Flow::Continue);
        };

        let params = ProductCreate {
            name,
            quantity,
            price,
            category: Some(category.clone()),
        };
        let result = if id.is_empty() {
            self.client.create_product(params).await
        } else {
            self.client.add_product(ProductId::from(id), params).await
        };
        match result {
            Ok(id) => {
                let message = format!(
                    "\nProduct {id} added successfully under category '{category}'.\n"
                );
                self.write(&message).await?;
            }
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn update_stock(&mut self) -> io::Result<Flow> {
        let id = answer!(self, "Enter Product ID: ");
        let Some(product) = self.lookup(&id).await? else {
            self.write("Product ID not found.\n").await?;
            return Ok(Flow::Continue);
        };

        self.write("\nUpdate Stock\n[1] Add Stock\n[2] Reduce Stock\n")
            .await?;
        let choice = answer!(self, "Enter your choice: ");
        if choice != "1" && choice != "2" {
            self.write("Invalid choice. Please try again.\n").await?;
            return Ok(Flow::Continue);
        }

        let amount = answer!(self, "Enter quantity change: ");
        let Ok(amount) = amount.parse::<u32>() else {
            self.write("Invalid input. Quantity change should be a whole number.\n")
                .await?;
            return Ok(Flow::Continue);
        };

        let message = if choice == "1" {
            self.client
                .restock(product.id.clone(), amount)
                .await
                .map(|level| {
                    format!(
                        "Added {amount} to '{}' stock. Current quantity: {level}\n",
                        product.name
                    )
                })
        } else {
            self.client
                .reduce_stock(product.id.clone(), amount)
                .await
                .map(|level| {
                    format!(
                        "Reduced {amount} from '{}' stock. Current quantity: {level}\n",
                        product.name
                    )
                })
        };
        match message {
            Ok(message) => self.write(&message).await?,
            Err(ProductError::InsufficientStock { .. }) => {
                self.write("Error: Insufficient stock to reduce.\n").await?
            }
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn view_stock(&mut self) -> io::Result<Flow> {
        let products = match self.client.list().await {
            Ok(products) => products,
            Err(e) => {
                self.report(&e).await?;
                return Ok(Flow::Continue);
            }
        };
        if products.is_empty() {
            self.write("\nNo products in stock.\n").await?;
            return Ok(Flow::Continue);
        }

        self.write("\nView Stock\n[1] View All Products\n[2] View by Category\n[3] View Low Stock\n")
            .await?;
        let choice = answer!(self, "Enter your choice: ");
        let (title, selected): (String, Vec<Product>) = match choice.as_str() {
            "1" => ("Current Stock".to_string(), products),
            "2" => {
                let Some(category) = self.choose_category().await? else {
                    return Ok(Flow::Exit);
                };
                let Some(category) = category else {
                    self.write("Invalid category choice.\n").await?;
                    return Ok(Flow::Continue);
                };
                let title = format!("Products in Category: {category}");
                (title, ProductQuery::Category(category).apply(products))
            }
            "3" => {
                let threshold = self.low_stock_threshold;
                let title = format!("Low Stock (below {threshold})");
                (title, ProductQuery::LowStock(threshold).apply(products))
            }
            _ => {
                self.write("Invalid choice. Please try again.\n").await?;
                return Ok(Flow::Continue);
            }
        };

        let screen = format!("\n{title}\n{}", product_table(&selected));
        self.write(&screen).await?;
        Ok(Flow::Continue)
    }

    async fn search_product(&mut self) -> io::Result<Flow> {
        let id = answer!(self, "Enter Product ID to search: ");
        match self.lookup(&id).await? {
            Some(product) => {
                let details = format!("\n{}", product_details(&product));
                self.write(&details).await?
            }
            None => self.write("Product ID not found.\n").await?,
        }
        Ok(Flow::Continue)
    }

    /// Offers the configured categories.
    ///
    /// Returns `None` on end of input and `Some(None)` for an invalid choice.
    async fn choose_category(&mut self) -> io::Result<Option<Option<String>>> {
        let mut list = String::from("\nSelect Category:\n");
        for (n, category) in self.categories.iter().enumerate() {
            list.push_str(&format!("{}. {category}\n", n + 1));
        }
        self.write(&list).await?;

        let Some(choice) = self.prompt("Enter your choice: ").await? else {
            return Ok(None);
        };
        let category = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.categories.get(index))
            .cloned();
        Ok(Some(category))
    }

    /// Fetches a product by id, reporting store errors as not found.
    async fn lookup(&mut self, id: &str) -> io::Result<Option<Product>> {
        match self.client.get(ProductId::from(id)).await {
            Ok(product) => Ok(product),
            Err(e) => {
                self.report(&e).await?;
                Ok(None)
            }
        }
    }

    async fn report(&mut self, error: &ProductError) -> io::Result<()> {
        self.write(&format!("Error: {error}\n")).await
    }

    async fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        self.write(text).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await
    }
}
