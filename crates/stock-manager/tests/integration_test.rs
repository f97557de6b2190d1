use record_actor::ActorClient;
use stock_manager::cli::{execute, Command};
use stock_manager::lifecycle::{AppConfig, StockSystem};
use stock_manager::model::{Product, ProductCreate, ProductId, ProductUpdate};
use stock_manager::product_actor::ProductError;
use stock_manager::storage::StorageFormat;
use std::path::Path;

fn config_for(path: &Path) -> AppConfig {
    AppConfig {
        data_file: path.to_path_buf(),
        ..AppConfig::default()
    }
}

fn params(name: &str, quantity: u32, price: f64, category: &str) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        quantity,
        price,
        category: Some(category.to_string()),
    }
}

/// Full end-to-end test against a real CSV file.
/// Every mutation must be on disk by the time its call returns.
#[tokio::test]
async fn test_stock_survives_restart_in_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock_data.csv");
    let config = config_for(&path);

    let system = StockSystem::new(&config).expect("Failed to start");
    let client = &system.product_client;

    let foam = client
        .create_product(params("Gentle Foam", 25, 12.5, "Cleanser"))
        .await
        .expect("Failed to create product");
    assert_eq!(foam, ProductId::from("001"));

    let cream = client
        .create_product(params("Night Cream", 4, 30.0, "Moisturizer"))
        .await
        .expect("Failed to create product");
    assert_eq!(cream, ProductId::from("002"));

    assert_eq!(client.reduce_stock(foam.clone(), 5).await, Ok(20));
    assert_eq!(client.restock(cream.clone(), 6).await, Ok(10));

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        on_disk,
        "product_id,name,quantity,price,category\n\
         001,Gentle Foam,20,12.5,Cleanser\n\
         002,Night Cream,10,30.0,Moisturizer\n"
    );

    system.shutdown().await.expect("Failed to shutdown");

    let system = StockSystem::new(&config).expect("Failed to restart");
    let products = system.product_client.list().await.unwrap();
    assert_eq!(
        products,
        vec![
            Product::new("001", "Gentle Foam", 20, 12.5, "Cleanser"),
            Product::new("002", "Night Cream", 10, 30.0, "Moisturizer"),
        ]
    );
    let next = system
        .product_client
        .create_product(params("Vitamin C", 9, 22.0, "Serum"))
        .await
        .unwrap();
    assert_eq!(next, ProductId::from("003"));
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_rejected_operations_leave_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock_data.csv");
    std::fs::write(
        &path,
        "product_id,name,quantity,price,category\nA7,Clay Mask,3,14.0,\n",
    )
    .unwrap();

    let system = StockSystem::new(&config_for(&path)).expect("Failed to start");
    let client = &system.product_client;

    let mask = client.require(ProductId::from("A7")).await.unwrap();
    assert_eq!(mask.category, "Unknown");

    assert_eq!(
        client.reduce_stock(ProductId::from("A7"), 4).await,
        Err(ProductError::InsufficientStock {
            requested: 4,
            available: 3
        })
    );
    assert_eq!(
        client
            .add_product(ProductId::from("A7"), params("Other", 1, 1.0, "Serum"))
            .await,
        Err(ProductError::AlreadyExists("A7".into()))
    );
    assert_eq!(
        client.restock(ProductId::from("B1"), 1).await,
        Err(ProductError::NotFound("B1".into()))
    );
    assert_eq!(
        client.check_stock(ProductId::from("A7")).await,
        Ok(3)
    );

    // Nothing above mutated the store, so the original file was never rewritten.
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        on_disk,
        "product_id,name,quantity,price,category\nA7,Clay Mask,3,14.0,\n"
    );

    // Non-numeric ids are skipped when generating the next one.
    let id = client
        .create_product(params("Toner", 2, 8.0, "Cleanser"))
        .await
        .unwrap();
    assert_eq!(id, ProductId::from("001"));

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_json_store_edit_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock.json");
    let config = config_for(&path);
    assert_eq!(config.format, StorageFormat::Auto);

    let system = StockSystem::new(&config).expect("Failed to start");
    let client = &system.product_client;

    let id = client
        .create_product(params("Daily Shield", 10, 18.0, "Sunscreen"))
        .await
        .unwrap();
    let edited = client
        .edit_product(
            id.clone(),
            ProductUpdate {
                price: Some(19.5),
                category: Some("  ".into()),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.price, 19.5);
    assert_eq!(edited.category, "Unknown");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["001"]["price"], 19.5);
    assert_eq!(json["001"]["category"], "Unknown");

    client.delete(id.clone()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    assert_eq!(
        client.delete(id).await,
        Err(ProductError::NotFound("001".into()))
    );

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_duplicate_ids_in_file_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock_data.csv");
    std::fs::write(
        &path,
        "product_id,name,quantity,price,category\n001,A,1,1.0,Serum\n001,B,2,2.0,Serum\n",
    )
    .unwrap();

    assert!(StockSystem::new(&config_for(&path)).is_err());
}

#[tokio::test]
async fn test_commands_print_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock_data.csv");
    let system = StockSystem::new(&config_for(&path)).expect("Failed to start");

    async fn run(system: &StockSystem, command: Command) -> String {
        let mut out = Vec::new();
        execute(system, command, &mut out)
            .await
            .expect("command failed");
        String::from_utf8(out).unwrap()
    }

    let added = run(
        &system,
        Command::Add {
            name: "Night Cream".into(),
            quantity: 4,
            price: 30.0,
            category: Some("Moisturizer".into()),
            id: None,
        },
    )
    .await;
    assert_eq!(added, "Added product 001.\n");

    let reduced = run(
        &system,
        Command::Reduce {
            id: "001".into(),
            amount: 1,
        },
    )
    .await;
    assert_eq!(reduced, "Product 001 now has 3 in stock.\n");

    let low = run(
        &system,
        Command::View {
            category: None,
            low_stock: true,
        },
    )
    .await;
    assert!(low.contains("001  Night Cream  3         30.00  Moisturizer"), "{low}");

    let search = run(&system, Command::Search { term: "serum".into() }).await;
    assert_eq!(search, "No results found.\n");

    let mut out = Vec::new();
    let err = execute(&system, Command::Search { term: "50%".into() }, &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid search term"));

    let err = execute(
        &system,
        Command::Reduce {
            id: "001".into(),
            amount: 0,
        },
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("Invalid quantity"));

    let err = execute(
        &system,
        Command::Add {
            name: "Toner".into(),
            quantity: 1,
            price: 2.0,
            category: None,
            id: Some("".into()),
        },
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("Product ID must not be empty"));

    let shown = run(&system, Command::Show { id: "001".into() }).await;
    assert!(shown.contains("Price: 30.00\n"));

    system.shutdown().await.expect("Failed to shutdown");
}
