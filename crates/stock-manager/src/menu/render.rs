//! Plain-text rendering of products for the menu and the command surface.

use crate::model::Product;

/// Shown instead of an empty table.
pub const NO_RESULTS: &str = "No results found.";

const HEADERS: [&str; 5] = ["ID", "Name", "Quantity", "Price", "Category"];

/// Prices always carry two decimals.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Renders `products` as an aligned table, one row per product.
pub fn product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.quantity.to_string(),
                format_price(p.price),
                p.category.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders every field of one product, one per line.
pub fn product_details(product: &Product) -> String {
    format!(
        "Product Details\n\
         ID: {}\n\
         Name: {}\n\
         Quantity: {}\n\
         Price: {}\n\
         Category: {}\n",
        product.id,
        product.name,
        product.quantity,
        format_price(product.price),
        product.category,
    )
}
