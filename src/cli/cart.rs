use std::io;

use clap::Args;
use storefront::{
    ProductId, catalog::Catalog, config::StorageConfig, pricing::to_money,
    summary::CartSummary,
};

/// Colour label used for products without colour variants.
const DEFAULT_COLOR: &str = "Default";

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog product id
    product: u64,

    /// Colour variant; defaults to the product's first colour
    #[arg(long)]
    color: Option<String>,

    /// Units to add
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    /// Catalog product id
    product: u64,

    /// Colour variant of the line
    #[arg(long)]
    color: String,
}

#[derive(Debug, Args)]
pub(crate) struct SetQuantityArgs {
    #[command(flatten)]
    line: LineArgs,

    /// New quantity; values below one are raised to one
    #[arg(long)]
    quantity: u32,
}

pub(crate) fn show(storage: &StorageConfig, catalog: &Catalog) -> Result<(), String> {
    let store = storage.open_cart();

    CartSummary::new(store.cart(), catalog.currency())
        .write_to(io::stdout().lock())
        .map_err(|error| error.to_string())
}

pub(crate) fn add(storage: &StorageConfig, catalog: &Catalog, args: AddArgs) -> Result<(), String> {
    let id = ProductId::from(args.product);

    let product = catalog
        .product(id)
        .ok_or_else(|| format!("product {id} is not in the catalog"))?;

    let color = match args.color {
        Some(color) if product.colors.is_empty() || product.has_color(&color) => color,
        Some(color) => {
            return Err(format!("{} is not available in {color}", product.title));
        }
        None => product
            .default_color()
            .map_or_else(|| DEFAULT_COLOR.to_string(), |color| color.name.clone()),
    };

    let mut store = storage.open_cart();

    store.add_item(product, args.quantity, &color);

    let quantity = store.get(id, &color).map_or(0, |line| line.quantity);
    let total = store.total().map_err(|error| error.to_string())?;

    println!(
        "{} ({color}) x{quantity} in cart; cart total {}",
        product.title,
        to_money(total, catalog.currency())
    );

    Ok(())
}

pub(crate) fn remove(storage: &StorageConfig, args: &LineArgs) {
    let id = ProductId::from(args.product);
    let mut store = storage.open_cart();

    if store.get(id, &args.color).is_none() {
        println!("product {id} ({}) is not in the cart", args.color);
        return;
    }

    store.remove_item(id, &args.color);

    println!("removed product {id} ({}) from cart", args.color);
}

pub(crate) fn set_quantity(storage: &StorageConfig, args: &SetQuantityArgs) {
    let id = ProductId::from(args.line.product);
    let color = &args.line.color;
    let mut store = storage.open_cart();

    store.update_quantity(id, color, args.quantity);

    match store.get(id, color) {
        Some(line) => println!("product {id} ({color}) quantity is now {}", line.quantity),
        None => println!("product {id} ({color}) is not in the cart"),
    }
}

pub(crate) fn empty(storage: &StorageConfig) {
    let mut store = storage.open_cart();

    store.empty_cart();

    println!("cart emptied");
}
