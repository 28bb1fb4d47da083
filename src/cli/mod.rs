use clap::{Parser, Subcommand};
use storefront::{catalog::Catalog, config::StorefrontConfig, observability};

mod cart;
mod catalog;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products in the catalog
    Catalog,

    /// Show the cart and its total
    Show,

    /// Add a product to the cart
    Add(cart::AddArgs),

    /// Remove a product/colour line from the cart
    Remove(cart::LineArgs),

    /// Change the quantity of a cart line
    SetQuantity(cart::SetQuantityArgs),

    /// Remove every line from the cart
    Empty,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let load_catalog = || {
            Catalog::from_path(&self.config.catalog).map_err(|error| {
                format!(
                    "failed to load catalog {}: {error}",
                    self.config.catalog.display()
                )
            })
        };

        match self.command {
            Commands::Catalog => catalog::list(&load_catalog()?),
            Commands::Show => cart::show(&self.config.storage, &load_catalog()?)?,
            Commands::Add(args) => cart::add(&self.config.storage, &load_catalog()?, args)?,
            Commands::Remove(args) => cart::remove(&self.config.storage, &args),
            Commands::SetQuantity(args) => cart::set_quantity(&self.config.storage, &args),
            Commands::Empty => cart::empty(&self.config.storage),
        }

        Ok(())
    }
}
