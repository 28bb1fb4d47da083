//! Storefront configuration

use std::path::PathBuf;

use clap::Args;

use crate::{
    cart::CartStore,
    persistence::{DEFAULT_CART_SLOT, FileStore, SlotPersistence},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level or filter directives (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Where the cart is persisted.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory the cart is saved in
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// Slot name the cart is saved under
    #[arg(long, env = "STOREFRONT_CART_SLOT", default_value = DEFAULT_CART_SLOT)]
    pub cart_slot: String,
}

impl StorageConfig {
    /// Opens the cart saved in the configured slot.
    pub fn open_cart(&self) -> CartStore<SlotPersistence<FileStore>> {
        CartStore::open(SlotPersistence::with_slot(
            FileStore::new(self.data_dir.clone()),
            self.cart_slot.as_str(),
        ))
    }
}

/// Storefront settings shared by every command.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Product catalog (YAML)
    #[arg(long, env = "STOREFRONT_CATALOG", default_value = "fixtures/catalog.yaml")]
    pub catalog: PathBuf,

    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
