//! Storefront CLI

use std::process;

use clap::Parser;

mod cli;

pub fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        process::exit(1);
    }
}
