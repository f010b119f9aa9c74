//! Binary crate for the `airquality` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive key configuration
//! - Starting the HTTP service

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
