use crate::pipeline::launch;
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod error;
mod i18n;
mod llm;
mod outlet;
mod pipeline;
mod providers;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config();

    launch(&config).await
}
