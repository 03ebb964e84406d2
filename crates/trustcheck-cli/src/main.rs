//! trustcheck - assess how trustworthy a website looks.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    trustcheck_cli::run().await
}
