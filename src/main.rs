use anyhow::Result;
use groupmail::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
