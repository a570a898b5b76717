//! med-dataset - clinical sample dataset CLI
//!
//! Seeds the demo dataset, records feedback and exports it as CSV.

use med_dataset::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is initialized by the CLI once the config file is known
    cli::run().await
}
