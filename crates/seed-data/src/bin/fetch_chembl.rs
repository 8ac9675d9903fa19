//! Fetches one ChEMBL molecule document into `chembl_data.json`.
//!
//! Run with:
//! ```
//! CHEMBL_ID=CHEMBL4443036 cargo run -p seed-data --bin fetch_chembl
//! ```

use seed_data::config::FetchConfig;
use seed_data::sources::{ChemblClient, write_json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FetchConfig::from_env();

    let data = ChemblClient::new().fetch_molecule(&config.chembl_id).await?;

    let path = config.chembl_output();
    write_json(&path, &data)?;
    tracing::info!("Saved {} to {}", config.chembl_id, path.display());

    Ok(())
}
