//! Fetches PubChem compounds and substances into JSON files.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin fetch_pubchem
//! ```
//!
//! ID ranges default to compounds 1-100 and substances 1-5; see
//! [`FetchConfig::from_env`] for overrides.

use seed_data::config::FetchConfig;
use seed_data::sources::{PubChemClient, write_json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FetchConfig::from_env();

    let mut client = PubChemClient::new();
    if let Some(ref dir) = config.cache_dir {
        client = client.with_cache_dir(dir);
    }

    tracing::info!("Processing compound data...");
    let compounds = client
        .process_compounds(config.compound_ids.clone(), "compound")
        .await;
    let compound_path = config.compound_output();
    write_json(&compound_path, &compounds)?;
    tracing::info!("Final compound data saved to {}", compound_path.display());

    tracing::info!("Processing substance data...");
    let substances = client
        .process_substances(config.substance_ids.clone(), "substance")
        .await;
    let substance_path = config.substance_output();
    write_json(&substance_path, &substances)?;
    tracing::info!("Final substance data saved to {}", substance_path.display());

    Ok(())
}
