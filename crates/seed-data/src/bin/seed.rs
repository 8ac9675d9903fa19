//! Seeds the built-in molecule set into `DrugXpert.molecules`.
//!
//! Run with:
//! ```
//! MONGODB_URI=mongodb://localhost:27017 cargo run -p seed-data --bin seed
//! ```
//!
//! Set `SEED_DRY_RUN=1` to insert into an in-process store instead.

use seed_data::config::SeedConfig;
use seed_data::db::Seeder;
use seed_data::{Database, InMemoryStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();

    let report = if config.dry_run {
        tracing::info!("Dry run: seeding into memory");
        Seeder::new(InMemoryStore::new()).seed_default().await?
    } else {
        let db = Database::connect(&config.mongodb_uri, &config.database, &config.collection)
            .await?;
        Seeder::new(db).seed_default().await?
    };

    tracing::info!("Seed completed!");
    tracing::info!("  Target: {}.{}", config.database, config.collection);
    tracing::info!("  Inserted: {}", report.inserted_count);
    for id in &report.inserted_ids {
        tracing::debug!("  _id: {id}");
    }

    Ok(())
}
