//! Seed data for DrugXpert.
//!
//! The [`dataset`] module holds the built-in molecule set that the `seed`
//! binary writes to `DrugXpert.molecules`. The [`sources`] module fetches
//! richer records from PubChem and ChEMBL into JSON files.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let db = Database::connect(&config.mongodb_uri, &config.database, &config.collection).await?;
//! let report = Seeder::new(db).seed_default().await?;
//! assert_eq!(report.inserted_count, MOLECULE_COUNT);
//! ```

pub mod config;
pub mod dataset;
pub mod db;
pub mod sources;

pub use drugxpert::{Database, InMemoryStore, MoleculeRecord, MoleculeStore, StoredMolecule};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{FetchConfig, SeedConfig};
    pub use crate::dataset::{MOLECULE_COUNT, molecules};
    pub use crate::db::{SeedError, SeedReport, Seeder};
    pub use crate::sources::{ChemblClient, PubChemClient, write_json};
    pub use crate::{Database, InMemoryStore, MoleculeRecord, MoleculeStore, StoredMolecule};
}
