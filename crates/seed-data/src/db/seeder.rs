//! Bulk insertion of molecule records.

use drugxpert::{MoleculeRecord, MoleculeStore, StoreError};
use mongodb::bson::Bson;
use thiserror::Error;
use tracing::info;

use crate::dataset;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a seeding run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub inserted_count: usize,
    /// Identifiers assigned by the store, in the order the records were given.
    pub inserted_ids: Vec<Bson>,
}

/// Writes molecule records to a [`MoleculeStore`].
pub struct Seeder<S> {
    store: S,
}

impl<S: MoleculeStore> Seeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds the built-in molecule set.
    pub async fn seed_default(&self) -> Result<SeedReport, SeedError> {
        self.seed_molecules(&dataset::molecules()).await
    }

    /// Inserts `molecules` in a single bulk write. Existing documents are left
    /// untouched, so seeding twice stores every record twice.
    pub async fn seed_molecules(
        &self,
        molecules: &[MoleculeRecord],
    ) -> Result<SeedReport, SeedError> {
        info!("Seeding {} molecules...", molecules.len());

        let summary = self.store.insert_many(molecules).await?;

        info!("Seeded {} molecules", summary.inserted_count());
        Ok(SeedReport {
            inserted_count: summary.inserted_count(),
            inserted_ids: summary.inserted_ids,
        })
    }
}
