//! Molecule records for DrugXpert and the document store they live in.

pub mod database;
pub mod errors;
pub mod models;

pub use database::{DEFAULT_COLLECTION, DEFAULT_DATABASE, Database, InMemoryStore, MoleculeStore};
pub use errors::StoreError;
pub use models::{InsertSummary, MoleculeRecord, StoredMolecule};
