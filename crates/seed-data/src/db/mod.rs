//! Database seeding.
//!
//! The [`Seeder`] writes molecule records to any [`drugxpert::MoleculeStore`]
//! in one bulk insert and reports the identifiers the store assigned.

mod seeder;

pub use seeder::{SeedError, SeedReport, Seeder};
