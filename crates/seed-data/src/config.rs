//! Configuration for seeding and fetching, read from the environment.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use drugxpert::{DEFAULT_COLLECTION, DEFAULT_DATABASE};

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_CHEMBL_ID: &str = "CHEMBL4443036";

/// Configuration for the seed loader.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,

    /// Target database name.
    pub database: String,

    /// Target collection name.
    pub collection: String,

    /// Seed into an in-process store instead of MongoDB.
    pub dry_run: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            dry_run: false,
        }
    }
}

impl SeedConfig {
    /// Reads `MONGODB_URI`, `DRUGXPERT_DATABASE`, `DRUGXPERT_COLLECTION` and
    /// `SEED_DRY_RUN`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            mongodb_uri: lookup("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            database: lookup("DRUGXPERT_DATABASE").unwrap_or(defaults.database),
            collection: lookup("DRUGXPERT_COLLECTION").unwrap_or(defaults.collection),
            dry_run: lookup("SEED_DRY_RUN").is_some_and(|v| parse_flag(&v)),
        }
    }
}

/// Configuration for the PubChem and ChEMBL fetchers.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// PubChem compound IDs to fetch.
    pub compound_ids: RangeInclusive<u64>,

    /// PubChem substance IDs to fetch.
    pub substance_ids: RangeInclusive<u64>,

    /// ChEMBL molecule to fetch.
    pub chembl_id: String,

    /// Directory the JSON output files are written to.
    pub output_dir: PathBuf,

    /// Optional directory for caching raw API responses.
    pub cache_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            compound_ids: 1..=100,
            substance_ids: 1..=5,
            chembl_id: DEFAULT_CHEMBL_ID.to_string(),
            output_dir: PathBuf::from("."),
            cache_dir: None,
        }
    }
}

impl FetchConfig {
    pub const COMPOUND_OUTPUT: &'static str = "final_pubchem_compound_data.json";
    pub const SUBSTANCE_OUTPUT: &'static str = "final_pubchem_substance_data.json";
    pub const CHEMBL_OUTPUT: &'static str = "chembl_data.json";

    /// Reads the `PUBCHEM_*`, `CHEMBL_ID` and `OUTPUT_DIR` variables.
    /// Unparseable bounds fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let bound = |key: &str, fallback: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        Self {
            compound_ids: bound("PUBCHEM_COMPOUND_START", *defaults.compound_ids.start())
                ..=bound("PUBCHEM_COMPOUND_END", *defaults.compound_ids.end()),
            substance_ids: bound("PUBCHEM_SUBSTANCE_START", *defaults.substance_ids.start())
                ..=bound("PUBCHEM_SUBSTANCE_END", *defaults.substance_ids.end()),
            chembl_id: lookup("CHEMBL_ID").unwrap_or(defaults.chembl_id),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            cache_dir: lookup("PUBCHEM_CACHE_DIR").map(PathBuf::from),
        }
    }

    pub fn compound_output(&self) -> PathBuf {
        self.output_dir.join(Self::COMPOUND_OUTPUT)
    }

    pub fn substance_output(&self) -> PathBuf {
        self.output_dir.join(Self::SUBSTANCE_OUTPUT)
    }

    pub fn chembl_output(&self) -> PathBuf {
        self.output_dir.join(Self::CHEMBL_OUTPUT)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
