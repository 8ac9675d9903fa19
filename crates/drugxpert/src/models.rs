use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// A molecule document as written to the `molecules` collection.
///
/// Field names are camelCase on the wire. Nothing here is validated: the
/// structure string may be a SMILES string or a bare formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeRecord {
    pub molecule_name: String,
    pub smiles_structure: String,
    /// Grams per mole.
    pub molecular_weight: f64,
    pub category_usage: String,
}

impl MoleculeRecord {
    pub fn new(
        molecule_name: impl Into<String>,
        smiles_structure: impl Into<String>,
        molecular_weight: f64,
        category_usage: impl Into<String>,
    ) -> Self {
        Self {
            molecule_name: molecule_name.into(),
            smiles_structure: smiles_structure.into(),
            molecular_weight,
            category_usage: category_usage.into(),
        }
    }
}

/// A molecule read back from a store, with the identifier the store assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMolecule {
    #[serde(rename = "_id")]
    pub id: Bson,
    pub molecule_name: String,
    pub smiles_structure: String,
    pub molecular_weight: f64,
    pub category_usage: String,
}

/// Outcome of a bulk insert: the identifiers the store assigned, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertSummary {
    pub inserted_ids: Vec<Bson>,
}

impl InsertSummary {
    pub fn inserted_count(&self) -> usize {
        self.inserted_ids.len()
    }
}
