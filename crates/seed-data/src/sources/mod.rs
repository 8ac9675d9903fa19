//! External molecule sources.
//!
//! - [`PubChemClient`]: compound and substance records from PubChem PUG-View
//! - [`ChemblClient`]: single molecule documents from ChEMBL

mod chembl;
mod pubchem;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

pub use chembl::{ChemblClient, ChemblError};
pub use pubchem::{
    CompoundRecord, PubChemClient, PubChemError, SubstanceRecord, compound_from_response,
    strip_references, substance_from_response,
};

/// Writes `value` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_pretty() {
        let path = std::env::temp_dir().join(format!("write-json-{}.json", std::process::id()));
        write_json(&path, &vec!["a", "b"]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'));
        let parsed: Vec<String> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);

        std::fs::remove_file(&path).ok();
    }
}
