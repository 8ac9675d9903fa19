//! PubChem PUG-View client for compound and substance records.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Error)]
pub enum PubChemError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rate limited, try again later")]
    RateLimited,
}

/// Flattened compound record extracted from a PUG-View response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "place_loc")]
    pub place_loc: String,
    pub molecule_name: String,
    pub record_number: Option<u64>,
    pub smiles_structure: String,
    pub inchi_string: String,
    pub inchi_key: String,
    pub molecular_formula: String,
    /// As reported by PubChem, e.g. `"180.16"`.
    pub molecular_weight: String,
    pub drug_bank_id: String,
    /// First sentence of the drug indication.
    pub category_usage: String,
}

/// Flattened substance record extracted from a PUG-View response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstanceRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "place_loc")]
    pub place_loc: String,
    pub molecule_name: String,
    pub record_number: Option<u64>,
    pub record_type: String,
    pub external_id: String,
    pub source: String,
    pub source_category: Vec<String>,
    pub deposit_date: String,
    pub modify_date: String,
    pub available_date: String,
    pub status: String,
    pub depositor_comments: Vec<String>,
    pub related_compounds: Vec<String>,
}

/// Client for the PubChem PUG-View REST API.
pub struct PubChemClient {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
    base_url: String,
}

impl PubChemClient {
    /// Creates a client against the public PubChem endpoint.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_dir: None,
            base_url: "https://pubchem.ncbi.nlm.nih.gov/rest/pug_view/data".to_string(),
        }
    }

    /// Enables file-based caching of API responses.
    ///
    /// Responses are cached after `Reference` blocks have been stripped. The
    /// cache is best-effort: a directory that cannot be written only costs
    /// the cache, never a fetched record.
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&path) {
            warn!("Cache directory {} is unusable: {e}", path.display());
        }
        self.cache_dir = Some(path);
        self
    }

    /// Sets a custom PUG-View base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn compound_url(&self, id: u64) -> String {
        format!("{}/compound/{id}/JSON/", self.base_url)
    }

    fn substance_url(&self, id: u64) -> String {
        format!("{}/substance/{id}/JSON/?version=1", self.base_url)
    }

    /// Fetches one compound, with references removed.
    pub async fn fetch_compound(&self, id: u64) -> Result<Value, PubChemError> {
        self.fetch(&self.compound_url(id)).await
    }

    /// Fetches one substance, with references removed.
    pub async fn fetch_substance(&self, id: u64) -> Result<Value, PubChemError> {
        self.fetch(&self.substance_url(id)).await
    }

    /// Fetches and transforms every compound in `ids`.
    ///
    /// IDs that fail to download are logged and skipped, as are responses
    /// without a `Record`.
    pub async fn process_compounds(
        &self,
        ids: RangeInclusive<u64>,
        kind: &str,
    ) -> Vec<CompoundRecord> {
        let mut records = Vec::new();
        for id in ids {
            match self.fetch_compound(id).await {
                Ok(data) => match compound_from_response(kind, &data) {
                    Some(record) => records.push(record),
                    None => debug!("Compound {id} has no record"),
                },
                Err(e) => warn!("Error fetching data for compound {id}: {e}"),
            }
        }
        info!("Transformed {} compound records", records.len());
        records
    }

    /// Fetches and transforms every substance in `ids`.
    pub async fn process_substances(
        &self,
        ids: RangeInclusive<u64>,
        kind: &str,
    ) -> Vec<SubstanceRecord> {
        let mut records = Vec::new();
        for id in ids {
            match self.fetch_substance(id).await {
                Ok(data) => match substance_from_response(kind, &data) {
                    Some(record) => records.push(record),
                    None => debug!("Substance {id} has no record"),
                },
                Err(e) => warn!("Error fetching data for substance {id}: {e}"),
            }
        }
        info!("Transformed {} substance records", records.len());
        records
    }

    async fn fetch(&self, url: &str) -> Result<Value, PubChemError> {
        if let Some(cached) = self.read_cached(url) {
            return Ok(cached);
        }

        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(PubChemError::RateLimited);
        }

        let text = response.error_for_status()?.text().await?;
        let mut data: Value = serde_json::from_str(&text)?;
        strip_references(&mut data);

        self.write_cached(url, &data);

        Ok(data)
    }

    /// Cache file for `url`, named by a hash of the URL.
    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        use std::hash::{Hash, Hasher};

        let dir = self.cache_dir.as_ref()?;
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        url.hash(&mut hasher);
        Some(dir.join(format!("{:016x}.json", hasher.finish())))
    }

    /// Cached response for `url`. An unreadable or corrupt entry counts as a miss.
    fn read_cached(&self, url: &str) -> Option<Value> {
        let path = self.cache_path(url)?;
        let text = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(data) => {
                debug!("Cache hit for {url}");
                Some(data)
            }
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {e}", path.display());
                None
            }
        }
    }

    /// Stores `data` for `url`. Failures are logged; the response is still used.
    fn write_cached(&self, url: &str, data: &Value) {
        let Some(path) = self.cache_path(url) else {
            return;
        };
        let written = serde_json::to_string(data)
            .map_err(std::io::Error::from)
            .and_then(|text| std::fs::write(&path, text));
        if let Err(e) = written {
            warn!("Could not cache {url} at {}: {e}", path.display());
        }
    }
}

impl Default for PubChemClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes every `Reference` key, at any depth.
pub fn strip_references(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("Reference");
            map.values_mut().for_each(strip_references);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_references),
        _ => {}
    }
}

/// Builds a [`CompoundRecord`] from a PUG-View compound response.
/// Returns `None` when the response has no `Record`.
pub fn compound_from_response(kind: &str, data: &Value) -> Option<CompoundRecord> {
    let record = data.get("Record")?;

    let mut out = CompoundRecord {
        kind: kind.to_string(),
        place_loc: "pubchem".to_string(),
        molecule_name: record_title(record),
        record_number: record["RecordNumber"].as_u64(),
        smiles_structure: UNKNOWN.to_string(),
        inchi_string: UNKNOWN.to_string(),
        inchi_key: UNKNOWN.to_string(),
        molecular_formula: UNKNOWN.to_string(),
        molecular_weight: UNKNOWN.to_string(),
        drug_bank_id: UNKNOWN.to_string(),
        category_usage: UNKNOWN.to_string(),
    };

    for section in sections(record) {
        match heading(section) {
            "Names and Identifiers" => {
                for sub in sections(section) {
                    match heading(sub) {
                        "Computed Descriptors" => {
                            for descriptor in sections(sub) {
                                let target = match heading(descriptor) {
                                    "SMILES" => &mut out.smiles_structure,
                                    "InChI" => &mut out.inchi_string,
                                    "InChIKey" => &mut out.inchi_key,
                                    _ => continue,
                                };
                                *target = first_string(descriptor);
                            }
                        }
                        "Molecular Formula" => out.molecular_formula = first_string(sub),
                        "Other Identifiers" => {
                            for identifier in sections(sub) {
                                if heading(identifier) == "DrugBank ID" {
                                    out.drug_bank_id = first_string(identifier);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            "Chemical and Physical Properties" => {
                for sub in sections(section) {
                    if heading(sub) != "Computed Properties" {
                        continue;
                    }
                    for property in sections(sub) {
                        if heading(property) == "Molecular Weight" {
                            out.molecular_weight = first_string(property);
                        }
                    }
                }
            }
            "Drug and Medication Information" => {
                for sub in sections(section) {
                    if heading(sub) == "Drug Indication" {
                        let indication = first_string(sub);
                        if indication != UNKNOWN {
                            out.category_usage = first_sentence(&indication).to_string();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Some(out)
}

/// Builds a [`SubstanceRecord`] from a PUG-View substance response.
/// Returns `None` when the response has no `Record`.
pub fn substance_from_response(kind: &str, data: &Value) -> Option<SubstanceRecord> {
    let record = data.get("Record")?;

    let mut out = SubstanceRecord {
        kind: kind.to_string(),
        place_loc: "pubchem".to_string(),
        molecule_name: record_title(record),
        record_number: record["RecordNumber"].as_u64(),
        record_type: record["RecordType"]
            .as_str()
            .unwrap_or(UNKNOWN)
            .to_string(),
        external_id: UNKNOWN.to_string(),
        source: UNKNOWN.to_string(),
        source_category: Vec::new(),
        deposit_date: UNKNOWN.to_string(),
        modify_date: UNKNOWN.to_string(),
        available_date: UNKNOWN.to_string(),
        status: UNKNOWN.to_string(),
        depositor_comments: Vec::new(),
        related_compounds: Vec::new(),
    };

    for section in sections(record) {
        match heading(section) {
            "Identity" => {
                for sub in sections(section) {
                    match heading(sub) {
                        "Source" => out.source = first_string(sub),
                        "External ID" => out.external_id = first_string(sub),
                        "Source Category" => out.source_category = all_strings(sub),
                        "Deposit Date" => out.deposit_date = first_date(sub),
                        "Modify Date" => out.modify_date = first_date(sub),
                        "Available Date" => out.available_date = first_date(sub),
                        "Status" => out.status = first_string(sub),
                        _ => {}
                    }
                }
            }
            "Depositor Comments" => out.depositor_comments = all_strings(section),
            "Related Records" => {
                for sub in sections(section) {
                    if heading(sub) == "Related Compounds" {
                        out.related_compounds = all_strings(sub);
                    }
                }
            }
            _ => {}
        }
    }

    Some(out)
}

fn record_title(record: &Value) -> String {
    record["RecordTitle"].as_str().unwrap_or(UNKNOWN).to_string()
}

fn sections(node: &Value) -> impl Iterator<Item = &Value> {
    node["Section"].as_array().into_iter().flatten()
}

fn heading(node: &Value) -> &str {
    node["TOCHeading"].as_str().unwrap_or_default()
}

/// `Information[0].Value.StringWithMarkup[0].String`, or `"Unknown"`.
fn first_string(node: &Value) -> String {
    node["Information"][0]["Value"]["StringWithMarkup"][0]["String"]
        .as_str()
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Every non-empty `String` under `Information[0].Value.StringWithMarkup`.
fn all_strings(node: &Value) -> Vec<String> {
    node["Information"][0]["Value"]["StringWithMarkup"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|markup| markup["String"].as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn first_date(node: &Value) -> String {
    node["Information"][0]["Value"]["DateISO8601"][0]
        .as_str()
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn first_sentence(text: &str) -> &str {
    text.split('.').next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(text: &str) -> Value {
        json!([{
            "ReferenceNumber": 1,
            "Value": { "StringWithMarkup": [{ "String": text }] }
        }])
    }

    fn compound_fixture() -> Value {
        json!({
            "Reference": [{ "SourceName": "DrugBank" }],
            "Record": {
                "RecordType": "CID",
                "RecordNumber": 2244,
                "RecordTitle": "Aspirin",
                "Section": [
                    {
                        "TOCHeading": "Names and Identifiers",
                        "Section": [
                            {
                                "TOCHeading": "Computed Descriptors",
                                "Section": [
                                    { "TOCHeading": "InChI", "Information": info("InChI=1S/C9H8O4") },
                                    { "TOCHeading": "InChIKey", "Information": info("BSYNRYMUTXBXSQ-UHFFFAOYSA-N") },
                                    { "TOCHeading": "SMILES", "Information": info("CC(=O)OC1=CC=CC=C1C(=O)O") }
                                ]
                            },
                            { "TOCHeading": "Molecular Formula", "Information": info("C9H8O4") },
                            {
                                "TOCHeading": "Other Identifiers",
                                "Section": [
                                    { "TOCHeading": "DrugBank ID", "Information": info("DB00945") }
                                ]
                            }
                        ]
                    },
                    {
                        "TOCHeading": "Chemical and Physical Properties",
                        "Section": [{
                            "TOCHeading": "Computed Properties",
                            "Section": [
                                { "TOCHeading": "XLogP3", "Information": info("1.2") },
                                { "TOCHeading": "Molecular Weight", "Information": info("180.16") }
                            ]
                        }]
                    },
                    {
                        "TOCHeading": "Drug and Medication Information",
                        "Section": [{
                            "TOCHeading": "Drug Indication",
                            "Information": info("Used to reduce fever. Also an antiplatelet.")
                        }]
                    }
                ]
            }
        })
    }

    #[test]
    fn test_strip_references_nested() {
        let mut data = compound_fixture();
        data["Record"]["Section"][0]["Reference"] = json!({ "URL": "x" });

        strip_references(&mut data);

        assert!(data.get("Reference").is_none());
        assert!(data["Record"]["Section"][0].get("Reference").is_none());
        // Keys that merely start with "Reference" stay.
        assert_eq!(
            data["Record"]["Section"][1]["Section"][0]["Section"][0]["Information"][0]
                ["ReferenceNumber"],
            1
        );
    }

    #[test]
    fn test_compound_transform() {
        let record = compound_from_response("compound", &compound_fixture()).unwrap();

        assert_eq!(record.kind, "compound");
        assert_eq!(record.place_loc, "pubchem");
        assert_eq!(record.molecule_name, "Aspirin");
        assert_eq!(record.record_number, Some(2244));
        assert_eq!(record.smiles_structure, "CC(=O)OC1=CC=CC=C1C(=O)O");
        assert_eq!(record.inchi_string, "InChI=1S/C9H8O4");
        assert_eq!(record.inchi_key, "BSYNRYMUTXBXSQ-UHFFFAOYSA-N");
        assert_eq!(record.molecular_formula, "C9H8O4");
        assert_eq!(record.molecular_weight, "180.16");
        assert_eq!(record.drug_bank_id, "DB00945");
        assert_eq!(record.category_usage, "Used to reduce fever");
    }

    #[test]
    fn test_compound_missing_sections_are_unknown() {
        let data = json!({ "Record": { "RecordTitle": "Mystery", "Section": [] } });
        let record = compound_from_response("compound", &data).unwrap();

        assert_eq!(record.molecule_name, "Mystery");
        assert_eq!(record.record_number, None);
        assert_eq!(record.smiles_structure, "Unknown");
        assert_eq!(record.molecular_weight, "Unknown");
        assert_eq!(record.category_usage, "Unknown");

        let value = serde_json::to_value(&record).unwrap();
        assert!(value["recordNumber"].is_null());
        assert_eq!(value["inchiKey"], "Unknown");
    }

    #[test]
    fn test_compound_without_record() {
        let data = json!({ "Fault": { "Code": "PUGVIEW.NotFound" } });
        assert!(compound_from_response("compound", &data).is_none());
    }

    #[test]
    fn test_compound_wire_names() {
        let record = compound_from_response("compound", &compound_fixture()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "compound");
        assert_eq!(value["place_loc"], "pubchem");
        assert_eq!(value["drugBankId"], "DB00945");
        assert_eq!(value["smilesStructure"], "CC(=O)OC1=CC=CC=C1C(=O)O");
    }

    #[test]
    fn test_substance_transform() {
        let data = json!({
            "Record": {
                "RecordType": "SID",
                "RecordNumber": 1,
                "RecordTitle": "Acetyl-DL-carnitine",
                "Section": [
                    {
                        "TOCHeading": "Identity",
                        "Section": [
                            { "TOCHeading": "Source", "Information": info("NCATS") },
                            { "TOCHeading": "External ID", "Information": info("1") },
                            {
                                "TOCHeading": "Source Category",
                                "Information": [{ "Value": { "StringWithMarkup": [
                                    { "String": "Chemical Vendors" },
                                    { "String": "" },
                                    { "String": "Research" }
                                ] } }]
                            },
                            {
                                "TOCHeading": "Deposit Date",
                                "Information": [{ "Value": { "DateISO8601": ["2004-09-16"] } }]
                            },
                            { "TOCHeading": "Status", "Information": info("Live") }
                        ]
                    },
                    { "TOCHeading": "Depositor Comments", "Information": info("Imported") },
                    {
                        "TOCHeading": "Related Records",
                        "Section": [
                            { "TOCHeading": "Related Compounds", "Information": info("CID 1") }
                        ]
                    }
                ]
            }
        });

        let record = substance_from_response("substance", &data).unwrap();

        assert_eq!(record.record_type, "SID");
        assert_eq!(record.record_number, Some(1));
        assert_eq!(record.source, "NCATS");
        assert_eq!(record.external_id, "1");
        assert_eq!(record.source_category, vec!["Chemical Vendors", "Research"]);
        assert_eq!(record.deposit_date, "2004-09-16");
        assert_eq!(record.modify_date, "Unknown");
        assert_eq!(record.status, "Live");
        assert_eq!(record.depositor_comments, vec!["Imported"]);
        assert_eq!(record.related_compounds, vec!["CID 1"]);
    }

    #[test]
    fn test_urls() {
        let client = PubChemClient::new().with_base_url("http://localhost:1");
        assert_eq!(client.compound_url(7), "http://localhost:1/compound/7/JSON/");
        assert_eq!(
            client.substance_url(3),
            "http://localhost:1/substance/3/JSON/?version=1"
        );
    }

    #[test]
    fn test_cache_path_per_url() {
        let client = PubChemClient::new().with_cache_dir(std::env::temp_dir());
        let a = client.cache_path("a").unwrap();

        assert_eq!(a, client.cache_path("a").unwrap());
        assert_ne!(a, client.cache_path("b").unwrap());
        assert!(PubChemClient::new().cache_path("a").is_none());
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = std::env::temp_dir().join(format!("pubchem-cache-{}", std::process::id()));
        let client = PubChemClient::new().with_cache_dir(&dir);
        let url = client.compound_url(2244);

        assert!(client.read_cached(&url).is_none());
        client.write_cached(&url, &compound_fixture());
        assert_eq!(client.read_cached(&url), Some(compound_fixture()));

        std::fs::write(client.cache_path(&url).unwrap(), "{not json").unwrap();
        assert!(client.read_cached(&url).is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    /// Serves `body` as a 200 JSON response to every connection.
    async fn serve_json(body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_unwritable_cache_keeps_records() {
        let base_url = serve_json(compound_fixture().to_string()).await;

        // A cache directory below a regular file can never be created.
        let blocker =
            std::env::temp_dir().join(format!("pubchem-blocker-{}", std::process::id()));
        std::fs::write(&blocker, "file").unwrap();

        let uncached = PubChemClient::new().with_base_url(&base_url);
        let badly_cached = PubChemClient::new()
            .with_base_url(&base_url)
            .with_cache_dir(blocker.join("cache"));

        let plain = uncached.process_compounds(1..=1, "compound").await;
        let cached = badly_cached.process_compounds(1..=1, "compound").await;

        assert_eq!(plain.len(), 1);
        assert_eq!(cached, plain);
        assert_eq!(cached[0].molecule_name, "Aspirin");

        std::fs::remove_file(&blocker).ok();
    }

    #[tokio::test]
    async fn test_process_skips_failed_ids() {
        // Nothing listens on port 1, so every request fails.
        let client = PubChemClient::new().with_base_url("http://127.0.0.1:1");
        let records = client.process_compounds(1..=2, "compound").await;
        assert!(records.is_empty());
    }
}
