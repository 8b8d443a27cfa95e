//! Sample run-table dataset: the in-memory model and the startup provider.
//!
//! A run table is a JSON file holding loosely-structured sample metadata,
//! either as an array of records or as a single record object. The provider
//! picks between an operator-supplied real file and the bundled public one,
//! then loads the winner fully into memory.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One sample-metadata entry. Fields are whatever the source file carries
/// (`Run`, `Organism`, `brain_region`, ...); nothing is schema-enforced and
/// any field may be absent.
pub type Record = serde_json::Map<String, Value>;

/// Which source ended up backing the in-memory dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The operator-configured real data file loaded successfully.
    Real,
    /// A real data path was set but failed to load; the bundled file took over.
    Fallback,
    /// No real data path was configured; the bundled file was used directly.
    PublicDefault,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The full dataset as loaded from disk.
///
/// Both source shapes are kept verbatim so that responses echo exactly what
/// was loaded; a lone object is only wrapped into a sequence by the browser
/// renderer, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Many(Vec<Record>),
    One(Record),
}

impl Dataset {
    /// Uniform view over the records regardless of source shape.
    pub fn records(&self) -> &[Record] {
        match self {
            Dataset::Many(records) => records,
            Dataset::One(record) => std::slice::from_ref(record),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// First record in load order whose `Run` field is exactly `id`.
    ///
    /// Only JSON string values participate; a numeric `Run` never matches.
    pub fn find_by_run(&self, id: &str) -> Option<&Record> {
        self.records()
            .iter()
            .find(|record| record.get("Run").and_then(Value::as_str) == Some(id))
    }
}

fn read_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve and load the process-wide dataset.
///
/// A configured real-data path is tried first; any failure there (missing,
/// unreadable, unparsable) falls back to the bundled public file instead of
/// aborting startup. The bundled file failing to load is fatal and bubbles
/// up to the caller.
pub fn load_dataset(
    real_path: Option<&Path>,
    public_path: &Path,
) -> Result<(Dataset, DataSource), DatasetError> {
    if let Some(path) = real_path {
        match read_dataset(path) {
            Ok(dataset) => {
                log::info!(
                    "Serving real dataset from {} ({} records)",
                    path.display(),
                    dataset.len()
                );
                return Ok((dataset, DataSource::Real));
            }
            Err(err) => {
                log::error!(
                    "Real dataset at {} failed to load: {}. Falling back to the bundled public dataset.",
                    path.display(),
                    err
                );
            }
        }
    }

    let dataset = read_dataset(public_path)?;
    let source = if real_path.is_some() {
        log::warn!(
            "Serving bundled public dataset from {} ({} records) after fallback",
            public_path.display(),
            dataset.len()
        );
        DataSource::Fallback
    } else {
        log::info!(
            "Serving bundled public dataset from {} ({} records)",
            public_path.display(),
            dataset.len()
        );
        DataSource::PublicDefault
    };
    Ok((dataset, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn dataset_from(value: serde_json::Value) -> Dataset {
        serde_json::from_value(value).expect("test dataset literal must parse")
    }

    #[test]
    fn test_array_source_parses_to_many() {
        let dataset = dataset_from(serde_json::json!([
            {"Run": "SRR001", "Organism": "mouse"},
            {"Run": "SRR002", "Organism": "rat"}
        ]));

        assert_eq!(dataset.len(), 2);
        assert!(matches!(dataset, Dataset::Many(_)));
    }

    #[test]
    fn test_single_object_source_parses_to_one() {
        let dataset = dataset_from(serde_json::json!({"Run": "SRR010", "sex": "female"}));

        assert_eq!(dataset.len(), 1);
        assert!(matches!(dataset, Dataset::One(_)));
        assert_eq!(dataset.records()[0].get("sex"), Some(&Value::from("female")));
    }

    #[test]
    fn test_find_by_run_returns_first_match_in_load_order() {
        // Two records share a Run value; load order decides the winner.
        let dataset = dataset_from(serde_json::json!([
            {"Run": "SRR001", "Organism": "mouse"},
            {"Run": "SRR001", "Organism": "rat"}
        ]));

        let found = dataset.find_by_run("SRR001").expect("expected a match");
        assert_eq!(found.get("Organism"), Some(&Value::from("mouse")));
    }

    #[test]
    fn test_find_by_run_is_exact_and_never_coerces() {
        let dataset = dataset_from(serde_json::json!([
            {"Run": 12345, "Organism": "mouse"},
            {"Run": "srr001", "Organism": "rat"}
        ]));

        // Numeric Run values never match a path id.
        assert!(dataset.find_by_run("12345").is_none());
        // Matching is case-sensitive.
        assert!(dataset.find_by_run("SRR001").is_none());
        assert!(dataset.find_by_run("srr001").is_some());
    }

    #[test]
    fn test_real_path_is_preferred_when_it_loads() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let real = dir.path().join("real.json");
        let public = dir.path().join("public.json");
        fs::write(&real, r#"[{"Run":"SRR-REAL"}]"#).expect("write real file");
        fs::write(&public, r#"[{"Run":"SRR-PUBLIC"}]"#).expect("write public file");

        let (dataset, source) =
            load_dataset(Some(real.as_path()), &public).expect("load should succeed");

        assert_eq!(source, DataSource::Real);
        assert!(dataset.find_by_run("SRR-REAL").is_some());
    }

    #[test]
    fn test_missing_real_path_falls_back_to_public() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let real = dir.path().join("does-not-exist.json");
        let public = dir.path().join("public.json");
        fs::write(&public, r#"[{"Run":"SRR-PUBLIC"}]"#).expect("write public file");

        let (dataset, source) =
            load_dataset(Some(real.as_path()), &public).expect("fallback should succeed");

        assert_eq!(source, DataSource::Fallback);
        assert!(dataset.find_by_run("SRR-PUBLIC").is_some());
    }

    #[test]
    fn test_unparsable_real_path_falls_back_to_public() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let real = dir.path().join("real.json");
        let public = dir.path().join("public.json");
        fs::write(&real, "this is not json").expect("write real file");
        fs::write(&public, r#"{"Run":"SRR-PUBLIC"}"#).expect("write public file");

        let (dataset, source) =
            load_dataset(Some(real.as_path()), &public).expect("fallback should succeed");

        assert_eq!(source, DataSource::Fallback);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_absent_real_path_uses_public_default() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let public = dir.path().join("public.json");
        fs::write(&public, r#"[{"Run":"SRR-PUBLIC"}]"#).expect("write public file");

        let (_, source) = load_dataset(None, &public).expect("load should succeed");

        assert_eq!(source, DataSource::PublicDefault);
    }

    #[test]
    fn test_missing_public_dataset_is_fatal() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let public = dir.path().join("missing.json");

        let result = load_dataset(None, &public);

        assert!(matches!(result, Err(DatasetError::Read { .. })));
    }
}
