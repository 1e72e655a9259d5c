//! JSON file dataset store.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use sfi::{DatasetEntry, SfiVector, ShipmentRecord};
use tempfile::NamedTempFile;

use crate::{DatasetStore, Result, StoreError};

/// Stores the dataset as a pretty-printed JSON array in one file.
///
/// Saves go to a temporary file in the same directory that is then renamed
/// over the target, so a reader never observes a partially written dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DatasetStore for JsonFileStore {
    fn load(&self) -> Result<Vec<DatasetEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(path = %self.path.display(), "shipments file not found");
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let document: Value = serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let Value::Array(elements) = document else {
            return Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: "expected a JSON array of records".to_string(),
            });
        };

        let entries: Vec<DatasetEntry> = elements.iter().map(parse_entry).collect();
        tracing::debug!(path = %self.path.display(), records = entries.len(), "dataset loaded");
        Ok(entries)
    }

    fn save(&self, records: &[ShipmentRecord]) -> Result<()> {
        let dir = self.parent_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::info!(path = %self.path.display(), records = records.len(), "dataset saved");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Turns one array element into an entry without failing the whole load.
fn parse_entry(element: &Value) -> DatasetEntry {
    let Value::Object(fields) = element else {
        return DatasetEntry::Malformed {
            id: None,
            reason: "record is not a JSON object".to_string(),
        };
    };

    let id = fields.get("id").and_then(Value::as_str).map(str::to_string);

    let vector = match fields.get("sfi_vector") {
        None | Some(Value::Null) => Err("missing sfi_vector".to_string()),
        Some(raw) => SfiVector::deserialize(raw).map_err(|e| e.to_string()),
    };

    match (id, vector) {
        (Some(id), Ok(sfi_vector)) => DatasetEntry::Valid(ShipmentRecord { id, sfi_vector }),
        (None, Ok(_)) => DatasetEntry::Malformed {
            id: None,
            reason: "missing id".to_string(),
        },
        (id, Err(reason)) => DatasetEntry::Malformed { id, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    fn record(id: &str, vector: &str) -> ShipmentRecord {
        ShipmentRecord::new(id, vector.parse().unwrap())
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("shipments.json"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn save_then_load_preserves_order_and_precision() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("shipments.json"));
        let big = "340282366920938463463374607431768211457";
        let records = vec![record("SHP10000000", "2689622"), record("SHP10000001", big)];

        store.save(&records).unwrap();
        assert!(store.exists());

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains(&format!("\"sfi_vector\": \"{big}\"")));

        let loaded = store.load().unwrap();
        let loaded: Vec<ShipmentRecord> = loaded
            .into_iter()
            .map(|e| e.as_record().cloned().unwrap())
            .collect();
        assert_eq!(loaded, records);
    }

    #[test]
    fn save_overwrites_previous_dataset() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/out/shipments.json"));
        store.save(&[record("a", "6"), record("b", "10")]).unwrap();
        store.save(&[record("c", "14")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), Some("c"));
        let leftovers = fs::read_dir(store.parent_dir()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary files left behind");
    }

    #[test]
    fn reads_legacy_integer_vectors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shipments.json");
        fs::write(&path, r#"[{"id": "SHP12345000", "sfi_vector": 2689622}]"#).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(
            loaded,
            vec![DatasetEntry::Valid(record("SHP12345000", "2689622"))]
        );
    }

    #[test]
    fn legacy_integers_past_u64_are_malformed_with_reason() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shipments.json");
        fs::write(
            &path,
            r#"[{"id": "SHP12345000", "sfi_vector": 18446744073709551616}]"#,
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        match &loaded[0] {
            DatasetEntry::Malformed { id, reason } => {
                assert_eq!(id.as_deref(), Some("SHP12345000"));
                assert!(reason.contains("exceeds 64 bits"), "{reason}");
            }
            other => panic!("expected a malformed entry, got {other:?}"),
        }
    }

    #[test_case(r#"{"id": "x"}"#, Some("x"); "missing vector")]
    #[test_case(r#"{"id": "x", "sfi_vector": null}"#, Some("x"); "null vector")]
    #[test_case(r#"{"id": "x", "sfi_vector": 2.5}"#, Some("x"); "float vector")]
    #[test_case(r#"{"id": "x", "sfi_vector": "abc"}"#, Some("x"); "text vector")]
    #[test_case(r#"{"id": "x", "sfi_vector": 0}"#, Some("x"); "zero vector")]
    #[test_case(r#"{"id": "x", "sfi_vector": -6}"#, Some("x"); "negative vector")]
    #[test_case(r#"{"sfi_vector": "6"}"#, None; "missing id")]
    #[test_case(r#"[1, 2]"#, None; "not an object")]
    fn malformed_elements_do_not_fail_the_load(element: &str, expected_id: Option<&str>) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shipments.json");
        fs::write(&path, format!(r#"[{element}, {{"id": "ok", "sfi_vector": "6"}}]"#)).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(matches!(&loaded[0], DatasetEntry::Malformed { .. }));
        assert_eq!(loaded[0].id(), expected_id);
        assert_eq!(loaded[1].id(), Some("ok"));
    }

    #[test_case("not json"; "garbage")]
    #[test_case(r#"{"id": "x"}"#; "top-level object")]
    fn corrupt_documents_fail(contents: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shipments.json");
        fs::write(&path, contents).unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
