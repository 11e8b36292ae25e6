use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::document::TrackingDocument;
use crate::error::Result;
use crate::{io, paths};

/// Whole-document persistence. Callers read, mutate, and write back.
pub trait DocumentStore {
    fn load(&self) -> Result<TrackingDocument>;
    fn save(&self, doc: &TrackingDocument) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Pretty-printed JSON at `<root>/.architect/tracking.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: paths::tracking_path(root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<TrackingDocument> {
        if !self.path.exists() {
            return Ok(TrackingDocument::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, doc: &TrackingDocument) -> Result<()> {
        let data = serde_json::to_string_pretty(doc)?;
        io::atomic_write(&self.path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Mutex<TrackingDocument>,
}

impl MemoryStore {
    pub fn new(doc: TrackingDocument) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<TrackingDocument> {
        let guard = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, doc: &TrackingDocument) -> Result<()> {
        let mut guard = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        *guard = doc.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backlog::BacklogItem;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), TrackingDocument::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let mut doc = TrackingDocument::default();
        doc.backlog.push(BacklogItem::new("Orders list", "3.1"));
        store.save(&doc).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"project\""), "expected pretty JSON");
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        io::atomic_write(store.path(), b"{not json").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::default();
        let mut doc = store.load().unwrap();
        doc.project = "Other".into();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap().project, "Other");
    }

    #[test]
    fn portuguese_tree_survives_first_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let raw = r#"{
  "project": "INDUSALES v5.0",
  "backlog": [],
  "fases": {},
  "estrutura": [
    {"id": "1", "titulo": "Meu plano", "concluido": false, "expandido": true,
     "filhos": [{"id": "1.1", "titulo": "Login", "concluido": true, "filhos": []}]}
  ]
}"#;
        io::atomic_write(store.path(), raw.as_bytes()).unwrap();

        let forest = crate::tree::load_forest(&store).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "Meu plano");
        assert!(forest[0].children[0].done);

        let mut doc = store.load().unwrap();
        doc.project = "Renamed".into();
        store.save(&doc).unwrap();
        let reloaded = crate::tree::load_forest(&store).unwrap();
        assert_eq!(reloaded[0].title, "Meu plano");
        let on_disk = std::fs::read_to_string(store.path()).unwrap();
        assert!(on_disk.contains("\"tree\""));
    }
}
