//! Persistence boundary for documents.
//!
//! The composition engine never touches storage itself. Callers keep the
//! data object and its last rendered document under a numeric id through a
//! [`DocumentStore`].

use crate::error::{Error, Result};
use crate::model::{DocumentType, RenderedDocument};
use crate::render::{compose_document, ComposeOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A document as persisted: its type, the data it was composed from and
/// the rendered result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    /// Type of the document
    pub document_type: DocumentType,

    /// Data object supplied by the user
    pub data: Value,

    /// Last successful render of `data`
    pub rendered: RenderedDocument,

    /// Time the record was last written
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Create a record stamped with the current time.
    pub fn new(data: Value, rendered: RenderedDocument) -> Self {
        Self {
            document_type: rendered.document_type,
            data,
            rendered,
            updated_at: Utc::now(),
        }
    }

    /// Compose `data` and wrap the result in a record.
    pub fn compose(
        document_type: DocumentType,
        data: Value,
        options: &ComposeOptions,
    ) -> Result<Self> {
        let rendered = compose_document(document_type, &data, options)?;
        Ok(Self::new(data, rendered))
    }
}

/// Key-value persistence of documents by numeric id.
pub trait DocumentStore: Send {
    /// Fetch a record. A missing id is `Ok(None)`.
    fn get(&self, id: u64) -> Result<Option<StoredDocument>>;

    /// Insert or replace a record.
    fn set(&mut self, id: u64, record: StoredDocument) -> Result<()>;

    /// Remove a record, returning it if it existed.
    fn remove(&mut self, id: u64) -> Result<Option<StoredDocument>>;

    /// All stored ids in ascending order.
    fn ids(&self) -> Result<Vec<u64>>;

    /// Check whether an id is stored.
    fn contains(&self, id: u64) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<u64, StoredDocument>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: u64) -> Result<Option<StoredDocument>> {
        Ok(self.records.get(&id).cloned())
    }

    fn set(&mut self, id: u64, record: StoredDocument) -> Result<()> {
        self.records.insert(id, record);
        Ok(())
    }

    fn remove(&mut self, id: u64) -> Result<Option<StoredDocument>> {
        Ok(self.records.remove(&id))
    }

    fn ids(&self) -> Result<Vec<u64>> {
        let mut ids: Vec<u64> = self.records.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

/// Directory-backed store holding one pretty-printed JSON file per id.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        log::debug!("Opened document store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `id`.
    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn temp_path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", id))
    }

    fn decode(path: &Path, content: &str) -> Result<StoredDocument> {
        serde_json::from_str(content).map_err(|e| {
            Error::Store(format!("corrupt record {}: {}", path.display(), e))
        })
    }

    fn id_from_path(path: &Path) -> Option<u64> {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return None;
        }
        path.file_stem()?.to_str()?.parse().ok()
    }
}

impl DocumentStore for JsonFileStore {
    fn get(&self, id: u64) -> Result<Option<StoredDocument>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Self::decode(&path, &content).map(Some)
    }

    fn set(&mut self, id: u64, record: StoredDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(&record)?;
        // Write then rename so a reader never sees a half-written record.
        let temp = self.temp_path_for(id);
        fs::write(&temp, json)?;
        fs::rename(&temp, self.path_for(id))?;
        log::debug!("Stored document {} ({})", id, record.document_type);
        Ok(())
    }

    fn remove(&mut self, id: u64) -> Result<Option<StoredDocument>> {
        let existing = self.get(id)?;
        if existing.is_some() {
            fs::remove_file(self.path_for(id))?;
        }
        Ok(existing)
    }

    fn ids(&self) -> Result<Vec<u64>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            if let Some(id) = Self::id_from_path(&entry?.path()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(feature = "async")]
impl JsonFileStore {
    /// Async version of [`DocumentStore::get`].
    pub async fn get_async(&self, id: u64) -> Result<Option<StoredDocument>> {
        let path = self.path_for(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Self::decode(&path, &content).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Async version of [`DocumentStore::set`].
    pub async fn set_async(&self, id: u64, record: &StoredDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        let temp = self.temp_path_for(id);
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, self.path_for(id)).await?;
        Ok(())
    }

    /// Async version of [`DocumentStore::remove`].
    pub async fn remove_async(&self, id: u64) -> Result<Option<StoredDocument>> {
        let existing = self.get_async(id).await?;
        if existing.is_some() {
            tokio::fs::remove_file(self.path_for(id)).await?;
        }
        Ok(existing)
    }
}
