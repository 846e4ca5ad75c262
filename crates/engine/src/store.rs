//! Flat-file storage of the whole [`Document`].
//!
//! The document is always read and written in full. Writes go to a sibling
//! `.tmp` file which is then renamed over the original, so a reader never sees
//! a half-written document.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{EngineError, ResultEngine, record::Record};

/// The persisted state: every record plus the last id ever handed out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub last_id: u64,
    pub expenses: Vec<Record>,
}

/// On-disk shapes accepted by [`Store::load`].
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Current(Document),
    /// Bare array of records, as written by older versions.
    Legacy(Vec<Record>),
}

impl From<StoredDocument> for Document {
    fn from(value: StoredDocument) -> Self {
        let mut document = match value {
            StoredDocument::Current(document) => document,
            StoredDocument::Legacy(expenses) => Document {
                last_id: 0,
                expenses,
            },
        };
        let max_id = document.expenses.iter().map(|r| r.id).max().unwrap_or(0);
        document.last_id = document.last_id.max(max_id);
        document
    }
}

impl Document {
    pub fn parse(raw: &str) -> ResultEngine<Self> {
        let stored: StoredDocument =
            serde_json::from_str(raw).map_err(|e| EngineError::StoreRead(e.to_string()))?;
        Ok(stored.into())
    }
}

/// Access to the backing document file.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole document. A missing file is an error.
    pub async fn load(&self) -> ResultEngine<Document> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| EngineError::StoreRead(format!("{}: {e}", self.path.display())))?;
        Document::parse(&raw)
    }

    /// Replaces the whole document on disk.
    pub async fn save(&self, document: &Document) -> ResultEngine<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| EngineError::StoreWrite(e.to_string()))?;
        write_atomic(&self.path, json)
            .await
            .map_err(|e| EngineError::StoreWrite(format!("{}: {e}", self.path.display())))
    }

    /// Writes an empty document if the file does not exist yet.
    ///
    /// Returns `true` when a file was created.
    pub async fn ensure_exists(&self) -> ResultEngine<bool> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| EngineError::StoreRead(format!("{}: {e}", self.path.display())))?;
        if exists {
            return Ok(false);
        }
        self.save(&Document::default()).await?;
        Ok(true)
    }
}

async fn write_atomic(path: &Path, contents: String) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).await?;
    match fs::rename(&tmp, path).await {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path).await?;
            let _ = fs::remove_file(&tmp).await;
            Ok(())
        }
    }
}
