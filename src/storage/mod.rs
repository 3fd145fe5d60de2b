// src/storage/mod.rs
use crate::retriever::ProspectusLog;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// File sink for downloaded prospectus documents and the batch result log.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager rooted at `base_dir`, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    /// Appends `extension` unless `file_name` already carries it.
    fn normalize_file_name(file_name: &str, extension: &str) -> String {
        if file_name.ends_with(extension) {
            file_name.to_string()
        } else {
            format!("{file_name}{extension}")
        }
    }

    /// Writes the downloaded document bytes under the base directory,
    /// normalizing the filename extension first. Returns the path written.
    pub fn save_document(
        &self,
        file_name: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let file_name = Self::normalize_file_name(file_name, extension);
        let file_path = self.base_dir.join(file_name);

        fs::write(&file_path, bytes).map_err(StorageError::IoError)?;

        tracing::info!("Saved document to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves the batch result log in JSON format next to the documents.
    pub fn save_batch_log(
        &self,
        file_name: &str,
        logs: &[ProspectusLog],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let payload = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "results": logs,
        });

        let payload_str = serde_json::to_string_pretty(&payload)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, payload_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved batch log to {}", file_path.display());

        Ok(file_path)
    }
}
