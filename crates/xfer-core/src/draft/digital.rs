use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::ids::VocabId;

/// One uploaded file as recorded by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Digital transfer metadata plus the uploaded-file ledger.
///
/// The ledger fields are private: `total_size_bytes` always equals the sum of
/// the sizes in `uploaded_files`, and only [`add_file`](Self::add_file) and
/// [`remove_file`](Self::remove_file) may touch either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalTransferInfo {
    pub description: String,
    pub date_range: String,
    pub selected_types: BTreeSet<VocabId>,
    uploaded_files: Vec<FileRef>,
    total_size_bytes: u64,
}

impl DigitalTransferInfo {
    pub fn uploaded_files(&self) -> &[FileRef] {
        &self.uploaded_files
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }

    pub fn add_file(&mut self, file: FileRef) -> Result<(), ValidationError> {
        if self.uploaded_files.iter().any(|f| f.name == file.name) {
            return Err(ValidationError::DuplicateFile(file.name));
        }
        self.total_size_bytes += file.size;
        debug!(file = %file.name, size = file.size, total = self.total_size_bytes, "file added to ledger");
        self.uploaded_files.push(file);
        Ok(())
    }

    /// Remove by name. The recorded size is subtracted, not a caller-supplied one.
    pub fn remove_file(&mut self, name: &str) -> Result<FileRef, ValidationError> {
        let index = self
            .uploaded_files
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| ValidationError::UnknownFile(name.to_string()))?;
        let removed = self.uploaded_files.remove(index);
        self.total_size_bytes -= removed.size;
        debug!(file = %removed.name, total = self.total_size_bytes, "file removed from ledger");
        Ok(removed)
    }
}
