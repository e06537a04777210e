use serde::Serialize;

use crate::source::SourceEvent;

/// Field set stored for one file in the search domain.
///
/// `directory` keeps its trailing slash so that `directory + file_name`
/// reconstructs the normalized path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDocument {
    #[serde(rename = "dir")]
    pub directory: String,
    #[serde(rename = "name")]
    pub file_name: String,
    #[serde(rename = "ext")]
    pub file_extension: String,
}

impl SearchDocument {
    /// Derives the document fields from a file path. Back-slashes are
    /// normalized to forward-slashes first, so records produced on
    /// either path convention split the same way.
    pub fn from_path(path: &str) -> Self {
        let normalized = path.replace('\\', "/");

        let (directory, file_name) = match normalized.rfind('/') {
            Some(pos) => (
                normalized[..=pos].to_string(),
                normalized[pos + 1..].to_string(),
            ),
            None => (String::new(), normalized),
        };

        let file_extension = match file_name.rfind('.') {
            Some(pos) => file_name[pos + 1..].to_string(),
            None => String::new(),
        };

        Self {
            directory,
            file_name,
            file_extension,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
}

/// One item of the batch submitted to the document upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentUploadRequest {
    #[serde(rename = "type")]
    pub operation: Operation,
    pub id: String,
    pub fields: SearchDocument,
}

impl DocumentUploadRequest {
    /// An add request overwrites any document already stored under the
    /// same id. There is no delete or update path.
    pub fn add(event: &SourceEvent) -> Self {
        Self {
            operation: Operation::Add,
            id: event.id.to_string(),
            fields: SearchDocument::from_path(&event.file_path),
        }
    }
}
