use serde::{Deserialize, Serialize};

/// Backend list payloads come either wrapped as `{"data": [...]}` or bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Envelope { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Payload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Payload::Envelope { data } => data,
            Payload::Bare(items) => items,
        }
    }
}

/// Where a batch of records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// JSON payload saved from (or returned by) the backend
    Json,
    /// CSV written by the export command
    ExportCsv,
    /// Live REST backend
    Remote,
}

impl SourceKind {
    /// Guess the source of a local file from its extension.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceKind::ExportCsv,
            _ => SourceKind::Json,
        }
    }
}
