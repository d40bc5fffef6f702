//! Download Artifact Module
//! Encodes a table as CSV bytes and a named link that carries them.

use base64::{engine::general_purpose, Engine as _};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// CSV bytes plus the file name they should be retrieved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    /// Comma-separated with a header row and no index column.
    pub fn csv(df: &DataFrame, file_name: &str) -> Result<Self, ExportError> {
        let mut bytes = Vec::new();
        let mut df = df.clone();
        CsvWriter::new(&mut bytes)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        info!(file_name, bytes = bytes.len(), rows = df.height(), "Built CSV artifact");
        Ok(Self {
            file_name: file_name.to_string(),
            bytes,
        })
    }

    /// `data:` URI holding the base64 encoded bytes.
    pub fn href(&self) -> String {
        format!(
            "data:file/csv;base64,{}",
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Anchor that downloads the bytes under `file_name`.
    pub fn html_link(&self, label: &str) -> String {
        format!(
            r#"<a href="{}" download="{}">{}</a>"#,
            self.href(),
            self.file_name,
            label
        )
    }

    /// Write the bytes to a user-chosen location.
    pub fn save_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.bytes).map_err(|source| ExportError::WriteError {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Saved {}", self.file_name);
        Ok(())
    }
}
