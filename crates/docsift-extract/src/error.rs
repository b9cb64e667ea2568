use std::path::PathBuf;

use crate::types::DocumentKind;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The source document was not found where the configuration points.
    #[error("missing {kind} at {}", path.display())]
    MissingInput { kind: DocumentKind, path: PathBuf },

    /// A required external tool is not installed.
    #[error("{0}")]
    MissingDependency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
