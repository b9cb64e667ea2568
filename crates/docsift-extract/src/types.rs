use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The three document types docsift knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
    Spreadsheet,
}

impl DocumentKind {
    /// Human-facing label used in console output and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Image => "PNG",
            Self::Spreadsheet => "XLSX",
        }
    }

    /// Key under which this kind's summary is stored in `extraction_summary.json`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "png",
            Self::Spreadsheet => "xlsx",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub path: PathBuf,
}

impl DocumentRef {
    #[must_use]
    pub fn new(kind: DocumentKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfSummary {
    pub pages: usize,
    pub highlights: Vec<String>,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    /// Number of recognized paragraphs.
    pub lines: usize,
    pub sample: Vec<String>,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSummary {
    pub sheets: Vec<String>,
    pub output: String,
}

/// Captured rows per worksheet, in workbook order.
pub type SheetRows = IndexMap<String, Vec<Vec<String>>>;
