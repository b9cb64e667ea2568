//! Text extraction for PDF, image and spreadsheet documents.
//!
//! Each extractor reads one source file, writes its content to a sibling
//! `*.extracted.*` file and returns a small serializable summary.

pub mod error;
#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod ocr;
pub mod output;
pub mod pdf;
pub mod sheet;
pub mod types;

use std::future::Future;
use std::path::Path;

pub use error::ExtractError;
pub use ocr::{ImageExtractor, OcrEngine, TesseractEngine};
pub use pdf::PdfExtractor;
pub use sheet::SheetExtractor;
pub use types::{
    DocumentKind, DocumentRef, ImageSummary, PdfSummary, SheetRows, WorkbookSummary,
};

pub trait Extractor: Send + Sync {
    type Summary: serde::Serialize + Send;

    fn kind(&self) -> DocumentKind;

    /// Extract `path`, write the sibling output file and return the summary.
    fn extract(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Self::Summary, ExtractError>> + Send;
}

/// Fail with [`ExtractError::MissingInput`] unless `path` exists.
///
/// # Errors
///
/// Returns `MissingInput` carrying the exact path that was checked.
pub fn ensure_exists(kind: DocumentKind, path: &Path) -> Result<(), ExtractError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ExtractError::MissingInput {
            kind,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_exists_reports_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("M1 Full guide.pdf");

        let err = ensure_exists(DocumentKind::Pdf, &missing).unwrap_err();
        match &err {
            ExtractError::MissingInput { kind, path } => {
                assert_eq!(*kind, DocumentKind::Pdf);
                assert_eq!(path, &missing);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            format!("missing PDF at {}", missing.display())
        );
    }

    #[test]
    fn ensure_exists_accepts_present_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Table.png");
        std::fs::write(&file, b"png").unwrap();
        assert!(ensure_exists(DocumentKind::Image, &file).is_ok());
    }
}
