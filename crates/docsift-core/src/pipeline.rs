//! Runs the three extractors in a fixed order and writes the summary.
//!
//! The first failure aborts the run: later extractors are not started and no
//! summary is written. Outputs already produced by earlier extractors stay on
//! disk.

use std::path::PathBuf;

use docsift_extract::output::write_json;
use docsift_extract::{
    DocumentKind, ExtractError, Extractor, ImageExtractor, ImageSummary, OcrEngine,
    PdfExtractor, PdfSummary, SheetExtractor, WorkbookSummary,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, DocumentsConfig};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Contents of `extraction_summary.json`, keyed by document tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub pdf: PdfSummary,
    pub png: ImageSummary,
    pub xlsx: WorkbookSummary,
}

pub struct Pipeline<E> {
    documents: DocumentsConfig,
    pdf: PdfExtractor,
    image: ImageExtractor<E>,
    sheet: SheetExtractor,
}

impl<E: OcrEngine> Pipeline<E> {
    #[must_use]
    pub fn new(config: &Config, engine: E) -> Self {
        Self {
            documents: config.documents.clone(),
            pdf: PdfExtractor::new(&config.pdf.keywords, config.limits.highlights),
            image: ImageExtractor::new(engine, config.limits.ocr_sample),
            sheet: SheetExtractor::new(config.limits.rows_per_sheet),
        }
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.documents.summary_path()
    }

    /// Extract PDF, then image, then workbook, then write the summary.
    ///
    /// # Errors
    ///
    /// Returns the first extractor or write failure; nothing after it runs.
    pub async fn run(&self) -> Result<ExtractionSummary, PipelineError> {
        let pdf = self
            .pdf
            .extract(self.documents.document(DocumentKind::Pdf).path())
            .await?;
        let png = self
            .image
            .extract(self.documents.document(DocumentKind::Image).path())
            .await?;
        let xlsx = self
            .sheet
            .extract(self.documents.document(DocumentKind::Spreadsheet).path())
            .await?;

        let summary = ExtractionSummary { pdf, png, xlsx };
        let summary_path = self.summary_path();
        write_json(&summary_path, &summary).await?;
        tracing::info!(path = %summary_path.display(), "summary written");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use docsift_extract::fixtures::{FixedOcr, PNG_STUB, write_pdf, write_xlsx};

    use super::*;

    fn config_for(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.documents.dir = dir.to_path_buf();
        config.documents.pdf = "guide.pdf".into();
        config.documents.image = "table.png".into();
        config.documents.spreadsheet = "apis.xlsx".into();
        config
    }

    fn seed(dir: &std::path::Path) {
        write_pdf(&dir.join("guide.pdf"), &[&["Goal: ABHA"], &["plain"]]).unwrap();
        std::fs::write(dir.join("table.png"), PNG_STUB).unwrap();
        write_xlsx(&dir.join("apis.xlsx"), &[("APIs", vec![vec!["Name", "Path"]])]).unwrap();
    }

    #[tokio::test]
    async fn summary_serializes_tags_in_order() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let pipeline = Pipeline::new(&config_for(dir.path()), FixedOcr::new(["row"]));

        pipeline.run().await.unwrap();

        let text = std::fs::read_to_string(pipeline.summary_path()).unwrap();
        let pdf_at = text.find("\"pdf\"").unwrap();
        let png_at = text.find("\"png\"").unwrap();
        let xlsx_at = text.find("\"xlsx\"").unwrap();
        assert!(pdf_at < png_at && png_at < xlsx_at);
    }

    #[tokio::test]
    async fn missing_workbook_writes_no_summary() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        std::fs::remove_file(dir.path().join("apis.xlsx")).unwrap();
        let pipeline = Pipeline::new(&config_for(dir.path()), FixedOcr::new(["row"]));

        let err = pipeline.run().await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Extract(ExtractError::MissingInput {
                kind: DocumentKind::Spreadsheet,
                ..
            })
        ));
        assert!(dir.path().join("guide.extracted.txt").exists());
        assert!(dir.path().join("table.extracted.txt").exists());
        assert!(!pipeline.summary_path().exists());
    }

    #[tokio::test]
    async fn limits_from_config_reach_extractors() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let mut config = config_for(dir.path());
        config.limits.ocr_sample = 2;

        let summary = Pipeline::new(&config, FixedOcr::new(["a", "b", "c"]))
            .run()
            .await
            .unwrap();

        assert_eq!(summary.png.lines, 3);
        assert_eq!(summary.png.sample, ["a", "b"]);
    }
}
