//! Image OCR extraction.

mod tesseract;

use std::future::Future;
use std::path::Path;

pub use tesseract::{TesseractEngine, paragraphs_from_tsv};

use crate::error::Result;
use crate::output::{TEXT_EXTENSION, file_name, sibling_output};
use crate::types::{DocumentKind, ImageSummary};
use crate::{Extractor, ensure_exists};

pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// Recognizes text in an image and returns it grouped into paragraphs.
pub trait OcrEngine: Send + Sync {
    fn recognize(
        &self,
        image: &Path,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

#[derive(Debug)]
pub struct ImageExtractor<E> {
    engine: E,
    sample_limit: usize,
}

impl<E: OcrEngine> ImageExtractor<E> {
    #[must_use]
    pub fn new(engine: E, sample_limit: usize) -> Self {
        Self {
            engine,
            sample_limit,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: OcrEngine> Extractor for ImageExtractor<E> {
    type Summary = ImageSummary;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Image
    }

    async fn extract(&self, path: &Path) -> Result<ImageSummary> {
        ensure_exists(self.kind(), path)?;
        tracing::info!(file = %file_name(path), "reading PNG");

        let paragraphs = self.engine.recognize(path).await?;
        tracing::debug!(paragraphs = paragraphs.len(), "OCR finished");

        let output_path = sibling_output(path, TEXT_EXTENSION);
        tokio::fs::write(&output_path, paragraphs.join("\n")).await?;

        tracing::info!(output = %output_path.display(), "PNG text exported");
        Ok(ImageSummary {
            lines: paragraphs.len(),
            sample: paragraphs.iter().take(self.sample_limit).cloned().collect(),
            output: file_name(&output_path),
        })
    }
}
