//! Per-page PDF text extraction with keyword highlights.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::output::{TEXT_EXTENSION, file_name, sibling_output};
use crate::types::{DocumentKind, PdfSummary};
use crate::{Extractor, ensure_exists};

pub const DEFAULT_KEYWORDS: [&str; 5] = ["objective", "goal", "feature", "phase", "workflow"];
pub const DEFAULT_HIGHLIGHT_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct PdfExtractor {
    /// Stored lowercased.
    keywords: Vec<String>,
    highlight_limit: usize,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS, DEFAULT_HIGHLIGHT_LIMIT)
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new<I, S>(keywords: I, highlight_limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            highlight_limit,
        }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Extractor for PdfExtractor {
    type Summary = PdfSummary;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    async fn extract(&self, path: &Path) -> Result<PdfSummary> {
        ensure_exists(self.kind(), path)?;
        tracing::info!(file = %file_name(path), "reading PDF");

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(bytes = bytes.len(), "PDF loaded");
        let pages = tokio::task::spawn_blocking(move || extract_pages(&bytes)).await??;

        let output_path = sibling_output(path, TEXT_EXTENSION);
        tokio::fs::write(&output_path, render_pages(&pages)).await?;

        let mut highlights = collect_highlights(pages.iter().map(String::as_str), &self.keywords);
        tracing::debug!(
            pages = pages.len(),
            highlights = highlights.len(),
            "PDF scanned"
        );
        highlights.truncate(self.highlight_limit);

        tracing::info!(output = %output_path.display(), "PDF text exported");
        Ok(PdfSummary {
            pages: pages.len(),
            highlights,
            output: file_name(&output_path),
        })
    }
}

/// Run pdf-extract page by page. Malformed fonts can make it panic, so the
/// panic is turned into an error here.
fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    })) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(_) => Err(ExtractError::Pdf(
            "extraction panicked, likely a malformed font".to_owned(),
        )),
    }
}

/// Render pages as `=== Page n ===` sections, numbered from 1.
#[must_use]
pub fn render_pages(pages: &[String]) -> String {
    let mut out = String::new();
    for (index, text) in pages.iter().enumerate() {
        let _ = write!(out, "=== Page {} ===\n{text}\n\n", index + 1);
    }
    out
}

/// Trimmed, non-empty lines that contain any of `keywords` (already lowercased).
///
/// The result is not capped; callers truncate for the summary.
#[must_use]
pub fn collect_highlights<'a, I>(pages: I, keywords: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    pages
        .into_iter()
        .flat_map(split_lines)
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_highlight(line, keywords))
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn is_highlight(line: &str, keywords: &[String]) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

/// Split on every universal line boundary, not just `\n`. PDF text often
/// carries bare `\r` and form feeds.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| {
        matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        )
    })
}
