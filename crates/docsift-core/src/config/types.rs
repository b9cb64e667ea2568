use std::path::PathBuf;

use docsift_extract::ocr::DEFAULT_SAMPLE_LIMIT;
use docsift_extract::pdf::{DEFAULT_HIGHLIGHT_LIMIT, DEFAULT_KEYWORDS};
use docsift_extract::sheet::DEFAULT_ROW_LIMIT;
use docsift_extract::{DocumentKind, DocumentRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("M1 Complete guide and goal to achieve")
}

fn default_pdf_name() -> String {
    "M1 Full guide.pdf".into()
}

fn default_image_name() -> String {
    "Table.png".into()
}

fn default_spreadsheet_name() -> String {
    "Copy_of_M1_ABHA_CREATION_AND_VERIFICATION_WITH_APIS_UPDATED_V1_2_7_Aug_1_58de4446bc.xlsx"
        .into()
}

fn default_summary_name() -> String {
    "extraction_summary.json".into()
}

/// Where the three source documents live. File names are relative to `dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_documents_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_pdf_name")]
    pub pdf: String,
    #[serde(default = "default_image_name")]
    pub image: String,
    #[serde(default = "default_spreadsheet_name")]
    pub spreadsheet: String,
    #[serde(default = "default_summary_name")]
    pub summary: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            dir: default_documents_dir(),
            pdf: default_pdf_name(),
            image: default_image_name(),
            spreadsheet: default_spreadsheet_name(),
            summary: default_summary_name(),
        }
    }
}

impl DocumentsConfig {
    #[must_use]
    pub fn document(&self, kind: DocumentKind) -> DocumentRef {
        let name = match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Image => &self.image,
            DocumentKind::Spreadsheet => &self.spreadsheet,
        };
        DocumentRef::new(kind, self.dir.join(name))
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(&self.summary)
    }
}

fn default_highlights() -> usize {
    DEFAULT_HIGHLIGHT_LIMIT
}

fn default_rows_per_sheet() -> usize {
    DEFAULT_ROW_LIMIT
}

fn default_ocr_sample() -> usize {
    DEFAULT_SAMPLE_LIMIT
}

/// Caps on what goes into the summaries. Output files are never capped,
/// except the workbook preview which holds `rows_per_sheet` rows per sheet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_highlights")]
    pub highlights: usize,
    #[serde(default = "default_rows_per_sheet")]
    pub rows_per_sheet: usize,
    #[serde(default = "default_ocr_sample")]
    pub ocr_sample: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            highlights: default_highlights(),
            rows_per_sheet: default_rows_per_sheet(),
            ocr_sample: default_ocr_sample(),
        }
    }
}

fn default_ocr_binary() -> String {
    "tesseract".into()
}

fn default_ocr_language() -> String {
    "eng".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_binary")]
    pub binary: String,
    /// Tesseract language code.
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: default_ocr_binary(),
            language: default_ocr_language(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| (*k).to_owned()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PdfConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}
