use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use super::OcrEngine;
use crate::error::{ExtractError, Result};

const INSTALL_HINT: &str =
    "Install it with 'apt install tesseract-ocr' or 'brew install tesseract'";

/// OCR through the `tesseract` command-line tool. CPU only.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
}

impl TesseractEngine {
    /// Resolve `binary` on `PATH` so a missing install fails before any document is read.
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` with an install hint when the executable cannot be found.
    pub fn locate(binary: &str, language: &str) -> Result<Self> {
        let resolved = which::which(binary).map_err(|_| {
            ExtractError::MissingDependency(format!("{binary} is required. {INSTALL_HINT}"))
        })?;
        tracing::debug!(binary = %resolved.display(), language, "OCR engine located");
        Ok(Self {
            binary: resolved,
            language: language.to_owned(),
        })
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &Path) -> Result<Vec<String>> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            // one OCR thread, runs are strictly sequential
            .env("OMP_THREAD_LIMIT", "1")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(paragraphs_from_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Group word rows of tesseract TSV output into paragraphs.
///
/// Words sharing a page, block and paragraph number are joined with single
/// spaces in reading order. Paragraphs without any text are dropped.
#[must_use]
pub fn paragraphs_from_tsv(tsv: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<(&str, &str, &str)> = None;

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.splitn(12, '\t').collect();
        // level 5 is a word
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }
        let word = cols[11].trim();
        if word.is_empty() {
            continue;
        }

        let key = (cols[1], cols[2], cols[3]);
        if current == Some(key)
            && let Some(last) = paragraphs.last_mut()
        {
            last.push(' ');
            last.push_str(word);
        } else {
            paragraphs.push(word.to_owned());
            current = Some(key);
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word(block: u32, par: u32, line: u32, text: &str) -> String {
        format!("5\t1\t{block}\t{par}\t{line}\t1\t0\t0\t10\t10\t95.0\t{text}")
    }

    #[test]
    fn groups_words_by_paragraph() {
        let tsv = [
            HEADER.to_owned(),
            "1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t".to_owned(),
            "2\t1\t1\t0\t0\t0\t10\t10\t300\t40\t-1\t".to_owned(),
            word(1, 1, 1, "ABHA"),
            word(1, 1, 1, "Creation"),
            word(1, 1, 2, "Flow"),
            word(1, 2, 1, "Step"),
            word(1, 2, 1, "1"),
            word(2, 1, 1, "Verify"),
        ]
        .join("\n");

        assert_eq!(
            paragraphs_from_tsv(&tsv),
            ["ABHA Creation Flow", "Step 1", "Verify"]
        );
    }

    #[test]
    fn skips_blank_words_and_empty_paragraphs() {
        let tsv = [
            HEADER.to_owned(),
            word(1, 1, 1, "   "),
            word(2, 1, 1, "Mobile"),
            word(2, 1, 1, ""),
            word(2, 1, 1, "OTP"),
        ]
        .join("\n");

        assert_eq!(paragraphs_from_tsv(&tsv), ["Mobile OTP"]);
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(paragraphs_from_tsv(HEADER).is_empty());
        assert!(paragraphs_from_tsv("").is_empty());
    }

    #[test]
    fn same_paragraph_numbers_on_new_page_start_new_paragraph() {
        let tsv = [
            HEADER.to_owned(),
            word(1, 1, 1, "first"),
            "5\t2\t1\t1\t1\t1\t0\t0\t10\t10\t90.0\tsecond".to_owned(),
        ]
        .join("\n");

        assert_eq!(paragraphs_from_tsv(&tsv), ["first", "second"]);
    }

    #[test]
    fn locate_unknown_binary_is_missing_dependency() {
        let err = TesseractEngine::locate("docsift-no-such-ocr-binary", "eng").unwrap_err();
        match err {
            ExtractError::MissingDependency(msg) => {
                assert!(msg.starts_with("docsift-no-such-ocr-binary is required."));
                assert!(msg.contains("tesseract-ocr"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
