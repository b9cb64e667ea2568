use std::path::PathBuf;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("DOCSIFT_DOCUMENTS_DIR") {
            self.documents.dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DOCSIFT_OCR_BINARY") {
            self.ocr.binary = v;
        }
        if let Ok(v) = std::env::var("DOCSIFT_OCR_LANGUAGE") {
            self.ocr.language = v;
        }
        if let Some(n) = parse_env_usize("DOCSIFT_LIMIT_HIGHLIGHTS") {
            self.limits.highlights = n;
        }
        if let Some(n) = parse_env_usize("DOCSIFT_LIMIT_ROWS") {
            self.limits.rows_per_sheet = n;
        }
        if let Some(n) = parse_env_usize("DOCSIFT_LIMIT_OCR_SAMPLE") {
            self.limits.ocr_sample = n;
        }
    }
}

fn parse_env_usize(key: &str) -> Option<usize> {
    let v = std::env::var(key).ok()?;
    match v.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("ignoring invalid {key} value: {v}");
            None
        }
    }
}
