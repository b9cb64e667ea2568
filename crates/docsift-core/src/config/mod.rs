mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to the built-in defaults when the file does not exist, so a
    /// bare invocation always works.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject values that would make extraction meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> anyhow::Result<()> {
        let names = [
            ("documents.pdf", &self.documents.pdf),
            ("documents.image", &self.documents.image),
            ("documents.spreadsheet", &self.documents.spreadsheet),
            ("documents.summary", &self.documents.summary),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                bail!("{field} must not be empty");
            }
        }
        if self.pdf.keywords.iter().all(|k| k.trim().is_empty()) {
            bail!("pdf.keywords must contain at least one keyword");
        }
        if self.ocr.binary.trim().is_empty() {
            bail!("ocr.binary must not be empty");
        }
        if self.ocr.language.trim().is_empty() {
            bail!("ocr.language must not be empty");
        }
        Ok(())
    }
}
