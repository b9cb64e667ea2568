//! Sibling output paths and JSON writing shared by all extractors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

pub const TEXT_EXTENSION: &str = "extracted.txt";
pub const JSON_EXTENSION: &str = "extracted.json";

/// Replace the last extension of `source`, so `guide.pdf` becomes `guide.extracted.txt`.
#[must_use]
pub fn sibling_output(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write `value` as two-space indented JSON. Non-ASCII text is kept verbatim.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
