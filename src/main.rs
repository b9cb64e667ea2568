use std::path::PathBuf;

use anyhow::Context;
use docsift_core::config::Config;
use docsift_core::pipeline::Pipeline;
use docsift_extract::TesseractEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)?;
    config.validate()?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    // Fail before touching any document if OCR cannot run.
    let engine = TesseractEngine::locate(&config.ocr.binary, &config.ocr.language)?;

    let pipeline = Pipeline::new(&config, engine);
    pipeline.run().await.context("document extraction failed")?;

    println!("Summary written to {}", pipeline.summary_path().display());
    Ok(())
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    config_path_from(&args, std::env::var("DOCSIFT_CONFIG").ok())
}

fn config_path_from(args: &[String], env: Option<String>) -> PathBuf {
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Some(path) = env {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}
