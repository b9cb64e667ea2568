//! Configuration and the PDF → image → workbook extraction pipeline.

pub mod config;
pub mod pipeline;
