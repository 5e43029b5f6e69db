//! CLI commands

pub mod check;
pub mod new;
pub mod render;
pub mod serve;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a JSON payload from a file, or from stdin when the path is `-`
pub fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read payload from stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read payload {:?}", path))
}
