//! Create a new entry from a local payload

use anyhow::Result;
use std::path::Path;

use crate::Admin;

/// Submit a JSON payload file straight to the repository
///
/// The header check is skipped: whoever runs this already holds the
/// repository token.
pub async fn run(admin: &Admin, payload: &Path) -> Result<()> {
    let raw = super::read_payload(payload)?;
    let path = admin.submit(&raw).await?;

    println!("Created: {}", path);

    Ok(())
}
