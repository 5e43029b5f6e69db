//! Dry run: show what a payload would commit

use anyhow::Result;
use std::path::Path;

use crate::Admin;

/// Validate and render a payload without touching the repository
pub fn run(admin: &Admin, payload: &Path) -> Result<()> {
    let raw = super::read_payload(payload)?;
    let document = admin.render(&raw)?;

    println!("Path:    {}", document.path);
    println!("Message: {}", document.message);
    println!();
    print!("{}", document.content);

    Ok(())
}
