//! Show the resolved configuration

use anyhow::Result;

use crate::Admin;

/// Print the configuration (secrets redacted) and anything that would
/// make submissions fail
pub fn run(admin: &Admin) -> Result<()> {
    println!("{:#?}", admin.config);

    let problems = admin.config.problems();
    if problems.is_empty() {
        println!("Configuration OK");
        return Ok(());
    }

    for problem in &problems {
        println!("✗ {}", problem);
    }
    anyhow::bail!("{} configuration problem(s)", problems.len())
}
