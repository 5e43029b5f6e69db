//! Run the submission endpoint

use anyhow::Result;

use crate::Admin;

/// Start the HTTP server on `addr`, or the configured address
pub async fn run(admin: Admin, addr: Option<&str>) -> Result<()> {
    let addr = addr.unwrap_or(&admin.config.addr).to_string();
    crate::server::start(admin, &addr).await
}
