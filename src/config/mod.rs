//! Configuration module

mod admin;

pub use admin::AdminConfig;
pub use admin::RepositoryTarget;
pub use admin::CONFIG_FILE;
