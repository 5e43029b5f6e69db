//! Helper functions
//!
//! Small building blocks used while turning a submission
//! into a repository file: slugs, dates, URL encoding and loose JSON values.

mod date;
mod slug;
mod url;
mod value;

pub use date::*;
pub use slug::*;
pub use url::*;
pub use value::*;
