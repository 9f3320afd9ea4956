pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod sanitize;
pub mod verdict;

pub use sanitize::{classify_url, sanitize_url, UrlSanitizer};
pub use verdict::{Disposition, Verdict};
