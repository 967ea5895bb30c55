//! Scanner module: Candidate discovery and format detection
//!
//! Responsible for walking directories and picking out the files
//! whose extension marks them as ingestible images.

mod format;
mod walker;

pub use format::ImageFormat;
pub use walker::{Candidate, ScanError, Scanner};
