//! imprint-cli library
//!
//! This module exposes the internal functionality of imprint-cli for testing purposes.

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;

pub mod logging;
pub mod types;
pub use types::{Cli, Commands};

#[cfg(test)]
mod tests;
