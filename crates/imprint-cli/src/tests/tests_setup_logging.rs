//! Tests for logging setup
//!
//! The global tracing subscriber can only be initialized once per process,
//! so these tests validate filter selection rather than installation.

use crate::logging::filter_for;

#[test]
fn test_default_filter_is_info() {
    let debug_str = format!("{:?}", filter_for(false));
    assert!(debug_str.contains("INFO") || debug_str.contains("info"));
}

#[test]
fn test_verbose_filter_is_debug() {
    let debug_str = format!("{:?}", filter_for(true));
    assert!(debug_str.contains("DEBUG") || debug_str.contains("debug"));
}

#[test]
fn test_filters_differ() {
    assert_ne!(
        format!("{:?}", filter_for(false)),
        format!("{:?}", filter_for(true))
    );
}
