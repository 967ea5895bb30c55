//! Tests for mapping Neo4j driver errors onto store errors

use std::io;

use crate::store::neo4j::classify_server_error;
use crate::store::StoreError;

#[test]
fn test_connection_error_is_unavailable() {
    let err = StoreError::from(neo4rs::Error::ConnectionError);
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert!(err.is_transient());
}

#[test]
fn test_io_error_is_unavailable() {
    let err = StoreError::from(neo4rs::Error::IOError {
        detail: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
    });
    assert!(matches!(err, StoreError::Unavailable(ref msg) if msg.contains("connection refused")));
}

#[test]
fn test_protocol_errors_are_query_failures() {
    let unexpected = StoreError::from(neo4rs::Error::UnexpectedMessage("RECORD".into()));
    assert!(matches!(unexpected, StoreError::Query(_)));

    let conversion = StoreError::from(neo4rs::Error::ConversionError);
    assert!(matches!(conversion, StoreError::Query(_)));
    assert!(!conversion.is_transient());
}

#[test]
fn test_constraint_violation_is_conflict() {
    let err = classify_server_error(
        "Neo.ClientError.Schema.ConstraintValidationFailed",
        "Node(12) already exists with label `Image` and property `hash`",
    );
    assert!(err.is_conflict());
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_transient_server_error_is_unavailable() {
    let err = classify_server_error(
        "Neo.TransientError.General.DatabaseUnavailable",
        "database is unavailable",
    );
    assert!(err.is_transient());
}

#[test]
fn test_other_server_errors_are_query_failures() {
    for code in [
        "Neo.ClientError.Statement.SyntaxError",
        "Neo.ClientError.Security.Unauthorized",
        "Neo.DatabaseError.General.UnknownError",
    ] {
        let err = classify_server_error(code, "failed");
        assert!(matches!(err, StoreError::Query(ref msg) if msg.starts_with(code)));
    }
}
