//! Tests for record model types

#![allow(clippy::expect_used)]

use crate::store::model::{Category, LabelError, LabelScores};

const FULL: &str = r#"{
    "plastic": 0.9, "paper_cardboard": 0.0, "metal": 0.0, "glass": 0.0,
    "organic_food": 0.0, "textile": 0.0, "rubber": 0.0, "wood": 0.0,
    "e_waste": 0.0, "hazardous": 0.1
}"#;

#[test]
fn test_category_names() {
    let names: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
    assert_eq!(
        names,
        vec![
            "plastic",
            "paper_cardboard",
            "metal",
            "glass",
            "organic_food",
            "textile",
            "rubber",
            "wood",
            "e_waste",
            "hazardous",
        ]
    );
}

#[test]
fn test_category_serde_matches_as_str() {
    for category in Category::ALL {
        let json = serde_json::to_string(&category).expect("Failed to serialize");
        assert_eq!(json, format!("\"{}\"", category.as_str()));
    }
}

#[test]
fn test_label_scores_from_json() {
    let scores = LabelScores::from_json(FULL).expect("Failed to parse");

    assert!((scores.plastic - 0.9).abs() < f64::EPSILON);
    assert!((scores.get(Category::Hazardous) - 0.1).abs() < f64::EPSILON);
    assert_eq!(scores.iter().count(), 10);
}

#[test]
fn test_label_scores_missing_key() {
    let result = LabelScores::from_json(r#"{"plastic": 1.0}"#);

    assert!(matches!(result, Err(LabelError::Json(_))));
}

#[test]
fn test_label_scores_unknown_key() {
    let raw = FULL.replace("\"hazardous\"", "\"styrofoam\": 0.0, \"hazardous\"");

    let result = LabelScores::from_json(&raw);

    assert!(matches!(result, Err(LabelError::Json(_))));
}

#[test]
fn test_label_scores_out_of_range() {
    let raw = FULL.replace("\"metal\": 0.0", "\"metal\": 1.5");

    match LabelScores::from_json(&raw) {
        Err(LabelError::OutOfRange { category, value }) => {
            assert_eq!(category, Category::Metal);
            assert!((value - 1.5).abs() < f64::EPSILON);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn test_label_scores_negative_rejected() {
    let scores = LabelScores {
        wood: -0.1,
        ..LabelScores::default()
    };

    assert!(scores.validate().is_err());
}

#[test]
fn test_label_scores_bounds_inclusive() {
    let scores = LabelScores {
        glass: 1.0,
        textile: 0.0,
        ..LabelScores::default()
    };

    assert!(scores.validate().is_ok());
}
