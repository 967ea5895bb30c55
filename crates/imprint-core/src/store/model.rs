//! Record model types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::Fingerprint;

/// One ingested image as stored remotely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Store-assigned identifier
    pub id: i64,
    /// Path the image was ingested from
    pub path: String,
    /// Content fingerprint (unique across the store)
    pub fingerprint: Fingerprint,
}

/// Waste category scored by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Plastic,
    PaperCardboard,
    Metal,
    Glass,
    OrganicFood,
    Textile,
    Rubber,
    Wood,
    EWaste,
    Hazardous,
}

impl Category {
    pub const ALL: [Self; 10] = [
        Self::Plastic,
        Self::PaperCardboard,
        Self::Metal,
        Self::Glass,
        Self::OrganicFood,
        Self::Textile,
        Self::Rubber,
        Self::Wood,
        Self::EWaste,
        Self::Hazardous,
    ];

    /// Field name used in JSON and in the store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::PaperCardboard => "paper_cardboard",
            Self::Metal => "metal",
            Self::Glass => "glass",
            Self::OrganicFood => "organic_food",
            Self::Textile => "textile",
            Self::Rubber => "rubber",
            Self::Wood => "wood",
            Self::EWaste => "e_waste",
            Self::Hazardous => "hazardous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised when classifier output does not fit the label schema
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Invalid label JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Score for {category} out of range: {value}")]
    OutOfRange { category: Category, value: f64 },
}

/// Confidence per category, each in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelScores {
    pub plastic: f64,
    pub paper_cardboard: f64,
    pub metal: f64,
    pub glass: f64,
    pub organic_food: f64,
    pub textile: f64,
    pub rubber: f64,
    pub wood: f64,
    pub e_waste: f64,
    pub hazardous: f64,
}

impl LabelScores {
    /// Parse and validate classifier output
    ///
    /// All ten keys are required; unknown keys are rejected.
    ///
    /// # Errors
    /// Returns an error if the JSON does not match or a score is outside
    /// `[0.0, 1.0]`.
    pub fn from_json(raw: &str) -> Result<Self, LabelError> {
        let scores: Self = serde_json::from_str(raw)?;
        scores.validate()?;
        Ok(scores)
    }

    /// Check every score is a finite value in `[0.0, 1.0]`
    ///
    /// # Errors
    /// Returns `LabelError::OutOfRange` for the first offending category.
    pub fn validate(&self) -> Result<(), LabelError> {
        for (category, value) in self.iter() {
            if !(0.0..=1.0).contains(&value) {
                return Err(LabelError::OutOfRange { category, value });
            }
        }
        Ok(())
    }

    /// Score for a single category
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Plastic => self.plastic,
            Category::PaperCardboard => self.paper_cardboard,
            Category::Metal => self.metal,
            Category::Glass => self.glass,
            Category::OrganicFood => self.organic_food,
            Category::Textile => self.textile,
            Category::Rubber => self.rubber,
            Category::Wood => self.wood,
            Category::EWaste => self.e_waste,
            Category::Hazardous => self.hazardous,
        }
    }

    /// Iterate `(category, score)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}
