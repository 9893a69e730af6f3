// The six-category toxicity score returned by the model.
//
// The category set is closed: a score always carries exactly these six
// values, in this order, each within [0, 1]. Construction validates that,
// so every ToxicityScore in the program is complete.

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::verdict::Verdict;

/// One of the six fixed toxicity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Toxic,
    SevereToxic,
    Obscene,
    Threat,
    Insult,
    IdentityHate,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Toxic,
        Category::SevereToxic,
        Category::Obscene,
        Category::Threat,
        Category::Insult,
        Category::IdentityHate,
    ];

    /// The JSON key the model is asked to use for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Toxic => "toxic",
            Category::SevereToxic => "severe_toxic",
            Category::Obscene => "obscene",
            Category::Threat => "threat",
            Category::Insult => "insult",
            Category::IdentityHate => "identity_hate",
        }
    }

    /// Look up a category by its exact JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complete, validated six-category score.
///
/// Serializes as a flat JSON object keyed by category name, which is the
/// same shape the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToxicityScore {
    values: [f64; 6],
}

impl ToxicityScore {
    /// Build a score from values in `Category::ALL` order.
    ///
    /// Fails if any value is not a finite number in [0, 1].
    pub fn new(values: [f64; 6]) -> Result<Self, ParseError> {
        for (category, value) in Category::ALL.into_iter().zip(values) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ParseError::OutOfRange { category, value });
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    /// Iterate `(category, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of the six values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean of the six values.
    pub fn mean(&self) -> f64 {
        self.total() / self.values.len() as f64
    }

    /// The category with the highest score (first one wins on ties).
    pub fn dominant(&self) -> (Category, f64) {
        self.iter()
            .fold((Category::Toxic, f64::MIN), |best, (c, v)| {
                if v > best.1 {
                    (c, v)
                } else {
                    best
                }
            })
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_mean(self.mean())
    }
}

impl Serialize for ToxicityScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (category, value) in self.iter() {
            map.serialize_entry(category.as_str(), &value)?;
        }
        map.end()
    }
}
