// Four-tier verdict derived from the mean of the six category scores.

use serde::{Deserialize, Serialize};

/// Overall verdict, ordered from least to most toxic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Safe / Non-toxic")]
    Safe,
    #[serde(rename = "Mildly Toxic")]
    Mild,
    #[serde(rename = "Moderately Toxic")]
    Moderate,
    #[serde(rename = "Highly Toxic")]
    High,
}

impl Verdict {
    /// Map a mean score to its tier.
    ///
    /// Bands use strict `>` so a mean sitting exactly on 0.75, 0.50 or 0.25
    /// lands in the lower tier. NaN fails every comparison and falls to Safe.
    pub fn from_mean(mean: f64) -> Self {
        match mean {
            m if m > 0.75 => Verdict::High,
            m if m > 0.50 => Verdict::Moderate,
            m if m > 0.25 => Verdict::Mild,
            _ => Verdict::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "Safe / Non-toxic",
            Verdict::Mild => "Mildly Toxic",
            Verdict::Moderate => "Moderately Toxic",
            Verdict::High => "Highly Toxic",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
