//! Genre label set, prediction type, and classifier orchestration.

pub mod heuristic;

use serde::Serialize;
use std::fmt;

use crate::audio::SummaryFeatures;
use crate::model::{self, ModelProvider};

/// The fixed genre taxonomy. Declaration order is the wire order: external
/// model outputs are index-aligned to it, and it breaks score ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Rock,
    Classical,
    HipHop,
    Jazz,
}

impl Genre {
    pub const COUNT: usize = 4;

    /// All genres, in declaration order.
    pub fn all() -> &'static [Genre; Genre::COUNT] {
        &[Genre::Rock, Genre::Classical, Genre::HipHop, Genre::Jazz]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Genre::Rock => "rock",
            Genre::Classical => "classical",
            Genre::HipHop => "hiphop",
            Genre::Jazz => "jazz",
        }
    }

    pub fn from_index(idx: usize) -> Option<Genre> {
        Self::all().get(idx).copied()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classification outcome: the winning genre plus the full probability
/// distribution, in label order. Probabilities are non-negative and sum to
/// ~1.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub best: Genre,
    pub probs: [(Genre, f32); Genre::COUNT],
}

impl Prediction {
    /// Probability assigned to the winning genre.
    pub fn confidence(&self) -> f32 {
        self.prob(self.best)
    }

    pub fn prob(&self, genre: Genre) -> f32 {
        self.probs
            .iter()
            .find(|(g, _)| *g == genre)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

/// Pick the genre with the highest probability; on a tie the earliest label
/// in declaration order wins.
pub(crate) fn best_of(probs: &[(Genre, f32); Genre::COUNT]) -> Genre {
    let mut best = probs[0];
    for &candidate in &probs[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0
}

/// Classify with an external model, falling back to the heuristic when the
/// model cannot be loaded or invoked.
///
/// The fallback result is exactly what [`heuristic::classify`] would return
/// for the same features; model failure is never fatal.
pub fn classify_with_model(
    features: &SummaryFeatures,
    provider: &dyn ModelProvider,
    handle: &str,
) -> Prediction {
    match provider
        .load(handle)
        .and_then(|m| model::predict(m.as_ref(), features))
    {
        Ok(prediction) => prediction,
        Err(err) => {
            log::warn!("external model failed ({err}), falling back to heuristic");
            heuristic::classify(features)
        }
    }
}
