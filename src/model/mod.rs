//! External prediction model capabilities and the output adapter.
//!
//! The core never loads anything environment-specific itself: a
//! [`ModelProvider`] resolves a handle (URL, file path, ...) into a
//! [`GenreModel`], and [`predict`] adapts that model's raw output vector to
//! the same [`Prediction`] contract the heuristic produces.

pub mod loader;

pub use loader::JsonModelProvider;

use crate::audio::SummaryFeatures;
use crate::classify::{best_of, Genre, Prediction};
use crate::error::ModelError;

/// Length of the model input vector: `[centroid, rms, zcr]`.
pub const INPUT_DIM: usize = 3;

/// An opaque prediction capability: one raw vector in, one raw vector out.
pub trait GenreModel {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError>;
}

/// Resolves a model handle into a usable [`GenreModel`]. Implementations own
/// all environment-specific loading (network, filesystem).
pub trait ModelProvider {
    fn load(&self, handle: &str) -> Result<Box<dyn GenreModel>, ModelError>;
}

/// Run the model on a feature vector and normalize its output into a
/// [`Prediction`].
///
/// The output must have exactly one entry per genre, aligned to the
/// declared label order. Entries are divided by their sum; an output whose
/// sum is non-finite or not positive cannot form a distribution and is
/// reported as an error for the caller to recover from.
pub fn predict(
    model: &dyn GenreModel,
    features: &SummaryFeatures,
) -> Result<Prediction, ModelError> {
    let input: [f32; INPUT_DIM] = [features.centroid, features.rms, features.zcr];
    let output = model.predict(&input)?;

    if output.len() != Genre::COUNT {
        return Err(ModelError::OutputShape {
            got: output.len(),
            expected: Genre::COUNT,
        });
    }

    let sum: f32 = output.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(ModelError::DegenerateOutput { sum });
    }

    let mut probs = [(Genre::Rock, 0.0f32); Genre::COUNT];
    for (i, &genre) in Genre::all().iter().enumerate() {
        probs[i] = (genre, output[i] / sum);
    }

    Ok(Prediction {
        best: best_of(&probs),
        probs,
    })
}
