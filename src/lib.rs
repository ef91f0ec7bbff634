//! clef - audio feature extraction and genre classification.
//!
//! Slices a decoded mono waveform into Hann-windowed frames, averages
//! spectral centroid, RMS and zero-crossing rate across a bounded frame
//! budget, and maps the result to a genre distribution, either with a fixed
//! heuristic scoring rule or with a caller-supplied external model that
//! falls back to the heuristic on any failure.
//!
//! ```no_run
//! use clef::{extract_features, heuristic, AnalysisParams, Waveform};
//!
//! let waveform = Waveform::new(vec![0.0; 44_100], 44_100);
//! let features = extract_features(&waveform, &AnalysisParams::default())?;
//! let prediction = heuristic::classify(&features);
//! println!("{} ({:.0}%)", prediction.best, prediction.confidence() * 100.0);
//! # Ok::<(), clef::AnalysisError>(())
//! ```

pub mod audio;
pub mod classify;
pub mod error;
pub mod model;

pub use audio::{decode_audio, extract_features, AnalysisParams, SummaryFeatures, Waveform};
pub use classify::{classify_with_model, heuristic, Genre, Prediction};
pub use error::{AnalysisError, ModelError};
pub use model::{GenreModel, JsonModelProvider, ModelProvider};
