use thiserror::Error;

/// Structurally invalid input to the analysis pipeline.
///
/// Classification never fabricates a result from unanalyzable audio; these
/// are surfaced to the caller instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("waveform contains no samples")]
    EmptyWaveform,

    #[error("waveform too short to analyze: {got} samples, need at least {needed}")]
    TooShort { got: usize, needed: usize },

    #[error("sample rate must be positive")]
    ZeroSampleRate,
}

/// Failure to load or invoke an external prediction model.
///
/// Never fatal to an analysis: call sites recover by falling back to the
/// heuristic classifier.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to fetch model from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read model file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model description")]
    Parse(#[from] serde_json::Error),

    #[error("model layer {layer} is inconsistent: {reason}")]
    BadLayer { layer: usize, reason: String },

    #[error("model expects {expected} inputs, got {got}")]
    InputShape { got: usize, expected: usize },

    #[error("model produced {got} outputs, expected {expected}")]
    OutputShape { got: usize, expected: usize },

    #[error("model output cannot be normalized (sum = {sum})")]
    DegenerateOutput { sum: f32 },
}
