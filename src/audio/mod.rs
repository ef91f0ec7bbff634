pub mod decode;
pub mod features;
pub mod framing;
pub mod spectrum;

pub use decode::decode_audio;
pub use features::{extract_features, AnalysisParams, SummaryFeatures};
pub use framing::{Framer, FRAME_SIZE, HOP_SIZE};

/// Decoded single-channel audio: samples (typically in [-1, 1]) plus the
/// sample rate they were captured at. Read-only input to the pipeline.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
