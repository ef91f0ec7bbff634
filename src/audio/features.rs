//! Per-frame features and their aggregation into summary features.

use serde::Serialize;

use super::framing::{Framer, FRAME_SIZE, HOP_SIZE};
use super::spectrum::{spectral_centroid_hz, SpectrumAnalyzer};
use super::Waveform;
use crate::error::AnalysisError;

/// Default number of frames folded into the summary. A sampling budget, not
/// a signal property: long inputs are judged by their opening seconds.
pub const DEFAULT_MAX_FRAMES: usize = 61;

/// Knobs of the analysis pass. The defaults reproduce the reference
/// behavior; `max_frames` bounds work on long inputs.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisParams {
    pub frame_size: usize,
    pub hop_size: usize,
    pub max_frames: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            frame_size: FRAME_SIZE,
            hop_size: HOP_SIZE,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// Waveform-level features, averaged over the analyzed frames.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryFeatures {
    /// Mean spectral centroid in Hz.
    pub centroid_hz: f32,
    /// Mean spectral centroid normalized by Nyquist, clamped to [0, 1].
    pub centroid: f32,
    /// Mean RMS energy (linear).
    pub rms: f32,
    /// Mean zero-crossing rate, in [0, 1].
    pub zcr: f32,
}

/// RMS energy of one frame.
pub fn frame_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    (frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32).sqrt()
}

/// Fraction of adjacent sample pairs that change sign, over the frame length.
pub fn frame_zcr(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let crossings = frame.windows(2).filter(|w| w[0] * w[1] < 0.0).count();
    crossings as f32 / frame.len() as f32
}

/// Run the frame pipeline over a waveform and average per-frame centroid,
/// RMS and ZCR into a [`SummaryFeatures`].
///
/// Rejects input that cannot produce at least one frame, so downstream
/// consumers never see a zero-frame aggregate.
pub fn extract_features(
    waveform: &Waveform,
    params: &AnalysisParams,
) -> Result<SummaryFeatures, AnalysisError> {
    if waveform.samples.is_empty() {
        return Err(AnalysisError::EmptyWaveform);
    }
    if waveform.sample_rate == 0 {
        return Err(AnalysisError::ZeroSampleRate);
    }
    if waveform.samples.len() < params.frame_size {
        return Err(AnalysisError::TooShort {
            got: waveform.samples.len(),
            needed: params.frame_size,
        });
    }

    let framer = Framer::new(params.frame_size, params.hop_size);
    let analyzer = SpectrumAnalyzer::new(params.frame_size);

    let mut centroid_sum = 0.0f32;
    let mut rms_sum = 0.0f32;
    let mut zcr_sum = 0.0f32;
    let mut frames = 0usize;

    for frame in framer.frames(&waveform.samples).take(params.max_frames) {
        rms_sum += frame_rms(&frame);
        zcr_sum += frame_zcr(&frame);

        let mags = analyzer.magnitudes(&frame);
        centroid_sum += spectral_centroid_hz(&mags, waveform.sample_rate, params.frame_size);

        frames += 1;
    }

    // The length check above guarantees at least one frame.
    debug_assert!(frames > 0);

    let centroid_hz = centroid_sum / frames as f32;
    let rms = rms_sum / frames as f32;
    let zcr = zcr_sum / frames as f32;
    let nyquist = waveform.sample_rate as f32 / 2.0;
    let centroid = (centroid_hz / nyquist).min(1.0);

    log::debug!(
        "analyzed {} frames: centroid={:.0}Hz ({:.3}), rms={:.4}, zcr={:.4}",
        frames,
        centroid_hz,
        centroid,
        rms,
        zcr
    );

    Ok(SummaryFeatures {
        centroid_hz,
        centroid,
        rms,
        zcr,
    })
}
