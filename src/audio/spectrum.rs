//! Magnitude spectrum and spectral centroid.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Keeps the spectral centroid finite on a silent frame instead of raising.
const CENTROID_EPSILON: f32 = 1e-9;

/// Computes magnitude spectra of fixed-size frames with a planned FFT.
///
/// The plan is built once and reused for every frame of an analysis run.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    size: usize,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(size),
            size,
        }
    }

    /// Magnitude per frequency bin, `size / 2` bins.
    ///
    /// Windowing is the framer's job; the frame is transformed as-is.
    pub fn magnitudes(&self, frame: &[f32]) -> Vec<f32> {
        debug_assert_eq!(frame.len(), self.size);
        let mut buffer: Vec<Complex<f32>> =
            frame.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer[..self.size / 2].iter().map(|c| c.norm()).collect()
    }
}

/// Energy-weighted mean frequency of a magnitude spectrum, in Hz.
///
/// The weighted mean bin `Σ k·mags[k] / (ε + Σ mags[k])` is scaled by the
/// bin width `sample_rate / frame_size`.
pub fn spectral_centroid_hz(mags: &[f32], sample_rate: u32, frame_size: usize) -> f32 {
    let mut num = 0.0f32;
    let mut den = CENTROID_EPSILON;
    for (k, &mag) in mags.iter().enumerate() {
        num += k as f32 * mag;
        den += mag;
    }
    (num / den) * (sample_rate as f32 / frame_size as f32)
}
