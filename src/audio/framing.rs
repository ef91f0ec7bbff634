//! Overlapping Hann-windowed frame extraction.

pub const FRAME_SIZE: usize = 2048;
pub const HOP_SIZE: usize = 1024;

/// Slices a sample buffer into fixed-size overlapping frames and applies a
/// Hann window to each. The window is precomputed once; every call to
/// [`Framer::frames`] starts a fresh pass over the samples.
pub struct Framer {
    frame_size: usize,
    hop_size: usize,
    window: Vec<f32>,
}

impl Framer {
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        Self {
            frame_size,
            hop_size,
            window: hann_window(frame_size),
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Iterate windowed frames at offsets 0, hop, 2*hop, ... while the frame
    /// still fits entirely inside `samples`.
    pub fn frames<'a>(&'a self, samples: &'a [f32]) -> Frames<'a> {
        Frames {
            samples,
            window: &self.window,
            frame_size: self.frame_size,
            hop_size: self.hop_size,
            offset: 0,
        }
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(FRAME_SIZE, HOP_SIZE)
    }
}

/// Lazy frame iterator. Each yielded frame is an independent copy of the
/// underlying slice, windowed in place, so consumers may mutate it freely.
pub struct Frames<'a> {
    samples: &'a [f32],
    window: &'a [f32],
    frame_size: usize,
    hop_size: usize,
    offset: usize,
}

impl Iterator for Frames<'_> {
    type Item = Vec<f32>;

    fn next(&mut self) -> Option<Vec<f32>> {
        if self.offset + self.frame_size > self.samples.len() {
            return None;
        }
        let mut frame = self.samples[self.offset..self.offset + self.frame_size].to_vec();
        for (x, w) in frame.iter_mut().zip(self.window) {
            *x *= w;
        }
        self.offset += self.hop_size;
        Some(frame)
    }
}

pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}
