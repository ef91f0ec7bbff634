use serde::Deserialize;
use std::path::PathBuf;

use clef::audio::features::DEFAULT_MAX_FRAMES;
use clef::audio::{FRAME_SIZE, HOP_SIZE};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub model: ModelSection,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisSection {
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelSection {
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            frame_size: default_frame_size(),
            hop_size: default_hop_size(),
            max_frames: default_max_frames(),
        }
    }
}

fn default_frame_size() -> usize { FRAME_SIZE }
fn default_hop_size() -> usize { HOP_SIZE }
fn default_max_frames() -> usize { DEFAULT_MAX_FRAMES }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
