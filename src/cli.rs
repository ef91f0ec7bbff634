use clap::Parser;
use std::path::PathBuf;

use clef::audio::features::DEFAULT_MAX_FRAMES;

#[derive(Parser, Debug)]
#[command(name = "clef", about = "Audio feature extraction and genre classification")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// External model handle: a local path or http(s) URL of a JSON model
    /// description. On any model failure the heuristic is used instead.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of frames to fold into the summary features
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub max_frames: usize,

    /// Config file path (defaults to clef.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit features and prediction as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
