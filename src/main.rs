mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use clef::audio::features::DEFAULT_MAX_FRAMES;
use clef::{
    classify_with_model, decode_audio, extract_features, heuristic, AnalysisParams,
    JsonModelProvider, Prediction, SummaryFeatures,
};
use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect clef.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("clef.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("clef").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    let mut params = AnalysisParams {
        max_frames: cli.max_frames,
        ..AnalysisParams::default()
    };
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            params.frame_size = cfg.analysis.frame_size;
            params.hop_size = cfg.analysis.hop_size;
            // Config values apply only when the CLI is at its default
            if cli.max_frames == DEFAULT_MAX_FRAMES {
                params.max_frames = cfg.analysis.max_frames;
            }
            if cli.model.is_none() {
                cli.model = cfg.model.url;
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("Input: {}", input.display());

    let waveform = decode_audio(input)?;

    log::info!("Extracting features...");
    let features = extract_features(&waveform, &params)
        .with_context(|| format!("Cannot analyze {}", input.display()))?;

    let prediction = match cli.model.as_deref() {
        Some(handle) => classify_with_model(&features, &JsonModelProvider::new(), handle),
        None => heuristic::classify(&features),
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "features": features,
                "prediction": prediction,
            }))?
        );
    } else {
        print_report(&features, &prediction);
    }

    Ok(())
}

fn print_report(features: &SummaryFeatures, prediction: &Prediction) {
    println!("Features:");
    println!(
        "  centroid   {:>8.0} Hz  ({:.3} of Nyquist)",
        features.centroid_hz, features.centroid
    );
    println!("  rms        {:>8.4}", features.rms);
    println!("  zcr        {:>8.4}", features.zcr);
    println!();
    println!(
        "Prediction: {}  ({:.0}% confidence)",
        prediction.best,
        prediction.confidence() * 100.0
    );
    for (genre, prob) in &prediction.probs {
        println!("  {:<10} {:>5.1}%", genre.name(), prob * 100.0);
    }
}
