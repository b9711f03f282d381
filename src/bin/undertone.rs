//! undertone - detect skin undertone and skin tone from sampled hex colors
//!
//! Prints the full detection result as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use undertone::detect::{detect_undertone_with_calibration, DetectionOptions};

#[derive(Parser)]
#[command(name = "undertone")]
#[command(author, version, about = "Detect skin undertone and skin tone from sampled colors")]
#[command(long_about = "
Detects the undertone (warm, neutral, cool) and skin tone (very light to deep) from a skin color
and optional hair and eye colors, white balancing them first with the gray-world assumption.

Examples:
  undertone '#e6c9b3'                                 # skin only
  undertone '#e6c9b3' --hair '#5a3d2b' --eye '#2f241f'
  undertone '#e6c9b3' --hair '#5a3d2b' --no-calibrate
  undertone '#e6c9b3' --warm 7.5 --cool 0.0
  undertone '#e6c9b3' --options opts.json             # e.g. {\"autoCalibrate\": false}
")]
struct Cli {
    /// Skin color as a hex code (#rrggbb or #rgb)
    skin: String,

    /// Hair color as a hex code
    #[arg(long)]
    hair: Option<String>,

    /// Eye color as a hex code
    #[arg(long)]
    eye: Option<String>,

    /// JSON file with detection options; flags given on the command line take precedence
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Use the colors as they are, without white balancing
    #[arg(long)]
    no_calibrate: bool,

    /// Margin for flagging a warm illuminant
    #[arg(long)]
    warm_detect_threshold: Option<f64>,

    /// b* score at or above which the undertone is warm
    #[arg(long)]
    warm: Option<f64>,

    /// b* score at or below which the undertone is cool
    #[arg(long)]
    cool: Option<f64>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,
}

fn load_options(cli: &Cli) -> Result<DetectionOptions> {
    let mut opts = match cli.options {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing options in {}", path.display()))?
        }
        None => DetectionOptions::default(),
    };
    if cli.no_calibrate {
        opts.auto_calibrate = false;
    }
    if let Some(threshold) = cli.warm_detect_threshold {
        opts.warm_detect_threshold = threshold;
    }
    if let Some(warm) = cli.warm {
        opts.undertone_thresholds.warm = warm;
    }
    if let Some(cool) = cli.cool {
        opts.undertone_thresholds.cool = cool;
    }
    Ok(opts)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = load_options(&cli)?;
    let res = detect_undertone_with_calibration(
        &cli.skin,
        cli.hair.as_deref(),
        cli.eye.as_deref(),
        opts,
    )
    .context("detecting undertone")?;

    let json = if cli.compact {
        serde_json::to_string(&res)?
    } else {
        serde_json::to_string_pretty(&res)?
    };
    println!("{}", json);
    Ok(())
}
