use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use wavelet_watermarking as wm;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Settings {
    /// JSON file with the watermark configuration.
    #[clap(value_parser, long)]
    config: Option<PathBuf>,

    /// Seed for the coefficient permutation, overrides the configuration.
    #[clap(value_parser, long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct Embed {
    /// The file to operate on.
    #[clap(action)]
    file: String,

    /// Text to embed, padded or truncated to four characters.
    #[clap(action)]
    text: String,

    /// Output file, written as PNG.
    #[clap(value_parser, long, short)]
    output: Option<PathBuf>,

    /// Watermark strength, overrides the configuration.
    #[clap(value_parser, long)]
    strength: Option<f32>,

    /// Write the marked carrier subband to this file for inspection.
    #[clap(value_parser, long)]
    dump_carrier: Option<PathBuf>,

    #[clap(flatten)]
    settings: Settings,
}

#[derive(Args)]
struct Decode {
    /// The file to operate on.
    #[clap(action)]
    file: String,

    #[clap(flatten)]
    settings: Settings,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed text into an image.
    Embed(Embed),
    /// Recover the text from an image.
    Decode(Decode),
    /// Print the effective configuration.
    Config(Settings),
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Success,
    Failure,
}

/// Outcome of a decode, printed as JSON.
#[derive(Serialize)]
struct DecodeReport {
    status: Status,
    payload: String,
    raw: String,
}

fn load_config(settings: &Settings) -> wm::Result<wm::Config> {
    let mut config = match &settings.config {
        Some(path) => wm::Config::load(path)?,
        None => wm::Config::default(),
    };
    if let Some(seed) = settings.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    input.with_file_name(format!("{stem}_watermarked.png"))
}

fn embed(v: &Embed) -> wm::Result<()> {
    let mut config = load_config(&v.settings)?;
    if let Some(strength) = v.strength {
        config.strength = strength;
    }
    let watermarker = wm::Watermarker::new(config)?;

    let image_path = PathBuf::from(&v.file);
    let bytes = std::fs::read(&image_path)?;
    let output = v
        .output
        .clone()
        .unwrap_or_else(|| default_output(&image_path));

    let marked = watermarker.embed_bytes(&bytes, &v.text)?;
    std::fs::write(&output, &marked)?;
    info!("wrote {}", output.display());

    if let Some(path) = &v.dump_carrier {
        let image = wm::container::load(&marked, watermarker.config().max_dimension)?;
        wm::util::dump_plane(&watermarker.carrier(&image)?, path)?;
        info!("wrote carrier to {}", path.display());
    }
    Ok(())
}

fn decode(v: &Decode) -> wm::Result<()> {
    let watermarker = wm::Watermarker::new(load_config(&v.settings)?)?;
    let bytes = std::fs::read(PathBuf::from(&v.file))?;
    let payload = watermarker.decode_bytes(&bytes)?;

    let text = payload.text();
    let report = DecodeReport {
        status: if text.is_empty() {
            Status::Failure
        } else {
            Status::Success
        },
        payload: text,
        raw: payload.as_string(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Embed(v) => embed(v),
        Commands::Decode(v) => decode(v),
        Commands::Config(v) => {
            load_config(v).and_then(|config| config.to_json().map(|json| println!("{json}")))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
