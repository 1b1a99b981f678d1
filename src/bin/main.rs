use braille_core::persistence::save_snapshot;
use braille_core::{BrailleDecoder, DecodeMode, DecoderConfig, RawDetection};
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_CATALOG_PATH: &str = "braille_catalogs.json";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Grade1,
    Grade2,
    Combined,
}

impl From<ModeArg> for DecodeMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Grade1 => DecodeMode::Grade1,
            ModeArg::Grade2 => DecodeMode::Grade2,
            ModeArg::Combined => DecodeMode::Combined,
        }
    }
}

/// Decode a JSON dump of braille detections into Filipino text.
#[derive(Debug, Parser)]
#[command(name = "braille_decode", version)]
struct Args {
    /// JSON array of detections: {x, y, w, h, confidence, class_id}.
    detections: PathBuf,
    /// Dictionary set the detector was trained against.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Catalog file; built-in tables are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
    /// Decoder settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip detections below this confidence.
    #[arg(long)]
    min_confidence: Option<f32>,
    /// Also write the loaded catalogs as a binary snapshot.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => DecoderConfig::from_json_file(path)?,
        None => DecoderConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(min_confidence) = args.min_confidence {
        config.min_confidence = min_confidence;
    }

    let decoder = BrailleDecoder::from_file_or_builtin(&args.catalog, config)?;
    if let Some(path) = &args.snapshot {
        save_snapshot(decoder.catalogs(), path)?;
    }

    let reader = BufReader::new(File::open(&args.detections)?);
    let detections: Vec<RawDetection> = serde_json::from_reader(reader)?;
    let output = decoder.decode(&detections);

    println!("{}", "Detections".bold().cyan());
    print!("{}", output.detection_text);
    if output.unresolved > 0 {
        println!(
            "{}",
            format!("{} cells had unknown class ids", output.unresolved).yellow()
        );
    }
    if output.filtered > 0 {
        println!(
            "{}",
            format!("{} detections below confidence threshold", output.filtered).dark_grey()
        );
    }

    println!(
        "\n{} ({} mode)",
        "Transliteration".bold().cyan(),
        decoder.config().mode
    );
    println!("{}", output.translated_text);
    Ok(())
}
