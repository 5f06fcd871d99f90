//! Run the AR keyboard pipeline on an image file.

use std::path::PathBuf;

use clap::Parser;
use keyboard_ar::convert::{gray_view, rgba_from_image, rgba_to_image};
use keyboard_ar::{AnnotateParams, Annotator};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "keyboard-ar", about = "Detect keyboard markers and composite the note overlay")]
struct Cli {
    /// Input camera image (any format the image crate reads).
    input: PathBuf,

    /// Annotated output image path.
    #[arg(short, long, default_value = "annotated.png")]
    output: PathBuf,

    /// Number of keys on the instrument (49, 61, 76 or 88). Overrides the
    /// params file; without either, 49 is assumed.
    #[arg(long)]
    keys: Option<u32>,

    /// Optional JSON file with full pipeline parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Params-file settings win unless `--keys` was given explicitly.
fn effective_params(file_params: Option<AnnotateParams>, keys: Option<u32>) -> AnnotateParams {
    let mut params = file_params.unwrap_or_default();
    if let Some(keys) = keys {
        params.layout.keys_count = keys;
    }
    params
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    keyboard_ar::core::init_with_level(level)?;

    let file_params: Option<AnnotateParams> = match &cli.params {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let params = effective_params(file_params, cli.keys);

    let img = image::ImageReader::open(&cli.input)?.decode()?;
    let gray = img.to_luma8();
    let mut frame = rgba_from_image(&img.to_rgba8());

    let annotator = Annotator::new(params);
    let report = annotator.annotate(&gray_view(&gray), &mut frame.view_mut());
    log::info!(
        "{}: {} markers, {} octaves composited",
        cli.input.display(),
        report.markers,
        report.octaves
    );

    let out = rgba_to_image(&frame).ok_or("output image dimensions out of range")?;
    out.save(&cli.output)?;
    log::info!("wrote {}", cli.output.display());

    Ok(())
}
