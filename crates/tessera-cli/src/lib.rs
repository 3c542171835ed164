//! CLI logic for the Tessera scene renderer.
//!
//! Reads a TOML scene description, builds the scene with the loaded
//! configuration and writes the rendered SVG document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use tessera::{SceneBuilder, TesseraError};

/// Run the Tessera CLI application
///
/// # Errors
///
/// Returns `TesseraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene description errors
/// - Scene construction and rendering errors
pub fn run(args: &Args) -> Result<(), TesseraError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let scene = builder.build(&source)?;
    scene.save(&args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
