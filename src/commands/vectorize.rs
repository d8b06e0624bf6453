use std::fs;

use vectrace::{OutputFormat, VectorizeResult, Vectorizer};

use crate::cli::VectorizeCommand;

use super::utils::{derive_output_path, load_rgba, resolve_export_path};

/// The main function to run the vectorize command.
pub fn run(cmd: VectorizeCommand) -> VectorizeResult<()> {
    let format: OutputFormat = cmd.format.into();
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&cmd.input, format));

    let image = load_rgba(&cmd.input)?;
    let (width, height) = image.dimensions();

    let vectorizer = Vectorizer::new()
        .with_threshold(cmd.threshold)
        .with_simplify_tolerance(cmd.tolerance)
        .with_turdsize(cmd.turdsize)
        .with_output_format(format);

    let traced = vectorizer.trace(image.as_raw(), width, height)?;
    let document = traced.render(format)?;
    fs::write(&output_path, &document)?;
    println!(
        "{} saved to {} ({} paths, threshold {})",
        format.extension().to_uppercase(),
        output_path.display(),
        traced.paths().len(),
        traced.threshold()
    );

    if let Some(path) = resolve_export_path(&cmd.export_mask, &cmd.input, "mask") {
        traced.mask().to_image().save(&path)?;
        println!("Binary mask PNG saved to {}", path.display());
    }

    Ok(())
}
