use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::info;
use vectrace::{OutputFormat, VectorizeResult};

/// Decode an image file into a tightly packed RGBA buffer.
pub fn load_rgba(path: &Path) -> VectorizeResult<RgbaImage> {
    let image = image::open(path)?.to_rgba8();
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(image)
}

/// Resolve an optional export flag into a path, deriving a default when only the flag is given.
pub fn resolve_export_path(
    flag: &Option<Option<PathBuf>>,
    input: &Path,
    suffix: &str,
) -> Option<PathBuf> {
    match flag {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(derive_variant_path(input, suffix, "png")),
        None => None,
    }
}

/// Derive a variant file path by appending a suffix before the extension.
pub fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    let filename = format!("{}-{}.{}", stem, suffix, extension);
    derived.set_file_name(filename);
    derived
}

/// Derive the output path by swapping the extension for the format's one.
pub fn derive_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut path = input.to_path_buf();
    path.set_extension(format.extension());
    path
}
