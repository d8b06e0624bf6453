pub mod config;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod simplify;
pub mod vectorizer;

pub use config::{
    DEFAULT_SIMPLIFY_TOLERANCE, DEFAULT_TURDSIZE, OutputFormat, Threshold, UnknownFormat,
    VectorizeOptions,
};
pub use error::{VectorizeError, VectorizeResult};
pub use geometry::{Path, PathList, Point};
pub use mask::BinaryMask;
pub use vectorizer::{EpsEmitter, PathEmitter, PdfEmitter, SvgEmitter};

use image::GrayImage;
use tracing::{debug, instrument};

use crate::contour::extract_contours;
use crate::mask::{binarize, count_foreground, otsu_threshold, to_grayscale};
use crate::simplify::simplify_paths;

/// Entry point for configuring and running bitmap vectorization.
///
/// A `Vectorizer` holds only options. Every call allocates its own working
/// buffers and releases them before returning, so one instance can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    options: VectorizeOptions,
}

impl Vectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vectorizer from a complete set of options.
    pub fn with_options(options: VectorizeOptions) -> Self {
        Self { options }
    }

    /// Set the binarization threshold. `0` (or [`Threshold::Auto`]) uses Otsu's method.
    pub fn with_threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.options.threshold = threshold.into();
        self
    }

    /// Set the Douglas-Peucker tolerance in pixels; `<= 0` disables simplification.
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.options.simplify_tolerance = tolerance;
        self
    }

    /// Set the minimum contour length in points; `0` selects the default.
    pub fn with_turdsize(mut self, turdsize: usize) -> Self {
        self.options.turdsize = turdsize;
        self
    }

    /// Set the output format used by [`Vectorizer::vectorize`].
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.options.output_format = format;
        self
    }

    pub fn options(&self) -> &VectorizeOptions {
        &self.options
    }

    /// Convert an RGBA buffer (4 bytes per pixel, row-major, no padding) into
    /// a vector document in the configured format.
    #[instrument(skip(self, rgba), fields(format = %self.options.output_format))]
    pub fn vectorize(&self, rgba: &[u8], width: u32, height: u32) -> VectorizeResult<String> {
        let traced = self.trace(rgba, width, height)?;
        let document = traced.render(self.options.output_format)?;
        debug!(bytes = document.len(), "vector document emitted");
        Ok(document)
    }

    /// Run every stage except emission and return the simplified contours.
    #[instrument(skip(self, rgba))]
    pub fn trace(&self, rgba: &[u8], width: u32, height: u32) -> VectorizeResult<TracedImage> {
        let gray = to_grayscale(rgba, width, height)?;
        let threshold = self.resolve_threshold(&gray);

        let mask = binarize(&gray, threshold)?;
        drop(gray);
        debug!(
            threshold,
            foreground = mask.foreground_count(),
            "image binarized"
        );

        let mut paths = extract_contours(&mask, self.options.effective_turdsize())?;

        if self.options.simplification_enabled() {
            let before = paths.point_count();
            simplify_paths(&mut paths, self.options.simplify_tolerance);
            debug!(
                before,
                after = paths.point_count(),
                tolerance = self.options.simplify_tolerance,
                "paths simplified"
            );
        }

        Ok(TracedImage {
            width,
            height,
            threshold,
            mask,
            paths,
        })
    }

    /// Cheap preview: the Otsu threshold and the foreground/background split it
    /// produces. Nothing is traced or emitted.
    #[instrument(skip(rgba))]
    pub fn analyze(rgba: &[u8], width: u32, height: u32) -> VectorizeResult<ImageAnalysis> {
        let gray = to_grayscale(rgba, width, height)?;
        let threshold = otsu_threshold(&gray);
        let foreground_count = count_foreground(&gray, threshold);
        let background_count = gray.as_raw().len() as u64 - foreground_count;
        Ok(ImageAnalysis {
            threshold,
            foreground_count,
            background_count,
        })
    }

    fn resolve_threshold(&self, gray: &GrayImage) -> u8 {
        match self.options.threshold {
            Threshold::Fixed(value) if value > 0 => value,
            _ => otsu_threshold(gray),
        }
    }
}

/// Contours of one image after thresholding, tracing and simplification,
/// together with the binary mask they were traced from.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedImage {
    width: u32,
    height: u32,
    threshold: u8,
    mask: BinaryMask,
    paths: PathList,
}

impl TracedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The threshold actually applied (after resolving automatic mode).
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// The mask the contours were traced from.
    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    pub fn paths(&self) -> &PathList {
        &self.paths
    }

    pub fn into_paths(self) -> PathList {
        self.paths
    }

    /// Serialize the contours in `format`.
    pub fn render(&self, format: OutputFormat) -> VectorizeResult<String> {
        vectorizer::render(format, &self.paths, self.width, self.height)
    }
}

/// Result of [`Vectorizer::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAnalysis {
    /// Otsu threshold (0 when the image has a single intensity).
    pub threshold: u8,
    /// Pixels darker than the threshold.
    pub foreground_count: u64,
    pub background_count: u64,
}

impl ImageAnalysis {
    /// `[threshold, foreground, background]`, the triple hosts expect.
    pub fn to_array(&self) -> [u64; 3] {
        [
            u64::from(self.threshold),
            self.foreground_count,
            self.background_count,
        ]
    }
}
