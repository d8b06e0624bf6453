use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum contour length used when the caller passes 0.
pub const DEFAULT_TURDSIZE: usize = 2;

/// Default Douglas-Peucker tolerance in pixels.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 1.0;

/// How the grayscale image is split into foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    /// Pick the level with Otsu's method.
    #[default]
    Auto,
    /// Use the given level; pixels darker than it become foreground.
    Fixed(u8),
}

impl From<u8> for Threshold {
    /// 0 selects automatic thresholding, any other value is used directly.
    fn from(value: u8) -> Self {
        match value {
            0 => Threshold::Auto,
            v => Threshold::Fixed(v),
        }
    }
}

/// Vector format produced by the emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg = 0,
    Pdf = 1,
    Eps = 2,
}

impl OutputFormat {
    /// Map a numeric host code to a format. Unknown codes produce SVG.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => OutputFormat::Pdf,
            2 => OutputFormat::Eps,
            _ => OutputFormat::Svg,
        }
    }

    /// Numeric code understood by hosts.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Eps => "eps",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}` (expected svg, pdf or eps)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "eps" | "ps" => Ok(OutputFormat::Eps),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Options for a single vectorization call.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizeOptions {
    pub threshold: Threshold,
    /// Douglas-Peucker tolerance in pixels; `<= 0` disables simplification.
    pub simplify_tolerance: f64,
    /// Minimum number of points for a contour to be kept; 0 selects the default.
    pub turdsize: usize,
    pub output_format: OutputFormat,
}

impl VectorizeOptions {
    /// The contour length filter actually applied.
    pub fn effective_turdsize(&self) -> usize {
        if self.turdsize == 0 {
            DEFAULT_TURDSIZE
        } else {
            self.turdsize
        }
    }

    /// Whether Douglas-Peucker runs at all.
    pub fn simplification_enabled(&self) -> bool {
        self.simplify_tolerance > 0.0
    }
}

impl Default for VectorizeOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::Auto,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            turdsize: DEFAULT_TURDSIZE,
            output_format: OutputFormat::Svg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threshold_means_auto() {
        assert_eq!(Threshold::from(0), Threshold::Auto);
        assert_eq!(Threshold::from(1), Threshold::Fixed(1));
        assert_eq!(Threshold::from(255), Threshold::Fixed(255));
    }

    #[test]
    fn format_codes_round_trip_and_fall_back_to_svg() {
        for format in [OutputFormat::Svg, OutputFormat::Pdf, OutputFormat::Eps] {
            assert_eq!(OutputFormat::from_code(format.code()), format);
        }
        assert_eq!(OutputFormat::from_code(-1), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_code(7), OutputFormat::Svg);
    }

    #[test]
    fn format_parses_names_case_insensitively() {
        assert_eq!("PDF".parse::<OutputFormat>(), Ok(OutputFormat::Pdf));
        assert_eq!(" eps ".parse::<OutputFormat>(), Ok(OutputFormat::Eps));
        assert!("png".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn zero_turdsize_uses_default() {
        let opts = VectorizeOptions {
            turdsize: 0,
            ..Default::default()
        };
        assert_eq!(opts.effective_turdsize(), DEFAULT_TURDSIZE);

        let opts = VectorizeOptions {
            turdsize: 9,
            ..Default::default()
        };
        assert_eq!(opts.effective_turdsize(), 9);
    }

    #[test]
    fn non_positive_tolerance_disables_simplification() {
        let mut opts = VectorizeOptions::default();
        assert!(opts.simplification_enabled());
        opts.simplify_tolerance = 0.0;
        assert!(!opts.simplification_enabled());
        opts.simplify_tolerance = -3.0;
        assert!(!opts.simplification_enabled());
    }
}
