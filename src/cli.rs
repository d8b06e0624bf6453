use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use vectrace::{DEFAULT_SIMPLIFY_TOLERANCE, DEFAULT_TURDSIZE, OutputFormat};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a bitmap into an SVG, PDF or EPS outline
    Vectorize(VectorizeCommand),
    /// Print the automatic threshold and the foreground/background split
    Analyze(AnalyzeCommand),
}

/// Output formats for the vectorized document.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Svg,
    Pdf,
    Eps,
}

impl From<FormatArg> for OutputFormat {
    /// Convert FormatArg to vectrace::OutputFormat.
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Eps => OutputFormat::Eps,
        }
    }
}

#[derive(Args, Debug)]
pub struct VectorizeCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output path (defaults to the input name with the format's extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, env = "VECTRACE_FORMAT", default_value_t = FormatArg::Svg)]
    pub format: FormatArg,
    /// Binarization threshold (1-255 or 0.0-1.0); 0 picks one automatically (Otsu)
    #[arg(short, long, default_value_t = 0, value_parser = parse_threshold)]
    pub threshold: u8,
    /// Simplification tolerance in pixels; 0 keeps every traced point
    #[arg(long, default_value_t = DEFAULT_SIMPLIFY_TOLERANCE, allow_negative_numbers = true)]
    pub tolerance: f64,
    /// Drop contours with fewer points than this (0 uses the default)
    #[arg(long, default_value_t = DEFAULT_TURDSIZE)]
    pub turdsize: usize,
    /// Save the binary mask used for tracing as a PNG
    #[arg(long = "export-mask", value_name = "PATH", num_args = 0..=1)]
    pub export_mask: Option<Option<PathBuf>>,
}

#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    /// Input image path
    pub input: PathBuf,
}

fn parse_threshold(value: &str) -> Result<u8, String> {
    if let Ok(int_value) = value.parse::<u8>() {
        return Ok(int_value);
    }

    let float_value = value
        .parse::<f32>()
        .map_err(|_| format!("threshold must be numeric (0-255 or 0.0-1.0), got `{value}`"))?;

    if (0.0..=1.0).contains(&float_value) {
        let scaled = (float_value * 255.0).round() as i32;
        return Ok(scaled.clamp(0, 255) as u8);
    }

    if float_value.fract().abs() <= f32::EPSILON && (0.0..=255.0).contains(&float_value) {
        return Ok(float_value as u8);
    }

    Err(format!(
        "threshold {value} is out of range; expected 0-255 or 0.0-1.0"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_accepts_integers_and_fractions() {
        assert_eq!(parse_threshold("0"), Ok(0));
        assert_eq!(parse_threshold("128"), Ok(128));
        assert_eq!(parse_threshold("0.5"), Ok(128));
        assert_eq!(parse_threshold("1.0"), Ok(255));
        assert_eq!(parse_threshold("200.0"), Ok(200));
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        assert!(parse_threshold("256").is_err());
        assert!(parse_threshold("12.5").is_err());
        assert!(parse_threshold("dark").is_err());
    }

    #[test]
    fn parses_vectorize_command() {
        let cli = Cli::try_parse_from([
            "vectrace",
            "vectorize",
            "in.png",
            "--format",
            "pdf",
            "--tolerance",
            "-1",
            "--export-mask",
        ])
        .unwrap();

        match cli.command {
            Commands::Vectorize(cmd) => {
                assert!(matches!(cmd.format, FormatArg::Pdf));
                assert_eq!(cmd.tolerance, -1.0);
                assert_eq!(cmd.threshold, 0);
                assert_eq!(cmd.turdsize, DEFAULT_TURDSIZE);
                assert_eq!(cmd.export_mask, Some(None));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
