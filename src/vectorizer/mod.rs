use std::fmt;

use crate::VectorizeResult;
use crate::config::OutputFormat;
use crate::geometry::{Path, PathList};

pub mod eps;
pub mod pdf;
pub mod svg;

pub use eps::EpsEmitter;
pub use pdf::PdfEmitter;
pub use svg::SvgEmitter;

/// A serializer that turns a traced path set into one vector document.
///
/// Emitters write into any [`fmt::Write`] sink, so output size is bounded only
/// by the sink. Paths with fewer than two points are skipped.
pub trait PathEmitter {
    fn emit<W: fmt::Write>(
        &self,
        paths: &PathList,
        width: u32,
        height: u32,
        out: &mut W,
    ) -> fmt::Result;

    /// Emit into a freshly allocated string.
    fn render(&self, paths: &PathList, width: u32, height: u32) -> VectorizeResult<String> {
        let mut out = String::with_capacity(estimated_len(paths));
        self.emit(paths, width, height, &mut out)?;
        Ok(out)
    }
}

/// Render `paths` in the requested format.
pub fn render(
    format: OutputFormat,
    paths: &PathList,
    width: u32,
    height: u32,
) -> VectorizeResult<String> {
    match format {
        OutputFormat::Svg => SvgEmitter.render(paths, width, height),
        OutputFormat::Pdf => PdfEmitter.render(paths, width, height),
        OutputFormat::Eps => EpsEmitter.render(paths, width, height),
    }
}

/// Paths that carry at least one segment.
fn drawable(paths: &PathList) -> impl Iterator<Item = &Path> {
    paths.iter().filter(|p| p.len() >= 2)
}

/// Rough output size: a header plus ~20 bytes per point.
fn estimated_len(paths: &PathList) -> usize {
    512 + paths.point_count() * 20
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::geometry::{Path, PathList, Point};

    pub fn triangle() -> Path {
        Path::closed(vec![
            Point::new(1.0, 1.0),
            Point::new(5.0, 1.0),
            Point::new(3.0, 4.0),
        ])
    }

    pub fn open_stroke() -> Path {
        Path::open(vec![Point::new(0.0, 2.0), Point::new(7.5, 2.25)])
    }

    pub fn speck() -> Path {
        Path::open(vec![Point::new(9.0, 9.0)])
    }

    pub fn list(paths: Vec<Path>) -> PathList {
        PathList::from(paths)
    }
}
