use std::fmt;

use crate::geometry::PathList;

use super::{PathEmitter, drawable};

const CREATOR: &str = env!("CARGO_PKG_NAME");

/// Encapsulated PostScript with short operator macros. Y is flipped like PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsEmitter;

impl PathEmitter for EpsEmitter {
    fn emit<W: fmt::Write>(
        &self,
        paths: &PathList,
        width: u32,
        height: u32,
        out: &mut W,
    ) -> fmt::Result {
        let h = f64::from(height);

        out.write_str("%!PS-Adobe-3.0 EPSF-3.0\n")?;
        writeln!(out, "%%BoundingBox: 0 0 {width} {height}")?;
        out.write_str("%%Title: Vectorized Image\n")?;
        writeln!(out, "%%Creator: {CREATOR}")?;
        out.write_str("%%EndComments\n\n")?;
        out.write_str("/l { lineto } def\n/m { moveto } def\n/c { closepath } def\n/f { fill } def\n\n")?;
        out.write_str("0 0 0 setrgbcolor\n\n")?;

        for path in drawable(paths) {
            out.write_str("newpath\n")?;
            for (i, p) in path.points().iter().enumerate() {
                let op = if i == 0 { 'm' } else { 'l' };
                writeln!(out, "{:.2} {:.2} {op}", p.x, h - p.y)?;
            }
            out.write_str(if path.is_closed() { "c f\n\n" } else { "stroke\n\n" })?;
        }

        out.write_str("showpage\n%%EOF\n")
    }
}
