use std::fmt;

use crate::geometry::PathList;

use super::{PathEmitter, drawable};

/// SVG document with one filled `<path>` per contour.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEmitter;

impl PathEmitter for SvgEmitter {
    fn emit<W: fmt::Write>(
        &self,
        paths: &PathList,
        width: u32,
        height: u32,
        out: &mut W,
    ) -> fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(out, r#"  <g fill="black" stroke="none">"#)?;

        for path in drawable(paths) {
            out.write_str(r#"    <path d="M"#)?;
            for (i, p) in path.points().iter().enumerate() {
                if i == 0 {
                    write!(out, "{:.2},{:.2}", p.x, p.y)?;
                } else {
                    write!(out, " L{:.2},{:.2}", p.x, p.y)?;
                }
            }
            if path.is_closed() {
                out.write_str(" Z")?;
            }
            out.write_str("\"/>\n")?;
        }

        out.write_str("  </g>\n</svg>\n")
    }
}
