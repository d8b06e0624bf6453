//! Minimal single-page PDF: catalog, page tree, page and one content stream.
//!
//! PDF places the origin bottom-left, so every y is written as `height - y`.

use std::fmt::{self, Write};

use crate::geometry::PathList;

use super::{PathEmitter, drawable};

/// Single-page PDF with filled closed contours and stroked open ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfEmitter;

impl PdfEmitter {
    /// Content stream operators for every drawable path.
    fn content_stream(paths: &PathList, height: u32) -> Result<String, fmt::Error> {
        let h = f64::from(height);
        let mut content = String::new();
        content.write_str("0 0 0 rg\n")?;

        for path in drawable(paths) {
            for (i, p) in path.points().iter().enumerate() {
                let op = if i == 0 { 'm' } else { 'l' };
                writeln!(content, "{:.2} {:.2} {op}", p.x, h - p.y)?;
            }
            content.write_str(if path.is_closed() { "h f\n" } else { "S\n" })?;
        }
        Ok(content)
    }
}

impl PathEmitter for PdfEmitter {
    fn emit<W: fmt::Write>(
        &self,
        paths: &PathList,
        width: u32,
        height: u32,
        out: &mut W,
    ) -> fmt::Result {
        let content = Self::content_stream(paths, height)?;
        let mut out = ByteCounter::new(out);
        let mut offsets = Vec::with_capacity(4);

        out.write_str("%PDF-1.4\n")?;

        offsets.push(out.written);
        out.write_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        offsets.push(out.written);
        out.write_str("2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n")?;

        offsets.push(out.written);
        write!(
            out,
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] /Contents 4 0 R >>\nendobj\n"
        )?;

        offsets.push(out.written);
        write!(
            out,
            "4 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
            content.len()
        )?;

        let xref_offset = out.written;
        write!(out, "xref\n0 {}\n", offsets.len() + 1)?;
        out.write_str("0000000000 65535 f \n")?;
        for offset in &offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            offsets.len() + 1
        )
    }
}

/// Passes writes through while counting bytes, for cross-reference offsets.
struct ByteCounter<'a, W: fmt::Write> {
    inner: &'a mut W,
    written: usize,
}

impl<'a, W: fmt::Write> ByteCounter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: fmt::Write> fmt::Write for ByteCounter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s)?;
        self.written += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn startxref(pdf: &str) -> usize {
        let tail = pdf.rsplit("startxref\n").next().unwrap();
        tail.lines().next().unwrap().parse().unwrap()
    }

    #[test]
    fn empty_document_is_complete() {
        let pdf = PdfEmitter.render(&list(vec![]), 10, 10).unwrap();
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.contains("/MediaBox [0 0 10 10]"));
        assert!(pdf.contains("stream\n0 0 0 rg\nendstream"));
        assert!(pdf.contains("<< /Length 9 >>"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(!pdf.contains(" m\n"));
    }

    #[test]
    fn closed_path_is_filled_with_flipped_y() {
        let pdf = PdfEmitter.render(&list(vec![triangle()]), 8, 6).unwrap();
        assert!(pdf.contains("1.00 5.00 m\n5.00 5.00 l\n3.00 2.00 l\nh f\n"));
    }

    #[test]
    fn open_path_is_stroked() {
        let pdf = PdfEmitter.render(&list(vec![open_stroke()]), 8, 6).unwrap();
        assert!(pdf.contains("0.00 4.00 m\n7.50 3.75 l\nS\n"));
        assert!(!pdf.contains("h f"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = PdfEmitter
            .render(&list(vec![triangle(), open_stroke(), speck()]), 20, 20)
            .unwrap();

        let xref = startxref(&pdf);
        assert!(pdf[xref..].starts_with("xref\n0 5\n"));

        let entries: Vec<&str> = pdf[xref..].lines().skip(3).take(4).collect();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.len(), 19, "entry {entry:?}");
            let offset: usize = entry[..10].parse().unwrap();
            assert!(pdf[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let pdf = PdfEmitter.render(&list(vec![triangle()]), 8, 6).unwrap();
        let start = pdf.find("stream\n").unwrap() + "stream\n".len();
        let end = pdf.find("endstream").unwrap();
        let declared = format!("<< /Length {} >>", end - start);
        assert!(pdf.contains(&declared));
    }
}
