//! Minimal PDF writer: just enough of the format for paginated text-and-table
//! reports. Pages are composed in millimetres from the top-left corner,
//! matching the layout arithmetic in `report`; coordinates convert to PDF
//! points (origin bottom-left) at emission time.

use crate::error::{PipelineError, PipelineResult};

const PT_PER_MM: f64 = 72.0 / 25.4;

/// A4 portrait
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Base-14 font faces available to the report (no embedding)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Approximate advance width of one glyph at the given size, in mm.
    /// Half an em is close enough for layout decisions on Helvetica text.
    pub fn char_width_mm(self, size: f64) -> f64 {
        size * 0.5 / PT_PER_MM
    }
}

/// RGB color with 0-255 components
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn operands(self) -> String {
        format!(
            "{:.3} {:.3} {:.3}",
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0
        )
    }
}

/// An in-progress document: one content stream per page
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self {
            pages: vec![String::new()],
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(String::new());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Approximate rendered width of a line, in mm
    pub fn text_width_mm(&self, text: &str, font: Font, size: f64) -> f64 {
        text.chars().count() as f64 * font.char_width_mm(size)
    }

    /// Draw one line of text with its baseline at (x, y) mm from the top-left
    pub fn draw_text(
        &mut self,
        text: &str,
        x_mm: f64,
        y_mm: f64,
        font: Font,
        size: f64,
        color: Rgb,
    ) -> PipelineResult<()> {
        let encoded = encode_win_ansi(text)?;
        let x = x_mm * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - y_mm) * PT_PER_MM;
        let ops = format!(
            "BT /{} {} Tf {} rg {:.2} {:.2} Td ({}) Tj ET\n",
            font.resource(),
            size,
            color.operands(),
            x,
            y,
            encoded
        );
        self.current_page().push_str(&ops);
        Ok(())
    }

    /// Fill a rectangle whose top-left corner is at (x, y) mm
    pub fn fill_rect(&mut self, x_mm: f64, y_mm: f64, w_mm: f64, h_mm: f64, color: Rgb) {
        let ops = format!(
            "{} rg {:.2} {:.2} {:.2} {:.2} re f\n",
            color.operands(),
            x_mm * PT_PER_MM,
            (PAGE_HEIGHT_MM - y_mm - h_mm) * PT_PER_MM,
            w_mm * PT_PER_MM,
            h_mm * PT_PER_MM
        );
        self.current_page().push_str(&ops);
    }

    /// Stroke a rectangle outline whose top-left corner is at (x, y) mm
    pub fn stroke_rect(&mut self, x_mm: f64, y_mm: f64, w_mm: f64, h_mm: f64, color: Rgb) {
        let ops = format!(
            "{} RG 0.5 w {:.2} {:.2} {:.2} {:.2} re S\n",
            color.operands(),
            x_mm * PT_PER_MM,
            (PAGE_HEIGHT_MM - y_mm - h_mm) * PT_PER_MM,
            w_mm * PT_PER_MM,
            h_mm * PT_PER_MM
        );
        self.current_page().push_str(&ops);
    }

    /// Serialize to PDF bytes: header, objects, single xref table, trailer
    pub fn render(&self) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();
        let page_object_base = 5;

        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", page_object_base + 2 * i))
            .collect();

        objects.push("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string());
        objects.push(format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            self.pages.len()
        ));
        objects.push(
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>\nendobj\n"
                .to_string(),
        );
        objects.push(
            "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold \
             /Encoding /WinAnsiEncoding >>\nendobj\n"
                .to_string(),
        );

        for (i, content) in self.pages.iter().enumerate() {
            let page_id = page_object_base + 2 * i;
            let content_id = page_id + 1;
            objects.push(format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R \
                 /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> \
                 /Contents {} 0 R >>\nendobj\n",
                page_id,
                PAGE_WIDTH_MM * PT_PER_MM,
                PAGE_HEIGHT_MM * PT_PER_MM,
                content_id
            ));
            objects.push(format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
                content_id,
                content.len(),
                content
            ));
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for object in &objects {
            offsets.push(out.len());
            out.extend_from_slice(object.as_bytes());
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }

    fn current_page(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode text for a WinAnsi string literal. Characters outside the
/// Latin-1 range cannot be represented and fail the export.
fn encode_win_ansi(text: &str) -> PipelineResult<String> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(c),
            '\u{00A0}'..='\u{00FF}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => {
                return Err(PipelineError::Export(format!(
                    "character {:?} cannot be rendered in the report",
                    c
                )));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_string_delimiters() {
        assert_eq!(encode_win_ansi("a (b) c\\d").unwrap(), "a \\(b\\) c\\\\d");
    }

    #[test]
    fn test_latin1_characters_encode_as_octal() {
        assert_eq!(encode_win_ansi("café").unwrap(), "caf\\351");
    }

    #[test]
    fn test_unencodable_character_is_export_error() {
        let err = encode_win_ansi("日本語").unwrap_err();
        assert_eq!(err.kind(), "EXPORT_FAILED");
    }

    #[test]
    fn test_render_produces_well_formed_shell() {
        let mut doc = PdfDocument::new();
        doc.draw_text("Hello", 20.0, 20.0, Font::Helvetica, 10.0, Rgb(0, 0, 0))
            .unwrap();
        let bytes = doc.render();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("(Hello) Tj"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_pages_become_page_objects() {
        let mut doc = PdfDocument::new();
        doc.add_page();
        doc.add_page();
        let text = String::from_utf8_lossy(&doc.render()).into_owned();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(text.matches("/Type /Page ").count(), 3);
        assert!(text.contains("/Count 3"));
    }
}
