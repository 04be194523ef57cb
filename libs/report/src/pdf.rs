//! A4 PDF rendering of a [`ReportDocument`] with the built-in Helvetica faces.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::BufWriter;

use crate::document::{Align, Block, ReportDocument};
use crate::error::ReportError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;
const PARAGRAPH_SIZE: f32 = 10.0;

struct Cursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Cursor {
    fn ensure_room(&mut self, height: f32) {
        if self.y - height >= MARGIN {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn write_lines(&mut self, text: &str, size: f32, bold: bool, align: Align) {
        let line_height = size * PT_TO_MM * 1.4;
        let max_chars = max_chars_per_line(size);
        for line in wrap_text(text, max_chars) {
            self.ensure_room(line_height);
            self.y -= line_height;
            let x = match align {
                Align::Left => MARGIN,
                Align::Center => centered_x(&line, size),
            };
            let font = if bold { &self.bold } else { &self.regular };
            self.layer.use_text(line, size, Mm(x), Mm(self.y), font);
        }
    }
}

/// Renders the document to PDF bytes. Content flows onto new pages as needed.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(
        &document.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Page 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Font(e.to_string()))?;

    let mut cursor = Cursor {
        doc,
        layer,
        regular,
        bold,
        y: PAGE_HEIGHT - MARGIN,
        pages: 1,
    };

    for block in &document.blocks {
        match block {
            Block::Heading { text, level, align } => {
                let size = heading_size(*level);
                cursor.y -= size * PT_TO_MM * 0.6;
                cursor.write_lines(text, size, true, *align);
            }
            Block::Paragraph { text, align } => {
                cursor.write_lines(text, PARAGRAPH_SIZE, false, *align);
            }
            Block::Spacer => {
                let gap = PARAGRAPH_SIZE * PT_TO_MM * 1.4;
                cursor.ensure_room(gap);
                cursor.y -= gap;
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    cursor
        .doc
        .save(&mut buf)
        .map_err(|e| ReportError::Write(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ReportError::Write(e.to_string()))
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 16.0,
        2 => 13.0,
        _ => 11.0,
    }
}

fn max_chars_per_line(size: f32) -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    (usable / (size * PT_TO_MM * GLYPH_WIDTH_RATIO)).floor().max(10.0) as usize
}

fn centered_x(line: &str, size: f32) -> f32 {
    let width = line.chars().count() as f32 * size * PT_TO_MM * GLYPH_WIDTH_RATIO;
    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
}

/// Greedy word wrap; explicit newlines always break, blank lines are kept.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let needed = current.chars().count()
                + word.chars().count()
                + usize::from(!current.is_empty());
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
