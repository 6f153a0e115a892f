//! DOCX → PDF: walk the paragraph/run structure and reproduce it as text,
//! one block per paragraph, with best-effort bold/italic styling.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use reformat_core::{AppError, AppResult};

use crate::converters::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::options::ConvertOptions;

/// One extracted paragraph with its effective styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphText {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// Read a DOCX and flatten it into styled paragraph texts.
///
/// Styling is best-effort: a paragraph is bold/italic if any of its runs
/// is. Empty paragraphs are dropped.
pub fn read_paragraphs(input: &Path) -> AppResult<Vec<ParagraphText>> {
    let buf = std::fs::read(input)?;
    let doc = read_docx(&buf)
        .map_err(|e| AppError::conversion(format!("DOCX parse failed: {e:?}")))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        let DocumentChild::Paragraph(para) = child else {
            continue;
        };
        let mut text = String::new();
        let mut bold = false;
        let mut italic = false;
        for pc in para.children {
            let ParagraphChild::Run(run) = pc else {
                continue;
            };
            bold |= run.run_property.bold.is_some();
            italic |= run.run_property.italic.is_some();
            for rc in run.children {
                if let RunChild::Text(t) = rc {
                    text.push_str(&t.text);
                }
            }
        }
        if !text.trim().is_empty() {
            paragraphs.push(ParagraphText {
                text: text.trim().to_string(),
                bold,
                italic,
            });
        }
    }
    Ok(paragraphs)
}

pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let paragraphs = read_paragraphs(input)?;

    let (doc, page, layer) = PdfDocument::new(
        "Converted document",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let fonts = FontSet::load(&doc, &options.font_name)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let usable_width = PAGE_WIDTH_MM - 2.0 * options.margin_left;
    let max_chars = max_chars_per_line(usable_width, options.font_size);
    let mut y = PAGE_HEIGHT_MM - options.margin_top - options.line_height;

    for para in &paragraphs {
        let font = fonts.select(para.bold, para.italic);
        for line in wrap(&para.text, max_chars) {
            if y < options.margin_top {
                let (p, l) =
                    doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
                layer = doc.get_page(p).get_layer(l);
                y = PAGE_HEIGHT_MM - options.margin_top - options.line_height;
            }
            write_line(&layer, &line, font, options, y);
            y -= options.line_height;
        }
        // Paragraph spacing, as half a line.
        y -= options.line_height * 0.5;
    }

    let file = File::create(output)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| AppError::conversion(format!("PDF write failed: {e}")))?;

    Ok(())
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &printpdf::PdfDocumentReference, font_name: &str) -> AppResult<Self> {
        let add = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| AppError::conversion(format!("font load failed: {e}")))
        };
        let [regular, bold, italic, bold_italic] = builtin_family(font_name);
        Ok(Self {
            regular: add(regular)?,
            bold: add(bold)?,
            italic: add(italic)?,
            bold_italic: add(bold_italic)?,
        })
    }

    fn select(&self, bold: bool, italic: bool) -> &IndirectFontRef {
        match (bold, italic) {
            (true, true) => &self.bold_italic,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (false, false) => &self.regular,
        }
    }
}

/// Resolve a font name to [regular, bold, italic, bold-italic] builtins.
/// Unknown names fall back to Helvetica.
fn builtin_family(name: &str) -> [BuiltinFont; 4] {
    match name.to_ascii_lowercase().as_str() {
        "times" | "times-roman" => [
            BuiltinFont::TimesRoman,
            BuiltinFont::TimesBold,
            BuiltinFont::TimesItalic,
            BuiltinFont::TimesBoldItalic,
        ],
        "courier" => [
            BuiltinFont::Courier,
            BuiltinFont::CourierBold,
            BuiltinFont::CourierOblique,
            BuiltinFont::CourierBoldOblique,
        ],
        _ => [
            BuiltinFont::Helvetica,
            BuiltinFont::HelveticaBold,
            BuiltinFont::HelveticaOblique,
            BuiltinFont::HelveticaBoldOblique,
        ],
    }
}

fn write_line(
    layer: &PdfLayerReference,
    line: &str,
    font: &IndirectFontRef,
    options: &ConvertOptions,
    y: f64,
) {
    layer.use_text(
        line,
        options.font_size as f32,
        Mm(options.margin_left as f32),
        Mm(y as f32),
        font,
    );
}

// Helvetica has no kerning tables here; approximate the average glyph
// advance as 0.55 em and derive a character budget per line.
fn max_chars_per_line(usable_width_mm: f64, font_size_pt: f64) -> usize {
    let char_width_mm = font_size_pt * 0.55 * 25.4 / 72.0;
    ((usable_width_mm / char_width_mm) as usize).max(1)
}

/// Greedy word wrap; words longer than the budget get a line of their own.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    fn write_sample_docx(path: &Path) {
        let file = File::create(path).unwrap();
        Docx::new()
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text("First paragraph").bold()),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Second paragraph")))
            .build()
            .pack(file)
            .unwrap();
    }

    #[test]
    fn test_read_paragraphs_preserves_structure_and_style() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        write_sample_docx(&input);

        let paragraphs = read_paragraphs(&input).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "First paragraph");
        assert!(paragraphs[0].bold);
        assert!(!paragraphs[1].bold);
    }

    #[test]
    fn test_two_paragraph_docx_becomes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        let output = dir.path().join("output.pdf");
        write_sample_docx(&input);

        convert(&input, &output, &ConvertOptions::default()).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_document_spans_multiple_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("long.docx");
        let output = dir.path().join("output.pdf");

        let file = File::create(&input).unwrap();
        let mut docx = Docx::new();
        for i in 0..120 {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(format!("Paragraph number {i}"))),
            );
        }
        docx.build().pack(file).unwrap();

        convert(&input, &output, &ConvertOptions::default()).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_builtin_family_resolution() {
        assert!(matches!(builtin_family("times")[0], BuiltinFont::TimesRoman));
        assert!(matches!(builtin_family("Courier")[1], BuiltinFont::CourierBold));
        // Unknown names fall back to Helvetica.
        assert!(matches!(builtin_family("comic-sans")[0], BuiltinFont::Helvetica));
    }

    #[test]
    fn test_convert_with_times_font() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        let output = dir.path().join("output.pdf");
        write_sample_docx(&input);

        let mut options = ConvertOptions::default();
        options.font_name = "times".to_string();
        convert(&input, &output, &options).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_malformed_docx_is_a_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        std::fs::write(&input, b"not a zip archive").unwrap();

        let err = convert(
            &input,
            &dir.path().join("output.pdf"),
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind, reformat_core::error::ErrorKind::Conversion);
    }

    #[test]
    fn test_wrap_greedy() {
        assert_eq!(wrap("a b c", 3), vec!["a b", "c"]);
        assert_eq!(wrap("longword", 3), vec!["longword"]);
        assert!(wrap("", 10).is_empty());
    }
}
