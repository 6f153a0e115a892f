//! PDF → DOCX: lossy text-only conversion. The extracted plain text is
//! split on blank-line boundaries; each block becomes one DOCX paragraph.
//! Layout, formatting, and embedded images of the source are not preserved.

use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run};

use reformat_core::{AppError, AppResult};

/// Split extracted text into paragraph blocks on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn convert(text: &str, output: &Path) -> AppResult<()> {
    let mut doc = Docx::new();
    for block in split_paragraphs(text) {
        doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(block)));
    }

    let file = File::create(output)?;
    doc.build()
        .pack(file)
        .map_err(|e| AppError::conversion(format!("DOCX write failed: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let text = "First block\nstill first\n\nSecond block\n\n\n  \n\nThird";
        assert_eq!(
            split_paragraphs(text),
            vec!["First block\nstill first", "Second block", "Third"]
        );
    }

    #[test]
    fn test_empty_text_yields_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.docx");
        convert("", &output).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_blocks_become_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.docx");
        convert("one\n\ntwo", &output).unwrap();

        let paragraphs = crate::converters::docx_pdf::read_paragraphs(&output).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "one");
        assert_eq!(paragraphs[1].text, "two");
    }
}
