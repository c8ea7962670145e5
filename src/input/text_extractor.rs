//! Text extraction from raw document bytes

use crate::input::file_detector::FileType;
use log::{debug, warn};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of pulling plain text out of a document.
///
/// Extraction never fails with an error value: a document that yields no text
/// is reported as [`Extraction::Empty`] and the ranker skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Empty(String),
}

impl Extraction {
    /// Trim the extracted text and fold whitespace-only output into `Empty`
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Extraction::Empty("no text extracted".to_string())
        } else {
            Extraction::Text(trimmed.to_string())
        }
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Extraction;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Extraction {
        // pdf-extract panics on some malformed inputs
        let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match result {
            Ok(Ok(text)) => Extraction::from_text(&text),
            Ok(Err(e)) => {
                warn!("Error reading file {}: {}", filename, e);
                Extraction::Empty(format!("failed to extract text from PDF: {}", e))
            }
            Err(_) => {
                warn!("PDF parser aborted on {}", filename);
                Extraction::Empty("PDF parser aborted on malformed input".to_string())
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, _filename: &str, bytes: &[u8]) -> Extraction {
        Extraction::from_text(&String::from_utf8_lossy(bytes))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, _filename: &str, bytes: &[u8]) -> Extraction {
        let markdown_content = String::from_utf8_lossy(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Extraction::from_text(&self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        static TAG_RE: OnceLock<Regex> = OnceLock::new();
        let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = tag_re.replace_all(&text, "");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Routes a document to the extractor matching its file name
#[derive(Default)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Extraction {
        match FileType::from_filename(filename) {
            FileType::Pdf => PdfExtractor.extract(filename, bytes),
            FileType::Text => PlainTextExtractor.extract(filename, bytes),
            FileType::Markdown => MarkdownExtractor.extract(filename, bytes),
            FileType::Unknown => {
                debug!("No extractor for {}", filename);
                Extraction::Empty(format!("unsupported file type: {}", filename))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed() {
        let extraction = PlainTextExtractor.extract("a.txt", b"  Rust developer \n");
        assert_eq!(extraction, Extraction::Text("Rust developer".to_string()));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let extraction = PlainTextExtractor.extract("a.txt", b" \n\t ");
        assert!(matches!(extraction, Extraction::Empty(_)));
    }

    #[test]
    fn test_markdown_formatting_is_stripped() {
        let md = b"# Jane Doe\n\n## Skills\n\n**Rust** and *Python* &amp; SQL";
        let Extraction::Text(text) = MarkdownExtractor.extract("resume.md", md) else {
            panic!("markdown with content should yield text");
        };

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Rust"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_garbage_pdf_is_empty_not_error() {
        let extraction = PdfExtractor.extract("broken.pdf", b"definitely not a pdf");
        assert!(matches!(extraction, Extraction::Empty(_)));
    }

    #[test]
    fn test_dispatch_by_filename() {
        let extractor = DocumentExtractor;
        assert_eq!(
            extractor.extract("cv.txt", b"python"),
            Extraction::Text("python".to_string())
        );
        assert!(matches!(extractor.extract("cv.docx", b"python"), Extraction::Empty(_)));
    }
}
