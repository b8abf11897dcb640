//! Résumé text extraction boundary.
//!
//! Extraction is best-effort: a document the library cannot read produces an
//! empty string and a logged diagnostic, never an error the caller must
//! handle. Callers decide what an empty result means for them.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

/// Turns raw uploaded document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> String;
}

/// PDF text extraction backed by the `pdf-extract` crate.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        // pdf-extract can panic on malformed cross-reference tables, so the
        // unwind is contained here together with ordinary parse errors.
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("PDF text extraction failed: {e}");
                String::new()
            }
            Err(_) => {
                warn!("PDF text extraction panicked on malformed input");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_yield_empty_string() {
        let extractor = PdfExtractor;
        assert_eq!(extractor.extract(b"this is not a pdf"), "");
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        let extractor = PdfExtractor;
        assert_eq!(extractor.extract(&[]), "");
    }
}
