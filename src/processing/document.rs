//! Document structures

use crate::processing::keywords::word_count;
use serde::{Deserialize, Serialize};

/// A submitted resume: its name and undecoded bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A document whose extractor produced non-empty text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub filename: String,
    pub text: String,
    pub word_count: usize,
}

/// A document left out of the ranking, with the extractor's reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

impl ExtractedDocument {
    pub fn new(filename: String, text: String) -> Self {
        let word_count = word_count(&text);
        Self {
            filename,
            text,
            word_count,
        }
    }
}
