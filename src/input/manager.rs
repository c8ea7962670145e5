//! Input manager: turns files on disk into documents and job description text

use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocumentExtractor, Extraction, TextExtractor};
use crate::processing::document::Document;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Read a resume as raw bytes. The file name (not the full path) becomes
    /// the document id; type checks happen later, during request validation.
    pub async fn read_document(&self, path: &Path) -> Result<Document> {
        // Validate file exists
        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;

        // Document ids are bare file names; an unnamed path gives an empty id
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        info!("Loaded {} ({} bytes)", filename, bytes.len());
        Ok(Document::new(filename, bytes))
    }

    pub async fn read_documents(&self, paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(self.read_document(path.as_ref()).await?);
        }
        Ok(documents)
    }

    /// Extract the plain text of a job description file (txt, md or pdf)
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        // Validate file exists
        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // Detect file type
        let filename = path.to_string_lossy();
        if FileType::from_filename(&filename) == FileType::Unknown {
            return Err(RankerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        // Extract text
        info!("Extracting text from: {}", path.display());
        let bytes = fs::read(path).await?;
        let text = match DocumentExtractor.extract(&filename, &bytes) {
            Extraction::Text(text) => text,
            Extraction::Empty(reason) => {
                return Err(RankerError::InvalidInput(format!(
                    "No text in {}: {}",
                    path.display(),
                    reason
                )))
            }
        };

        // Cache the result
        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
