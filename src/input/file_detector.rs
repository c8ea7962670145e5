//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Detect from a document name such as `jane_doe.pdf`
    pub fn from_filename(filename: &str) -> Self {
        extension_of(filename)
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

// Text after the last dot; a bare `.pdf` counts as a pdf
fn extension_of(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// True when `filename` ends with `.<ext>` for one of `accepted`, ignoring case
pub fn has_accepted_extension(filename: &str, accepted: &[String]) -> bool {
    let filename = filename.to_lowercase();
    accepted
        .iter()
        .any(|ext| filename.ends_with(&format!(".{}", ext.to_lowercase())))
}
