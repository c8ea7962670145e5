//! Lexical keyword-gap analysis between a job description and a resume

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lowercased whitespace tokens. Ordered, so iteration is alphabetical.
pub type TokenSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    /// Job tokens absent from the resume
    pub missing: TokenSet,
    /// Job tokens present in the resume
    pub matching: TokenSet,
    /// Share of job tokens found in the resume, 0-100
    pub match_percentage: f64,
}

/// Lowercase and split on whitespace. Punctuation stays attached to its word.
pub fn tokenize(text: &str) -> TokenSet {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn analyze(job_text: &str, resume_text: &str) -> KeywordAnalysis {
    let job_tokens = tokenize(job_text);
    let resume_tokens = tokenize(resume_text);

    let missing: TokenSet = job_tokens.difference(&resume_tokens).cloned().collect();
    let matching: TokenSet = job_tokens.intersection(&resume_tokens).cloned().collect();

    let match_percentage = if job_tokens.is_empty() {
        0.0
    } else {
        100.0 * matching.len() as f64 / job_tokens.len() as f64
    };

    KeywordAnalysis {
        missing,
        matching,
        match_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> TokenSet {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_dedupes() {
        let tokens = tokenize("Rust rust  RUST\nPython, python");
        assert_eq!(tokens, set(&["rust", "python,", "python"]));
    }

    #[test]
    fn test_half_match() {
        let analysis = analyze("python java", "python");
        assert_eq!(analysis.match_percentage, 50.0);
        assert_eq!(analysis.matching, set(&["python"]));
        assert_eq!(analysis.missing, set(&["java"]));
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let analysis = analyze("", "python java rust");
        assert_eq!(analysis.match_percentage, 0.0);
        assert!(analysis.matching.is_empty());
        assert!(analysis.missing.is_empty());

        let whitespace_only = analyze("  \n\t", "python");
        assert_eq!(whitespace_only.match_percentage, 0.0);
    }

    #[test]
    fn test_empty_resume_misses_everything() {
        let analysis = analyze("python java", "");
        assert_eq!(analysis.match_percentage, 0.0);
        assert_eq!(analysis.missing, set(&["java", "python"]));
    }

    #[test]
    fn test_developer_scenario() {
        let analysis = analyze(
            "python developer with sql experience",
            "experienced python developer",
        );
        assert_eq!(analysis.matching, set(&["python", "developer"]));
        assert_eq!(analysis.missing, set(&["with", "sql", "experience"]));
        assert_eq!(analysis.match_percentage, 40.0);
    }

    #[test]
    fn test_word_count_counts_duplicates() {
        assert_eq!(word_count("rust rust rust"), 3);
        assert_eq!(word_count(""), 0);
    }
}
