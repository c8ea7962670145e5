//! Templated, human-readable feedback for a scored resume.
//!
//! Feedback is five sentences joined by single spaces, always in this order:
//! keyword match tier, missing keywords, matching keywords, semantic score
//! tier, and a length comment. Tier boundaries are inclusive lower bounds.

use crate::processing::keywords::KeywordAnalysis;
use serde::{Deserialize, Serialize};

/// At most this many matching keywords are quoted back to the reader
pub const MAX_MATCHING_SHOWN: usize = 3;

pub const SHORT_RESUME_WORDS: usize = 100;
pub const LONG_RESUME_WORDS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Strong,
    Solid,
    Partial,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthAssessment {
    TooShort,
    JustRight,
    TooLong,
}

impl MatchTier {
    pub fn from_percentage(match_percentage: f64) -> Self {
        if match_percentage >= 80.0 {
            MatchTier::Excellent
        } else if match_percentage >= 50.0 {
            MatchTier::Good
        } else if match_percentage >= 20.0 {
            MatchTier::Fair
        } else {
            MatchTier::Poor
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            MatchTier::Excellent => {
                "Awesome! Your resume looks like a great fit for this job based on keywords."
            }
            MatchTier::Good => {
                "Nice work! Your resume is on the right track with keywords, but we can make it even better."
            }
            MatchTier::Fair => {
                "You've got a start with keywords, but your resume could use some extra love to match this job."
            }
            MatchTier::Poor => {
                "It looks like your resume might need more tailoring to match the job's keywords."
            }
        }
    }
}

impl ScoreTier {
    /// `similarity` is the raw cosine score; tiers are cut on its percentage
    pub fn from_similarity(similarity: f32) -> Self {
        let score_percentage = similarity as f64 * 100.0;
        if score_percentage >= 80.0 {
            ScoreTier::Strong
        } else if score_percentage >= 60.0 {
            ScoreTier::Solid
        } else if score_percentage >= 40.0 {
            ScoreTier::Partial
        } else {
            ScoreTier::Weak
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            ScoreTier::Strong => {
                "Fantastic! The deeper analysis shows your resume is a super strong match for this role."
            }
            ScoreTier::Solid => {
                "Good news! The analysis suggests your resume is a solid fit, with a little room to shine brighter."
            }
            ScoreTier::Partial => {
                "Not bad! The analysis sees some connection to the job, but tweaking it could lift your score."
            }
            ScoreTier::Weak => {
                "Heads up! The deeper analysis thinks your resume could use more work to align with this job."
            }
        }
    }
}

impl LengthAssessment {
    pub fn from_word_count(word_count: usize) -> Self {
        if word_count < SHORT_RESUME_WORDS {
            LengthAssessment::TooShort
        } else if word_count > LONG_RESUME_WORDS {
            LengthAssessment::TooLong
        } else {
            LengthAssessment::JustRight
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            LengthAssessment::TooShort => {
                "Your resume's a little short. Adding more details could help it stand out!"
            }
            LengthAssessment::TooLong => {
                "Your resume's pretty long. Shortening it a bit might make it easier to read."
            }
            LengthAssessment::JustRight => "The length of your resume feels just right. Nice balance!",
        }
    }
}

fn missing_keywords_sentence(analysis: &KeywordAnalysis) -> String {
    if analysis.missing.is_empty() {
        "You've nailed it! No important words are missing from the job description.".to_string()
    } else {
        let missing: Vec<&str> = analysis.missing.iter().map(String::as_str).collect();
        format!(
            "Try sprinkling in these words to boost your fit: {}.",
            missing.join(", ")
        )
    }
}

fn matching_keywords_sentence(analysis: &KeywordAnalysis) -> String {
    if analysis.matching.is_empty() {
        "We couldn't find any key words from the job in your resume yet.".to_string()
    } else {
        let shown: Vec<&str> = analysis
            .matching
            .iter()
            .take(MAX_MATCHING_SHOWN)
            .map(String::as_str)
            .collect();
        format!("You're already rocking words like {}. Keep it up!", shown.join(", "))
    }
}

/// Build the five-sentence feedback for one resume
pub fn generate_feedback(analysis: &KeywordAnalysis, similarity: f32, resume_word_count: usize) -> String {
    let parts = [
        MatchTier::from_percentage(analysis.match_percentage)
            .sentence()
            .to_string(),
        missing_keywords_sentence(analysis),
        matching_keywords_sentence(analysis),
        ScoreTier::from_similarity(similarity).sentence().to_string(),
        LengthAssessment::from_word_count(resume_word_count)
            .sentence()
            .to_string(),
    ];

    parts.join(" ")
}
