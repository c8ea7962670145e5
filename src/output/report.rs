//! Ranking report with generation metadata

use crate::processing::document::SkippedDocument;
use crate::processing::ranker::{RankedEntry, RankedResult, RankingOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,

    /// Best match first
    pub results: Vec<RankedResult>,

    /// Documents that produced no text
    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub embedding_model: String,
    pub documents_submitted: usize,
}

impl RankingReport {
    pub fn new(outcome: RankingOutcome, embedding_model: &str, processing_time_ms: u64) -> Self {
        let documents_submitted = outcome.ranked.len() + outcome.skipped.len();
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                embedding_model: embedding_model.to_string(),
                documents_submitted,
            },
            results: outcome.ranked,
            skipped: outcome.skipped,
        }
    }

    pub fn entries(&self) -> Vec<RankedEntry> {
        self.results.iter().map(RankedEntry::from).collect()
    }
}
