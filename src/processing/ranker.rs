//! Ranking aggregator: drives extraction, scoring and feedback across a batch
//! of resumes and orders the results by semantic similarity.
//!
//! Each document moves through `Pending -> Extracted | Skipped -> Scored ->
//! Reported`. A document whose extractor yields no text is skipped and the
//! batch carries on; any provider error aborts the whole request.

use crate::config::RankingConfig;
use crate::error::{Result, RankerError, ValidationError};
use crate::input::file_detector::has_accepted_extension;
use crate::input::text_extractor::{DocumentExtractor, Extraction, TextExtractor};
use crate::processing::document::{Document, ExtractedDocument, SkippedDocument};
use crate::processing::embeddings::{cosine_similarity, EmbeddingProvider};
use crate::processing::feedback::generate_feedback;
use crate::processing::keywords;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One ranking batch: a job description and the resumes to score against it
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub job_description: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub document_id: String,
    /// Raw cosine similarity against the job description
    pub similarity: f32,
    /// `similarity * 100`, rounded to two decimals
    pub score_percent: f64,
    pub match_percentage: f64,
    pub feedback: String,
}

/// Wire shape of one ranked resume: `{"resume", "score", "feedback"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub resume: String,
    pub score: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    /// Sorted by score descending; equal scores keep input order
    pub ranked: Vec<RankedResult>,
    pub skipped: Vec<SkippedDocument>,
}

enum DocumentOutcome {
    Skipped(SkippedDocument),
    Reported(RankedResult),
}

impl From<&RankedResult> for RankedEntry {
    fn from(result: &RankedResult) -> Self {
        Self {
            resume: result.document_id.clone(),
            score: result.score_percent,
            feedback: result.feedback.clone(),
        }
    }
}

impl RankRequest {
    pub fn new(job_description: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            job_description: job_description.into(),
            documents,
        }
    }

    /// Check the whole request before any work is done. One document with an
    /// unaccepted suffix rejects the entire batch.
    pub fn validate(&self, accepted_extensions: &[String]) -> std::result::Result<(), ValidationError> {
        if self.job_description.trim().is_empty() {
            return Err(ValidationError::MissingJobDescription);
        }

        if self.documents.is_empty() || self.documents.iter().all(|d| d.filename.is_empty()) {
            return Err(ValidationError::NoDocuments);
        }

        if let Some(bad) = self
            .documents
            .iter()
            .find(|d| !has_accepted_extension(&d.filename, accepted_extensions))
        {
            return Err(ValidationError::UnsupportedDocument {
                filename: bad.filename.clone(),
                accepted: accepted_extensions
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(())
    }
}

pub fn round_percent(score: f32) -> f64 {
    (score as f64 * 100.0 * 100.0).round() / 100.0
}

pub struct Ranker {
    provider: Arc<dyn EmbeddingProvider>,
    extractor: Box<dyn TextExtractor>,
    accepted_extensions: Vec<String>,
}

impl Ranker {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::from_config(provider, &RankingConfig::default())
    }

    pub fn from_config(provider: Arc<dyn EmbeddingProvider>, config: &RankingConfig) -> Self {
        Self {
            provider,
            extractor: Box::new(DocumentExtractor),
            accepted_extensions: config.accepted_extensions.clone(),
        }
    }

    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Validate, rank, and shape the results for the caller. Fails with
    /// [`RankerError::NoResumesAnalyzed`] when every document was skipped.
    pub fn rank_batch(&self, request: &RankRequest) -> Result<Vec<RankedEntry>> {
        let outcome = self.rank_request(request)?;
        Ok(outcome.ranked.iter().map(RankedEntry::from).collect())
    }

    /// Like [`Ranker::rank_batch`] but keeps skipped documents and raw scores
    pub fn rank_request(&self, request: &RankRequest) -> Result<RankingOutcome> {
        request.validate(&self.accepted_extensions)?;

        let names: Vec<&str> = request.documents.iter().map(|d| d.filename.as_str()).collect();
        info!("Received files: {:?}", names);

        let outcome = self.rank_outcome(&request.documents, &request.job_description)?;
        if outcome.ranked.is_empty() {
            return Err(RankerError::NoResumesAnalyzed);
        }

        Ok(outcome)
    }

    /// Rank documents against a job description. An empty result means
    /// every document was skipped.
    pub fn rank(&self, documents: &[Document], job_description: &str) -> Result<Vec<RankedResult>> {
        Ok(self.rank_outcome(documents, job_description)?.ranked)
    }

    pub fn rank_outcome(&self, documents: &[Document], job_description: &str) -> Result<RankingOutcome> {
        // Embed the job description once for the whole batch
        let job_embedding = self.provider.embed(job_description)?;
        debug!("Job description embedded ({} dimensions)", job_embedding.len());

        let mut outcome = RankingOutcome::default();

        for document in documents {
            match self.process_document(document, job_description, &job_embedding)? {
                DocumentOutcome::Skipped(skipped) => outcome.skipped.push(skipped),
                DocumentOutcome::Reported(result) => outcome.ranked.push(result),
            }
        }

        // slice::sort_by is stable: equal scores keep their input order
        outcome
            .ranked
            .sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        Ok(outcome)
    }

    fn process_document(
        &self,
        document: &Document,
        job_description: &str,
        job_embedding: &[f32],
    ) -> Result<DocumentOutcome> {
        // Extract text; nothing extracted means skip, not fail
        let extracted = match self.extractor.extract(&document.filename, &document.bytes) {
            Extraction::Text(text) => ExtractedDocument::new(document.filename.clone(), text),
            Extraction::Empty(reason) => {
                info!("Skipping {} (No text extracted: {})", document.filename, reason);
                return Ok(DocumentOutcome::Skipped(SkippedDocument {
                    filename: document.filename.clone(),
                    reason,
                }));
            }
        };

        // Score against the job embedding
        let resume_embedding = self.provider.embed(&extracted.text)?;
        let similarity = cosine_similarity(job_embedding, &resume_embedding)?;

        info!("Resume: {} | Score: {}", extracted.filename, similarity);

        // Explain the score
        let analysis = keywords::analyze(job_description, &extracted.text);
        let feedback = generate_feedback(&analysis, similarity, extracted.word_count);

        Ok(DocumentOutcome::Reported(RankedResult {
            document_id: extracted.filename,
            similarity,
            score_percent: round_percent(similarity),
            match_percentage: analysis.match_percentage,
            feedback,
        }))
    }
}
