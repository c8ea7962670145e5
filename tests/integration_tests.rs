//! Integration tests for the resume ranker

use resume_ranker::config::RankingConfig;
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{JsonFormatter, OutputFormatter};
use resume_ranker::output::RankingReport;
use resume_ranker::{
    cosine_similarity, Document, EmbeddingProvider, RankRequest, Ranker, RankerError, Result,
    ValidationError,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Deterministic bag-of-words embedding over a fixed vocabulary
struct VocabularyProvider {
    vocabulary: BTreeMap<&'static str, usize>,
}

impl VocabularyProvider {
    fn new() -> Self {
        let words = [
            "python", "developer", "sql", "experience", "rust", "java", "backend", "data",
            "frontend", "react", "design",
        ];
        Self {
            vocabulary: words.iter().enumerate().map(|(i, w)| (*w, i)).collect(),
        }
    }
}

impl EmbeddingProvider for VocabularyProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for word in text.to_lowercase().split_whitespace() {
            if let Some(&index) = self.vocabulary.get(word) {
                vector[index] += 1.0;
            }
        }
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        "vocabulary"
    }
}

fn text_ranker() -> Ranker {
    let config = RankingConfig {
        accepted_extensions: vec!["pdf".to_string(), "txt".to_string(), "md".to_string()],
    };
    Ranker::from_config(Arc::new(VocabularyProvider::new()), &config)
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_self_similarity_through_provider() {
    let provider = VocabularyProvider::new();
    for text in ["python developer", "rust backend data sql", "react frontend design design"] {
        let v = provider.embed(text).unwrap();
        let score = cosine_similarity(&v, &v).unwrap();
        assert!((score - 1.0).abs() < 1e-6, "{} scored {}", text, score);
    }
}

#[tokio::test]
async fn test_rank_files_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_fixture(temp_dir.path(), "designer.txt", "react frontend design"),
        write_fixture(temp_dir.path(), "blank.txt", "   \n  "),
        write_fixture(temp_dir.path(), "pythonista.md", "# CV\n\nexperienced **python** developer"),
        write_fixture(temp_dir.path(), "sql.txt", "python developer with sql experience"),
    ];

    let documents = InputManager::new().read_documents(&paths).await.unwrap();
    let request = RankRequest::new("python developer with sql experience", documents);

    let outcome = text_ranker().rank_request(&request).unwrap();

    let order: Vec<&str> = outcome.ranked.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(order, vec!["sql.txt", "pythonista.md", "designer.txt"]);
    assert_eq!(outcome.ranked[0].score_percent, 100.0);
    assert_eq!(outcome.ranked[2].score_percent, 0.0);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].filename, "blank.txt");

    let pythonista = &outcome.ranked[1];
    assert_eq!(pythonista.match_percentage, 40.0);
    assert!(pythonista
        .feedback
        .contains("Try sprinkling in these words to boost your fit: experience, sql, with."));
    assert!(pythonista.feedback.contains("rocking words like developer, python."));
}

#[test]
fn test_partial_success_versus_wholesale_rejection() {
    let job = "rust backend developer";

    let with_empty = RankRequest::new(
        job,
        vec![
            Document::new("a.txt", b"rust developer".to_vec()),
            Document::new("b.txt", Vec::new()),
            Document::new("c.txt", b"backend".to_vec()),
        ],
    );
    let entries = text_ranker().rank_batch(&with_empty).unwrap();
    assert_eq!(entries.len(), 2);

    let with_bad_suffix = RankRequest::new(
        job,
        vec![
            Document::new("a.txt", b"rust developer".to_vec()),
            Document::new("b.docx", b"rust".to_vec()),
            Document::new("c.txt", b"backend".to_vec()),
        ],
    );
    let result = text_ranker().rank_batch(&with_bad_suffix);
    assert!(matches!(
        result,
        Err(RankerError::Validation(ValidationError::UnsupportedDocument { .. }))
    ));
}

#[test]
fn test_default_config_only_accepts_pdf() {
    let ranker = Ranker::new(Arc::new(VocabularyProvider::new()));
    let request = RankRequest::new("rust", vec![Document::new("cv.txt", b"rust".to_vec())]);

    let result = ranker.rank_batch(&request);
    assert!(matches!(
        result,
        Err(RankerError::Validation(ValidationError::UnsupportedDocument { ref filename, .. }))
            if filename == "cv.txt"
    ));
}

#[test]
fn test_json_report_shape() {
    let request = RankRequest::new(
        "python sql",
        vec![
            Document::new("one.txt", b"python".to_vec()),
            Document::new("two.txt", b"python sql".to_vec()),
        ],
    );
    let ranker = text_ranker();
    let outcome = ranker.rank_request(&request).unwrap();
    let report = RankingReport::new(outcome, ranker.model_name(), 0);

    let json = JsonFormatter::new(true).format_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value[0]["resume"], "two.txt");
    assert_eq!(value[0]["score"], 100.0);
    assert_eq!(value[1]["resume"], "one.txt");
    assert!(value[1]["feedback"].as_str().unwrap().contains("sql"));
}

#[tokio::test]
async fn test_job_description_extraction_from_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        temp_dir.path(),
        "job.md",
        "## Backend Engineer\n\n- **Rust**\n- SQL",
    );

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("Rust"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "job.txt", "rust developer");

    let mut manager = InputManager::new();
    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_job_file_type() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "job.xyz", "rust");

    let result = InputManager::new().extract_text(&path).await;
    assert!(matches!(result, Err(RankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_resume() {
    let manager = InputManager::new();
    let result = manager.read_document(Path::new("does/not/exist.pdf")).await;
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}
