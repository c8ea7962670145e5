//! Embedding provider and cosine similarity scoring

use crate::config::Config;
use crate::error::{Result, RankerError};
use crate::processing::embedding_manager::EmbeddingModelManager;
use anyhow::Context;
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Maps text to a fixed-dimension dense vector.
///
/// A provider is built once per process and shared read-only between
/// ranking requests, hence `Send + Sync` and `&self` receivers.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn model_name(&self) -> &str;
}

/// Model2Vec static embeddings loaded from a local model directory
pub struct Model2VecProvider {
    model: StaticModel,
    model_name: String,
}

impl Model2VecProvider {
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }

    /// Resolve the requested (or default) model, downloading it if needed, and load it
    pub async fn from_config(config: &Config, model: Option<&str>) -> Result<Self> {
        let requested = model.unwrap_or(&config.models.default_embedding_model);

        let mut manager = EmbeddingModelManager::new(config).await?;
        let model_id = manager
            .resolve_model_id(requested)
            .ok_or_else(|| RankerError::ModelNotFound(requested.to_string()))?;
        let model_path = manager.ensure_model_available(&model_id).await?;

        Self::load(&model_path, &model_id)
    }
}

impl EmbeddingProvider for Model2VecProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(RankerError::Embedding(format!(
                "Model {} produced an empty embedding",
                self.model_name
            )));
        }
        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine of the angle between `a` and `b`.
///
/// Vectors of different length are a provider contract violation and are
/// rejected rather than truncated. A zero-magnitude vector scores 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RankerError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
