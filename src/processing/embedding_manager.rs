//! Embedding model management: locating, downloading and selecting Model2Vec models

use crate::config::{AvailableModel, Config};
use crate::error::{Result, RankerError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files `model2vec-rs` needs to load a model from disk
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, AvailableModel>,
    downloaded_models: HashSet<String>,
    api: Api,
}

impl EmbeddingModelManager {
    pub async fn new(config: &Config) -> Result<Self> {
        let models_dir = config.models_dir().clone();

        // Ensure models directory exists
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                RankerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let api = Api::new()
            .map_err(|e| RankerError::ModelError(format!("Failed to initialize HF API: {}", e)))?;

        let available_models = config
            .models
            .available_models
            .iter()
            .map(|m| (m.name.clone(), m.clone()))
            .collect();

        // Scan for already downloaded models
        let mut manager = Self {
            models_dir,
            available_models,
            downloaded_models: HashSet::new(),
            api,
        };

        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            RankerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            // Only directories holding every required file count as downloaded
            if entry.file_type().await?.is_dir()
                && Self::is_valid_model_directory(&entry.path()).await
            {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a model from the Hugging Face Hub into `models_dir/<model_id>`
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| RankerError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(model_id);

        // Check if already downloaded
        if !force && self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        // Create model directory
        fs::create_dir_all(&model_dir).await.map_err(|e| {
            RankerError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let repo = self.api.repo(hf_hub::Repo::model(model_info.repo_id.clone()));

        // Download Model2Vec files; README.md is nice to have
        for file in REQUIRED_FILES.iter().chain(OPTIONAL_FILES.iter()) {
            match repo.get(file).await {
                Ok(file_path) => {
                    fs::copy(&file_path, model_dir.join(file)).await.map_err(|e| {
                        RankerError::ModelError(format!("Failed to copy {}: {}", file, e))
                    })?;
                    info!("Downloaded: {}", file);
                }
                Err(e) if OPTIONAL_FILES.contains(file) => {
                    warn!("Optional file {} not found: {}", file, e);
                }
                Err(e) => {
                    return Err(RankerError::ModelError(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
            }
        }

        // Mark as downloaded
        self.downloaded_models.insert(model_id.to_string());
        info!("Embedding model {} downloaded successfully", model_id);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.get_model_path(model_id) {
            return Ok(path);
        }

        // Model not downloaded, download it
        self.download_model(model_id, false).await
    }

    pub fn list_available_models(&self) -> Vec<&AvailableModel> {
        self.available_models.values().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.downloaded_models.iter().cloned().collect();
        models.sort();
        models
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&AvailableModel> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model id from its exact id, its Hugging Face repo id, or a case-insensitive id
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        // First check if it's a direct model ID
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        // Then a repo_id or a case-insensitive model ID
        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(id, info)| info.repo_id == input || id.to_lowercase() == input_lower)
            .map(|(id, _)| id.clone())
    }
}
