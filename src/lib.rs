//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{RankerError, Result, ValidationError};
pub use processing::document::Document;
pub use processing::embeddings::{cosine_similarity, EmbeddingProvider, Model2VecProvider};
pub use processing::ranker::{RankRequest, RankedEntry, RankedResult, Ranker};
