//! Ranking engine: keyword analysis, embeddings, feedback and ranking

pub mod document;
pub mod keywords;
pub mod embeddings;
pub mod embedding_manager;
pub mod feedback;
pub mod ranker;
