use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No content could be extracted from the provided URLs")]
    NoDocuments,

    #[error("All fetched articles are too short to index")]
    AllDocumentsFiltered,

    #[error("The embedding service returned no vectors")]
    NoEmbeddings,

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod chunking;
pub mod commands;
pub mod config;
pub mod fetcher;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod shell;
pub mod ui;
