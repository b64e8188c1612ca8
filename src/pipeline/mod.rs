#[cfg(test)]
mod tests;

use itertools::Itertools;
use std::path::PathBuf;
use tracing::info;

use crate::chunking::{self, ChunkingConfig};
use crate::config::Config;
use crate::fetcher::{self, FetcherConfig, HttpClient};
use crate::index::{DEFAULT_TOP_K, Retriever, SearchResult, VectorIndex};
use crate::openai::OpenAiClient;
use crate::ui;
use crate::{ResearchError, Result};

/// Split a newline-separated URL list, trimming whitespace and dropping
/// blank lines.
#[inline]
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts reported after a successful ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub fetched: usize,
    pub filtered_out: usize,
    pub chunks: usize,
    pub short_chunks: usize,
    pub dimension: usize,
    pub index_path: PathBuf,
}

/// URL batch in, persisted index out: fetch, filter, chunk, embed, index,
/// save. All-or-nothing: every abort path returns before any file is touched,
/// so a prior index on disk survives a failed run unchanged.
pub struct IngestionPipeline {
    client: OpenAiClient,
    chunking: ChunkingConfig,
    fetcher: FetcherConfig,
    embedding_model: String,
    index_path: PathBuf,
}

impl IngestionPipeline {
    #[inline]
    pub fn new(config: &Config) -> Self {
        Self {
            client: OpenAiClient::new(&config.openai),
            chunking: config.chunking.clone(),
            fetcher: FetcherConfig::default(),
            embedding_model: config.openai.embedding_model.clone(),
            index_path: config.storage.index_path.clone(),
        }
    }

    #[inline]
    pub fn ingest(&self, urls: &[String]) -> Result<IngestReport> {
        info!("Starting ingestion of {} URLs", urls.len());
        ui::info("Fetching and processing articles...");

        let mut http = HttpClient::new(self.fetcher.clone());
        let articles = fetcher::fetch_articles(&mut http, urls);

        if articles.is_empty() {
            return Err(ResearchError::NoDocuments);
        }
        ui::success(&format!("Loaded {} articles.", articles.len()));

        for (i, article) in articles.iter().enumerate() {
            ui::diagnostic(&format!(
                "Document {} ({}) preview: {}",
                i,
                article.url,
                ui::preview(&article.text, 500)
            ));
        }

        let fetched = articles.len();
        let articles = chunking::filter_articles(articles, &self.chunking);

        if articles.is_empty() {
            return Err(ResearchError::AllDocumentsFiltered);
        }
        let filtered_out = fetched - articles.len();
        ui::info(&format!(
            "{} articles remain after filtering.",
            articles.len()
        ));

        ui::info("Splitting text into chunks...");
        let chunks = chunking::chunk_articles(&articles, &self.chunking);
        ui::info(&format!("Split into {} chunks.", chunks.len()));

        let mut short_chunks = 0;
        for chunk in &chunks {
            let chars = chunk.text.chars().count();
            ui::diagnostic(&format!(
                "Chunk {} of {}: {} chars",
                chunk.chunk_index, chunk.source_url, chars
            ));
            if chars < self.chunking.short_chunk_warning {
                ui::warning(&format!(
                    "Chunk {} of {} is short ({} chars); keeping it.",
                    chunk.chunk_index, chunk.source_url, chars
                ));
                short_chunks += 1;
            }
        }

        ui::info("Generating embeddings...");
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = self
            .client
            .embed_batch(&texts)
            .map_err(|e| ResearchError::Embedding(e.to_string()))?;

        if vectors.is_empty() {
            return Err(ResearchError::NoEmbeddings);
        }
        ui::success(&format!("Generated {} embeddings.", vectors.len()));

        let chunk_count = chunks.len();
        let index = VectorIndex::from_pairs(self.embedding_model.clone(), vectors, chunks)?;
        let dimension = index.dimension;
        ui::success("Similarity index built.");

        index
            .save(&self.index_path)
            .map_err(|e| ResearchError::Index(e.to_string()))?;
        ui::success(&format!("Index saved to {}.", self.index_path.display()));

        Ok(IngestReport {
            fetched,
            filtered_out,
            chunks: chunk_count,
            short_chunks,
            dimension,
            index_path: self.index_path.clone(),
        })
    }
}

/// Outcome of a question against the persisted index.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Answered { answer: String, sources: Vec<String> },
    MissingIndex,
    EmptyQuestion,
}

/// Question in, answer out: load the persisted index, retrieve the chunks
/// nearest the question, and hand both to the completion model.
pub struct QueryPipeline {
    client: OpenAiClient,
    index_path: PathBuf,
    top_k: usize,
}

impl QueryPipeline {
    #[inline]
    pub fn new(config: &Config) -> Self {
        Self {
            client: OpenAiClient::new(&config.openai),
            index_path: config.storage.index_path.clone(),
            top_k: DEFAULT_TOP_K,
        }
    }

    #[inline]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    #[inline]
    pub fn ask(&self, question: &str) -> Result<QueryOutcome> {
        if !self.index_path.exists() {
            return Ok(QueryOutcome::MissingIndex);
        }

        let question = question.trim();
        if question.is_empty() {
            return Ok(QueryOutcome::EmptyQuestion);
        }

        let index = VectorIndex::load(&self.index_path)
            .map_err(|e| ResearchError::Index(e.to_string()))?;
        let retriever = Retriever::new(index).with_top_k(self.top_k);

        ui::info("Fetching response...");

        let query_vector = self
            .client
            .embed_query(question)
            .map_err(|e| ResearchError::Embedding(e.to_string()))?;
        let results = retriever.retrieve(&query_vector)?;

        info!("Retrieved {} chunks for question", results.len());

        let prompt = build_prompt(question, &results);
        let answer = self
            .client
            .complete(&prompt)
            .map_err(|e| ResearchError::Network(e.to_string()))?;

        let sources = results
            .iter()
            .map(|result| result.chunk.source_url.clone())
            .unique()
            .collect();

        Ok(QueryOutcome::Answered { answer, sources })
    }
}

/// Stuff the retrieved chunks and the question into one grounded prompt.
fn build_prompt(question: &str, results: &[SearchResult]) -> String {
    let context = results
        .iter()
        .map(|result| result.chunk.text.as_str())
        .join("\n\n");

    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try \
         to make up an answer.\n\n{}\n\nQuestion: {}\nHelpful Answer:",
        context, question
    )
}
