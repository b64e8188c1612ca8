#[cfg(test)]
mod tests;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::chunking::Chunk;

/// Number of chunks a retriever returns unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// One indexed chunk and its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub embedding: Vec<f32>,
    pub chunk: Chunk,
}

/// In-memory similarity index over (vector, chunk) pairs.
///
/// Built once per ingestion run and serialized wholesale to a single file;
/// a new run fully replaces the prior file. There is no incremental update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorIndex {
    /// Model that produced the vectors; recorded so a mismatch is visible
    pub embedding_model: String,
    /// Dimension every entry must have
    pub dimension: usize,
    /// When this index was built
    pub created_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// A retrieved chunk with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub similarity: f32,
}

impl VectorIndex {
    #[inline]
    pub fn new(embedding_model: String, dimension: usize) -> Self {
        Self {
            embedding_model,
            dimension,
            created_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// Build an index from parallel vectors and chunks.
    #[inline]
    pub fn from_pairs(
        embedding_model: String,
        vectors: Vec<Vec<f32>>,
        chunks: Vec<Chunk>,
    ) -> Result<Self> {
        if vectors.len() != chunks.len() {
            return Err(anyhow!(
                "Vector count ({}) does not match chunk count ({})",
                vectors.len(),
                chunks.len()
            ));
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        let mut index = Self::new(embedding_model, dimension);
        for (embedding, chunk) in vectors.into_iter().zip(chunks) {
            index.add(embedding, chunk)?;
        }

        Ok(index)
    }

    /// Add one entry, rejecting vectors of the wrong dimension.
    #[inline]
    pub fn add(&mut self, embedding: Vec<f32>, chunk: Chunk) -> Result<()> {
        if embedding.len() != self.dimension {
            return Err(anyhow!(
                "Embedding dimension {} does not match index dimension {}",
                embedding.len(),
                self.dimension
            ));
        }

        self.entries.push(IndexEntry { embedding, chunk });
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact nearest-neighbor scan by cosine similarity.
    ///
    /// Results are ordered by descending similarity; equal scores keep
    /// insertion order, so identical queries always return identical sets.
    #[inline]
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimension {
            return Err(anyhow!(
                "Query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            ));
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        debug!(
            "Search returned {} results (top similarity: {:?})",
            results.len(),
            results.first().map(|r| r.similarity)
        );

        Ok(results)
    }

    /// Serialize the whole index to a single file, replacing any prior file.
    #[inline]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string(self).context("Failed to serialize index")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write index file: {}", path.display()))?;

        info!(
            "Saved index with {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Deserialize an index wholesale from its file.
    ///
    /// Callers that treat a missing file as a soft condition should check for
    /// existence first; this returns an error for any unreadable file.
    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read index file: {}", path.display()))?;
        let index: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse index file: {}", path.display()))?;

        info!(
            "Loaded index with {} entries from {}",
            index.entries.len(),
            path.display()
        );
        Ok(index)
    }
}

/// Retriever returning the top-k chunks most similar to a query vector.
#[derive(Debug, Clone)]
pub struct Retriever {
    index: VectorIndex,
    top_k: usize,
}

impl Retriever {
    #[inline]
    pub fn new(index: VectorIndex) -> Self {
        Self {
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    #[inline]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    #[inline]
    pub fn retrieve(&self, query: &[f32]) -> Result<Vec<SearchResult>> {
        self.index.search(query, self.top_k)
    }

    #[inline]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
