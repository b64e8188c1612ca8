
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fetcher::Article;

/// A bounded-length window of article text, ready for embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// URL of the article this chunk was cut from
    pub source_url: String,
    /// Title of the source article
    pub title: String,
    /// Position of this chunk within its article
    pub chunk_index: usize,
    /// The chunk text
    pub text: String,
}

/// Configuration for article filtering and chunking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window length in characters
    pub chunk_size: usize,
    /// Characters shared between adjacent windows
    pub chunk_overlap: usize,
    /// Articles shorter than this are dropped before chunking
    pub min_document_chars: usize,
    /// Chunks shorter than this are kept but flagged
    pub short_chunk_warning: usize,
}

impl Default for ChunkingConfig {
    #[inline]
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
            min_document_chars: 200,
            short_chunk_warning: 100,
        }
    }
}

/// Drop articles whose text is too short to be worth embedding.
#[inline]
pub fn filter_articles(articles: Vec<Article>, config: &ChunkingConfig) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|article| {
            let chars = article.text.chars().count();
            if chars < config.min_document_chars {
                warn!(
                    "Dropping {} ({} chars, below the {}-char minimum)",
                    article.url, chars, config.min_document_chars
                );
                false
            } else {
                true
            }
        })
        .collect()
}

/// Split every article into overlapping windows, preserving source order.
///
/// Chunks shorter than the warning threshold are flagged but still included;
/// downstream retrieval decides whether they are useful.
#[inline]
pub fn chunk_articles(articles: &[Article], config: &ChunkingConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for article in articles {
        let windows = split_text(&article.text, config.chunk_size, config.chunk_overlap);
        debug!("Split {} into {} chunks", article.url, windows.len());

        for (chunk_index, text) in windows.into_iter().enumerate() {
            let chars = text.chars().count();
            if chars < config.short_chunk_warning {
                warn!(
                    "Chunk {} of {} is short ({} chars); keeping it anyway",
                    chunk_index, article.url, chars
                );
            }

            chunks.push(Chunk {
                source_url: article.url.clone(),
                title: article.title.clone(),
                chunk_index,
                text,
            });
        }
    }

    chunks
}

/// Fixed sliding window over characters: window `chunk_size`, stride
/// `chunk_size - chunk_overlap`. The final window holds whatever remains.
/// Boundaries depend only on the input and the two parameters, so
/// re-processing identical input yields identical chunks.
#[inline]
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    // Validated at config load; guard anyway so a bad caller cannot loop forever.
    let stride = chunk_size.saturating_sub(chunk_overlap).max(1);

    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + chunk_size).min(chars.len());
        windows.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }

    windows
}
