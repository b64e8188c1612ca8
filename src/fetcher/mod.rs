pub mod extractor;


use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use ureq::Agent;
use url::Url;

use self::extractor::extract_article;

/// A fetched article: extracted text plus its source URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Configuration for article fetching
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent string to use for requests
    pub user_agent: String,
    /// Timeout for HTTP requests in seconds
    pub timeout_seconds: u64,
    /// Rate limit delay between requests in milliseconds
    pub rate_limit_ms: u64,
    /// Maximum number of retry attempts for retryable errors
    pub max_retries: u32,
    /// Delay between retry attempts in seconds
    pub retry_delay_seconds: u64,
}

impl Default for FetcherConfig {
    #[inline]
    fn default() -> Self {
        Self {
            user_agent: "scheme-research/0.1.0 (Article Research Tool)".to_string(),
            timeout_seconds: 30,
            rate_limit_ms: 250,
            max_retries: 3,
            retry_delay_seconds: 2,
        }
    }
}

/// HTTP client wrapper with rate limiting and retry logic
#[derive(Debug)]
pub struct HttpClient {
    agent: Agent,
    config: FetcherConfig,
    last_request_time: Option<Instant>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    #[inline]
    pub fn new(config: FetcherConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .user_agent(&config.user_agent)
            .build()
            .into();

        Self {
            agent,
            config,
            last_request_time: None,
        }
    }

    /// Perform an HTTP GET request with rate limiting and retry logic
    #[inline]
    pub fn get(&mut self, url: &str) -> Result<String> {
        self.apply_rate_limit();

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                debug!("Retrying request to {} (attempt {})", url, attempt + 1);
                std::thread::sleep(Duration::from_secs(self.config.retry_delay_seconds));
            }

            match self.try_get(url) {
                Ok(response) => {
                    debug!("Successfully fetched {} (attempt {})", url, attempt + 1);
                    self.last_request_time = Some(Instant::now());
                    return Ok(response);
                }
                Err(e) if is_retryable_error(&e) && attempt < self.config.max_retries => {
                    warn!("Retryable error for {}: {}", url, e);
                    last_error = Some(e);
                }
                Err(e) => {
                    self.last_request_time = Some(Instant::now());
                    return Err(e);
                }
            }
        }

        self.last_request_time = Some(Instant::now());
        Err(last_error.unwrap_or_else(|| anyhow!("All retry attempts failed")))
    }

    /// Apply rate limiting by sleeping if necessary
    fn apply_rate_limit(&mut self) {
        if let Some(last_time) = self.last_request_time {
            let elapsed = last_time.elapsed();
            let min_gap = Duration::from_millis(self.config.rate_limit_ms);
            if elapsed < min_gap {
                std::thread::sleep(min_gap - elapsed);
            }
        }
    }

    fn try_get(&self, url: &str) -> Result<String> {
        debug!("Making HTTP GET request to: {}", url);

        match self.agent.get(url).call() {
            Ok(mut response) => {
                let text = response
                    .body_mut()
                    .read_to_string()
                    .with_context(|| format!("Failed to read response body from {}", url))?;
                debug!("Successfully read {} bytes from {}", text.len(), url);
                Ok(text)
            }
            Err(ureq::Error::StatusCode(code)) => {
                debug!("HTTP request failed with status {}: {}", code, url);
                Err(anyhow!("HTTP error {}", code))
            }
            Err(e) => {
                debug!("HTTP request failed with transport error: {}", e);
                Err(anyhow::Error::from(e))
                    .with_context(|| format!("Failed to make HTTP request to {}", url))
            }
        }
    }
}

impl Default for HttpClient {
    /// Create a new HTTP client with default configuration
    #[inline]
    fn default() -> Self {
        Self::new(FetcherConfig::default())
    }
}

fn is_retryable_error(error: &anyhow::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    // Network timeouts and connection errors
    if error_str.contains("timeout")
        || error_str.contains("connection")
        || error_str.contains("network")
    {
        return true;
    }

    // HTTP 5xx server errors are retryable
    if error_str.contains("http error 5") {
        return true;
    }

    // HTTP 429 (rate limiting) is retryable
    if error_str.contains("http error 429") {
        return true;
    }

    false
}

/// Validate and normalize a URL
#[inline]
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str).with_context(|| format!("Invalid URL format: {}", url_str))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("URL must use HTTP or HTTPS scheme: {}", url_str));
    }

    if url.host_str().is_none() {
        return Err(anyhow!("URL must have a valid host: {}", url_str));
    }

    Ok(url)
}

/// Fetch every URL in the batch and extract its article text.
///
/// A URL that fails to fetch, or whose page yields no text, is skipped; the
/// caller decides what an empty result set means.
#[inline]
pub fn fetch_articles(client: &mut HttpClient, urls: &[String]) -> Vec<Article> {
    let bar = if console::user_attended_stderr() {
        ProgressBar::new(urls.len() as u64).with_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] Fetching {msg}")
                .expect("style template is valid"),
        )
    } else {
        ProgressBar::hidden()
    };

    let mut articles = Vec::new();

    for url in urls {
        bar.set_message(url.clone());

        match fetch_article(client, url) {
            Ok(article) => {
                info!(
                    "Fetched {} ({} chars): {}",
                    article.url,
                    article.text.chars().count(),
                    article.title
                );
                articles.push(article);
            }
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
            }
        }

        bar.inc(1);
    }

    bar.finish_and_clear();
    articles
}

fn fetch_article(client: &mut HttpClient, url: &str) -> Result<Article> {
    let parsed = validate_url(url)?;

    let html = client.get(parsed.as_str())?;
    let extracted = extract_article(&html)?;

    if extracted.text.trim().is_empty() {
        return Err(anyhow!("Page yielded no textual content"));
    }

    Ok(Article {
        url: parsed.to_string(),
        title: extracted.title,
        text: extracted.text,
    })
}
