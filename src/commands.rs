use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::pipeline::{IngestionPipeline, QueryOutcome, QueryPipeline, parse_url_list};
use crate::shell;
use crate::ui;
use crate::{ResearchError, Result};

fn load_config(config_path: &Path) -> Result<Config> {
    Config::load(config_path).map_err(|e| ResearchError::Config(e.to_string()))
}

/// Run the ingestion pipeline over URLs given as arguments and/or a
/// newline-separated input file.
#[inline]
pub fn process(config_path: &Path, urls: Vec<String>, input: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;

    let mut list: Vec<String> = urls
        .iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if let Some(path) = input {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read URL list: {}", path.display()))?;
        list.extend(parse_url_list(&content));
    }

    if list.is_empty() {
        ui::warning("No URLs provided.");
        return Ok(());
    }

    info!("Processing {} URLs", list.len());
    let report = match IngestionPipeline::new(&config).ingest(&list) {
        Ok(report) => report,
        Err(e) => {
            ui::error(&e.to_string());
            return Err(e);
        }
    };

    println!(
        "Indexed {} chunks from {} articles ({} fetched, {} filtered out, {} short chunks).",
        report.chunks,
        report.fetched - report.filtered_out,
        report.fetched,
        report.filtered_out,
        report.short_chunks
    );
    println!("Index file: {}", report.index_path.display());

    Ok(())
}

/// Answer a single question against the persisted index.
#[inline]
pub fn ask(config_path: &Path, question: &str) -> Result<()> {
    let config = load_config(config_path)?;

    let outcome = match QueryPipeline::new(&config).ask(question) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::error(&e.to_string());
            return Err(e);
        }
    };

    match outcome {
        QueryOutcome::Answered { answer, sources } => {
            println!("{}", answer);
            for source in sources {
                ui::diagnostic(&format!("Source: {}", source));
            }
        }
        QueryOutcome::MissingIndex => {
            ui::warning(&format!(
                "No index found at {}. Run `scheme-research process` first.",
                config.index_path().display()
            ));
        }
        QueryOutcome::EmptyQuestion => {
            ui::warning("Please enter a question.");
        }
    }

    Ok(())
}

/// Start the interactive shell.
#[inline]
pub fn run_shell(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    Ok(shell::run(&config)?)
}
