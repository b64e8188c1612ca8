use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};

use crate::config::Config;
use crate::pipeline::{IngestionPipeline, QueryOutcome, QueryPipeline, parse_url_list};
use crate::ui;

/// Interactive menu mapping the two user actions onto the pipelines.
///
/// Purely presentational: it gathers input, invokes a pipeline, renders the
/// outcome, and loops. Failures become banners; the shell itself never
/// retries or keeps state between actions.
#[inline]
pub fn run(config: &Config) -> Result<()> {
    eprintln!(
        "{}",
        style("Automated Scheme Research Tool").bold().cyan()
    );
    eprintln!();

    loop {
        let actions = &["Process URLs", "Ask a question", "Quit"];
        let choice = Select::new()
            .with_prompt("Action")
            .default(0)
            .items(actions)
            .interact()?;

        match choice {
            0 => process_urls(config)?,
            1 => ask_question(config)?,
            _ => break,
        }

        eprintln!();
    }

    Ok(())
}

fn process_urls(config: &Config) -> Result<()> {
    eprintln!("Enter URLs one per line; finish with an empty line.");

    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt("URL")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    let urls = parse_url_list(&lines.join("\n"));
    if urls.is_empty() {
        ui::warning("No URLs entered.");
        return Ok(());
    }

    match IngestionPipeline::new(config).ingest(&urls) {
        Ok(report) => {
            ui::success(&format!(
                "Processed {} articles into {} indexed chunks.",
                report.fetched - report.filtered_out,
                report.chunks
            ));
        }
        Err(e) => ui::error(&e.to_string()),
    }

    Ok(())
}

fn ask_question(config: &Config) -> Result<()> {
    let question: String = Input::new()
        .with_prompt("Enter your question")
        .allow_empty(true)
        .interact_text()?;

    match QueryPipeline::new(config).ask(&question) {
        Ok(QueryOutcome::Answered { answer, sources }) => {
            eprintln!();
            eprintln!("{}", style("Answer").bold().underlined());
            println!("{}", answer);
            for source in sources {
                ui::diagnostic(&format!("Source: {}", source));
            }
        }
        Ok(QueryOutcome::MissingIndex) => {
            ui::warning("No index found. Please process URLs first.");
        }
        Ok(QueryOutcome::EmptyQuestion) => {
            ui::warning("Please enter a question.");
        }
        Err(e) => ui::error(&e.to_string()),
    }

    Ok(())
}
