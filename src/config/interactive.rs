use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password};
use std::path::Path;

use super::{Config, ConfigError, OpenAiConfig};

#[inline]
pub fn run_interactive_config(path: &Path) -> Result<()> {
    eprintln!("{}", style("🔧 Scheme Research Configuration").bold().cyan());
    eprintln!();

    let mut config = load_existing_config(path);
    config.config_path = path.to_path_buf();

    eprintln!("{}", style("OpenAI Configuration").bold().yellow());
    eprintln!("Configure the hosted embedding and completion services.");
    eprintln!();

    configure_openai(&mut config.openai)?;

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_path.display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config(path: &Path) -> Result<()> {
    let config = Config::load(path).context("Failed to load configuration")?;

    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("OpenAI Settings:").bold().yellow());
    eprintln!(
        "  API Key: {}",
        style(mask_api_key(&config.openai.api_key)).cyan()
    );
    eprintln!("  API Base: {}", style(&config.openai.api_base).cyan());
    eprintln!(
        "  Embedding Model: {}",
        style(&config.openai.embedding_model).cyan()
    );
    eprintln!(
        "  Completion Model: {}",
        style(&config.openai.completion_model).cyan()
    );
    eprintln!(
        "  Timeout: {}s",
        style(config.openai.timeout_seconds).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Chunking Settings:").bold().yellow());
    eprintln!("  Chunk Size: {}", style(config.chunking.chunk_size).cyan());
    eprintln!(
        "  Chunk Overlap: {}",
        style(config.chunking.chunk_overlap).cyan()
    );
    eprintln!(
        "  Minimum Document Length: {}",
        style(config.chunking.min_document_chars).cyan()
    );

    eprintln!();
    eprintln!(
        "Index file: {}",
        style(config.storage.index_path.display()).cyan()
    );
    eprintln!("Settings file: {}", style(path.display()).dim());

    Ok(())
}

/// Mask a credential for display, keeping only a short identifying suffix.
#[inline]
pub fn mask_api_key(key: &str) -> String {
    let visible = 4;
    let chars = key.chars().count();
    if chars <= visible {
        return "*".repeat(chars);
    }

    let suffix: String = key
        .chars()
        .skip(chars - visible)
        .collect();
    format!("{}{}", "*".repeat(chars - visible), suffix)
}

fn load_existing_config(path: &Path) -> Config {
    Config::load(path).map_or_else(
        |_| {
            eprintln!(
                "{}",
                style("No existing configuration found. Using defaults.").yellow()
            );
            Config {
                openai: OpenAiConfig::default(),
                chunking: crate::chunking::ChunkingConfig::default(),
                storage: super::StorageConfig::default(),
                config_path: path.to_path_buf(),
            }
        },
        |config| {
            eprintln!("{}", style("Found existing configuration.").green());
            config
        },
    )
}

fn configure_openai(openai: &mut OpenAiConfig) -> Result<()> {
    let api_key: String = if openai.api_key.is_empty() {
        Password::new()
            .with_prompt("OpenAI API key")
            .interact()?
    } else {
        let keep = Confirm::new()
            .with_prompt(format!(
                "Keep existing API key ({})?",
                mask_api_key(&openai.api_key)
            ))
            .default(true)
            .interact()?;
        if keep {
            openai.api_key.clone()
        } else {
            Password::new().with_prompt("OpenAI API key").interact()?
        }
    };
    openai.api_key = api_key;

    openai.api_base = Input::new()
        .with_prompt("API base URL")
        .default(openai.api_base.clone())
        .validate_with(|input: &String| -> Result<(), ConfigError> {
            let temp_config = OpenAiConfig {
                api_key: "placeholder".to_string(),
                api_base: input.clone(),
                ..OpenAiConfig::default()
            };
            temp_config.validate()?;
            Ok(())
        })
        .interact_text()?;

    openai.embedding_model = Input::new()
        .with_prompt("Embedding model")
        .default(openai.embedding_model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    openai.completion_model = Input::new()
        .with_prompt("Completion model")
        .default(openai.completion_model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    openai.timeout_seconds = Input::new()
        .with_prompt("Request timeout in seconds")
        .default(openai.timeout_seconds)
        .validate_with(|input: &u64| -> Result<(), &str> {
            if *input == 0 || *input > 300 {
                Err("Timeout must be between 1 and 300 seconds")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(())
}
