use clap::{Parser, Subcommand};
use scheme_research::Result;
use scheme_research::commands::{ask, process, run_shell};
use scheme_research::config::{DEFAULT_CONFIG_PATH, run_interactive_config, show_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scheme-research")]
#[command(about = "Index web articles and answer questions against them")]
#[command(version)]
struct Cli {
    /// Path to the settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure API credentials and settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Fetch, chunk, embed and index a batch of article URLs
    Process {
        /// Article URLs to ingest
        urls: Vec<String>,
        /// File containing URLs, one per line
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Ask a question against the indexed articles
    Ask {
        /// The question to answer
        question: String,
    },
    /// Start the interactive shell
    Shell,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config(&cli.config)?;
            } else {
                run_interactive_config(&cli.config)?;
            }
        }
        Commands::Process { urls, input } => {
            process(&cli.config, urls, input)?;
        }
        Commands::Ask { question } => {
            ask(&cli.config, &question)?;
        }
        Commands::Shell => {
            run_shell(&cli.config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["scheme-research", "shell"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Shell);
        }
    }

    #[test]
    fn process_command_with_urls() {
        let cli = Cli::try_parse_from([
            "scheme-research",
            "process",
            "https://example.com/a",
            "https://example.com/b",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Process { urls, input } = parsed.command {
                assert_eq!(urls.len(), 2);
                assert_eq!(input, None);
            }
        }
    }

    #[test]
    fn process_command_with_input_file() {
        let cli = Cli::try_parse_from(["scheme-research", "process", "--input", "urls.txt"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Process { urls, input } = parsed.command {
                assert!(urls.is_empty());
                assert_eq!(input, Some(PathBuf::from("urls.txt")));
            }
        }
    }

    #[test]
    fn ask_command_with_question() {
        let cli = Cli::try_parse_from(["scheme-research", "ask", "What is the deadline?"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ask { question } = parsed.command {
                assert_eq!(question, "What is the deadline?");
            }
        }
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["scheme-research", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn custom_config_path() {
        let cli = Cli::try_parse_from(["scheme-research", "--config", "other.toml", "shell"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert_eq!(parsed.config, PathBuf::from("other.toml"));
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["scheme-research", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["scheme-research", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
