use super::*;
use crate::chunking::Chunk;
use crate::config::{OpenAiConfig, StorageConfig};
use crate::index::SearchResult;
use tempfile::TempDir;

fn test_config(index_path: std::path::PathBuf) -> Config {
    Config {
        openai: OpenAiConfig {
            api_key: "sk-test".to_string(),
            ..OpenAiConfig::default()
        },
        chunking: ChunkingConfig::default(),
        storage: StorageConfig { index_path },
        config_path: std::path::PathBuf::from("config.toml"),
    }
}

fn result(url: &str, text: &str, similarity: f32) -> SearchResult {
    SearchResult {
        chunk: Chunk {
            source_url: url.to_string(),
            title: "Test".to_string(),
            chunk_index: 0,
            text: text.to_string(),
        },
        similarity,
    }
}

#[test]
fn parse_url_list_trims_and_drops_blanks() {
    let input = "https://example.com/a\n\n  https://example.com/b  \n\t\n";
    assert_eq!(
        parse_url_list(input),
        vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ]
    );
}

#[test]
fn parse_url_list_of_empty_input_is_empty() {
    assert!(parse_url_list("").is_empty());
    assert!(parse_url_list("\n\n  \n").is_empty());
}

#[test]
fn build_prompt_contains_context_and_question() {
    let results = vec![
        result("https://a", "The scheme pays 8% interest.", 0.9),
        result("https://b", "Applications close in June.", 0.8),
    ];

    let prompt = build_prompt("What is the interest rate?", &results);

    assert!(prompt.contains("The scheme pays 8% interest."));
    assert!(prompt.contains("Applications close in June."));
    assert!(prompt.contains("Question: What is the interest rate?"));
    assert!(prompt.ends_with("Helpful Answer:"));
}

#[test]
fn ask_with_missing_index_is_a_soft_outcome() {
    let dir = TempDir::new().expect("create temp dir");
    let pipeline = QueryPipeline::new(&test_config(dir.path().join("absent.json")));

    let outcome = pipeline.ask("any question").expect("ask");
    assert_eq!(outcome, QueryOutcome::MissingIndex);
}

#[test]
fn ask_with_empty_question_makes_no_call() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("index.json");

    let mut index = crate::index::VectorIndex::new("test-model".to_string(), 1);
    index
        .add(
            vec![1.0],
            Chunk {
                source_url: "https://a".to_string(),
                title: "Test".to_string(),
                chunk_index: 0,
                text: "text".to_string(),
            },
        )
        .expect("add entry");
    index.save(&path).expect("save index");

    let pipeline = QueryPipeline::new(&test_config(path));

    assert_eq!(
        pipeline.ask("").expect("ask"),
        QueryOutcome::EmptyQuestion
    );
    assert_eq!(
        pipeline.ask("   \t").expect("ask"),
        QueryOutcome::EmptyQuestion
    );
}
