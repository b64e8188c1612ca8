use super::*;
use tempfile::TempDir;

fn chunk(url: &str, index: usize, text: &str) -> Chunk {
    Chunk {
        source_url: url.to_string(),
        title: "Test".to_string(),
        chunk_index: index,
        text: text.to_string(),
    }
}

fn sample_index() -> VectorIndex {
    let mut index = VectorIndex::new("test-model".to_string(), 3);
    index
        .add(vec![1.0, 0.0, 0.0], chunk("https://a", 0, "alpha"))
        .expect("add entry");
    index
        .add(vec![0.0, 1.0, 0.0], chunk("https://b", 0, "beta"))
        .expect("add entry");
    index
        .add(vec![0.9, 0.1, 0.0], chunk("https://c", 0, "gamma"))
        .expect("add entry");
    index
}

#[test]
fn search_orders_by_similarity() {
    let index = sample_index();

    let results = index.search(&[1.0, 0.0, 0.0], 3).expect("search");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].chunk.text, "alpha");
    assert_eq!(results[1].chunk.text, "gamma");
    assert_eq!(results[2].chunk.text, "beta");
    assert!(results[0].similarity > results[1].similarity);
}

#[test]
fn search_truncates_to_top_k() {
    let index = sample_index();

    let results = index.search(&[1.0, 0.0, 0.0], 2).expect("search");
    assert_eq!(results.len(), 2);
}

#[test]
fn search_rejects_wrong_dimension() {
    let index = sample_index();
    assert!(index.search(&[1.0, 0.0], 3).is_err());
}

#[test]
fn add_rejects_wrong_dimension() {
    let mut index = VectorIndex::new("test-model".to_string(), 3);
    let result = index.add(vec![1.0], chunk("https://a", 0, "alpha"));
    assert!(result.is_err());
}

#[test]
fn from_pairs_requires_matching_lengths() {
    let result = VectorIndex::from_pairs(
        "test-model".to_string(),
        vec![vec![1.0, 0.0]],
        vec![
            chunk("https://a", 0, "alpha"),
            chunk("https://a", 1, "beta"),
        ],
    );
    assert!(result.is_err());
}

#[test]
fn save_load_round_trip_preserves_top_k() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("index.json");
    let index = sample_index();

    let before = index.search(&[0.7, 0.3, 0.0], 2).expect("search");

    index.save(&path).expect("save index");
    let reloaded = VectorIndex::load(&path).expect("load index");
    let after = reloaded.search(&[0.7, 0.3, 0.0], 2).expect("search");

    assert_eq!(reloaded, index);
    let before_texts: Vec<&str> = before.iter().map(|r| r.chunk.text.as_str()).collect();
    let after_texts: Vec<&str> = after.iter().map(|r| r.chunk.text.as_str()).collect();
    assert_eq!(before_texts, after_texts);
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    assert!(VectorIndex::load(dir.path().join("absent.json")).is_err());
}

#[test]
fn load_corrupt_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, "not json").expect("write file");

    assert!(VectorIndex::load(&path).is_err());
}

#[test]
fn save_overwrites_prior_file() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("index.json");

    sample_index().save(&path).expect("save first");

    let mut replacement = VectorIndex::new("test-model".to_string(), 2);
    replacement
        .add(vec![1.0, 0.0], chunk("https://new", 0, "fresh"))
        .expect("add entry");
    replacement.save(&path).expect("save second");

    let reloaded = VectorIndex::load(&path).expect("load index");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.dimension, 2);
}

#[test]
fn equal_scores_keep_insertion_order() {
    let mut index = VectorIndex::new("test-model".to_string(), 2);
    index
        .add(vec![1.0, 0.0], chunk("https://first", 0, "first"))
        .expect("add entry");
    index
        .add(vec![1.0, 0.0], chunk("https://second", 0, "second"))
        .expect("add entry");

    let results = index.search(&[1.0, 0.0], 2).expect("search");
    assert_eq!(results[0].chunk.text, "first");
    assert_eq!(results[1].chunk.text, "second");
}

#[test]
fn zero_vector_query_scores_zero() {
    let index = sample_index();
    let results = index.search(&[0.0, 0.0, 0.0], 1).expect("search");
    assert_eq!(results[0].similarity, 0.0);
}

#[test]
fn retriever_defaults_to_four_results() {
    let mut index = VectorIndex::new("test-model".to_string(), 1);
    for i in 0..10 {
        index
            .add(vec![1.0], chunk("https://a", i, &format!("chunk {}", i)))
            .expect("add entry");
    }

    let retriever = Retriever::new(index);
    let results = retriever.retrieve(&[1.0]).expect("retrieve");
    assert_eq!(results.len(), DEFAULT_TOP_K);
}
