//! Stopwords never match, in accented or folded spelling.

use std::fs;

use rofts_analysis::{DEFAULT_STOPWORDS_FILE, PipelineConfig};
use rofts_fts::{IndexBuilder, QueryOutcome, open_for_search};

use crate::common::TestCorpus;

#[test]
fn test_stopwords_do_not_match() {
    let corpus = TestCorpus::new();
    corpus.write("doc", "pisica și câinele pe canapea");
    corpus.build();

    let results = corpus.search(&["și", "si", "şi", "pe"]);
    for query in ["și", "si", "şi", "pe"] {
        assert_eq!(
            results.get(query),
            Some(&QueryOutcome::NoResults),
            "stopword {query} matched"
        );
    }
    assert_eq!(corpus.ids("canapea"), vec![corpus.id("doc")]);
}

#[test]
fn test_artifact_holds_both_forms() {
    let corpus = TestCorpus::new();
    corpus.write("doc", "pisica");
    corpus.build();

    let artifact = fs::read_to_string(corpus.index_path().join(DEFAULT_STOPWORDS_FILE)).unwrap();
    let words: Vec<&str> = artifact.lines().collect();
    assert!(words.contains(&"și"));
    assert!(words.contains(&"si"));
    assert!(words.contains(&"în"));
    assert!(words.contains(&"in"));
}

#[test]
fn test_bundled_romanian_list() {
    let corpus = TestCorpus::new();
    corpus.write("cat", "pisica neagra");

    let stats = IndexBuilder::new(PipelineConfig::default())
        .build(corpus.source_path(), corpus.index_path())
        .unwrap();
    assert!(!stats.degraded);

    let (engine, snapshot) = open_for_search(corpus.index_path(), corpus.config()).unwrap();
    let results = engine.search_batch(["pisică"], &snapshot).unwrap();
    assert_eq!(results.get("pisică").unwrap().ids(), [corpus.id("cat")]);
}
