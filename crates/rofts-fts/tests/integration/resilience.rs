//! One bad document or one bad query never spoils the rest.

use std::path::Path;

use rofts_core::Error;
use rofts_fts::{IndexBuilder, QueryOutcome};

use crate::common::{TestCorpus, cat_and_dog};

#[test]
fn test_unreadable_document_is_skipped() {
    let corpus = TestCorpus::new();
    corpus.write("a.txt", "pisica");
    corpus.write("bad.txt", [0x66u8, 0x6f, 0xff, 0xfe, 0x0a]);
    corpus.write("c.txt", "caine");

    let stats = corpus.build();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.documents_indexed, 2);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.failures[0].id, corpus.id("bad.txt"));

    assert_eq!(corpus.ids("pisica"), vec![corpus.id("a.txt")]);
    assert_eq!(corpus.ids("caine"), vec![corpus.id("c.txt")]);
}

#[test]
fn test_invalid_query_isolated_in_batch() {
    let corpus = cat_and_dog();
    let queries = ["pisica", "nosuchfield:pisica", "cainele", "camion"];

    let results = corpus.search(&queries);

    assert_eq!(results.len(), queries.len());
    assert!(matches!(
        results.get("nosuchfield:pisica"),
        Some(QueryOutcome::ParseFailure(_))
    ));
    assert_eq!(results.get("pisica").unwrap().ids(), [corpus.id("cat")]);
    assert_eq!(results.get("cainele").unwrap().ids(), [corpus.id("dog")]);
    assert_eq!(results.get("camion"), Some(&QueryOutcome::NoResults));
}

#[test]
fn test_parse_failure_distinct_from_no_results() {
    let corpus = cat_and_dog();
    let results = corpus.search(&["nosuchfield:x", "zebra"]);

    assert!(results.get("nosuchfield:x").unwrap().is_parse_failure());
    assert!(!results.get("zebra").unwrap().is_parse_failure());
}

#[test]
fn test_missing_source_is_fatal() {
    let corpus = TestCorpus::new();
    let result = IndexBuilder::default().build(Path::new("/nonexistent/rofts"), corpus.index_path());

    match result {
        Err(e @ Error::NotFound { .. }) => assert!(e.is_fatal()),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
