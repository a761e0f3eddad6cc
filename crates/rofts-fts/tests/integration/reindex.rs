//! Re-indexing replaces records instead of adding duplicates.

use rofts_fts::{IndexSnapshot, QueryOutcome};

use crate::common::TestCorpus;

#[test]
fn test_reindex_replaces_content() {
    let corpus = TestCorpus::new();
    corpus.write("doc", "pisica neagra");
    let first = corpus.build();

    corpus.write("doc", "camion rosu");
    let second = corpus.build();

    assert_eq!(first.created, 1);
    assert_eq!(second.updated, 1);
    assert_eq!(second.created, 0);

    let results = corpus.search(&["pisica", "camion"]);
    assert_eq!(results.get("pisica"), Some(&QueryOutcome::NoResults));
    assert_eq!(
        results.get("camion"),
        Some(&QueryOutcome::Matches(vec![corpus.id("doc")]))
    );
}

#[test]
fn test_reindex_keeps_one_record_per_identifier() {
    let corpus = TestCorpus::new();
    corpus.write("a", "pisica");
    corpus.write("b", "caine");

    corpus.build();
    corpus.build();
    corpus.build();

    let snapshot = IndexSnapshot::open(corpus.index_path()).unwrap();
    assert_eq!(snapshot.num_docs(), 2);
    assert_eq!(corpus.ids("pisica"), vec![corpus.id("a")]);
}

#[test]
fn test_new_documents_added_on_reindex() {
    let corpus = TestCorpus::new();
    corpus.write("a", "pisica");
    corpus.build();

    corpus.write("b", "pisica alba");
    let stats = corpus.build();

    assert_eq!(stats.created, 1);
    assert_eq!(stats.updated, 1);
    assert_eq!(corpus.ids("pisica").len(), 2);
}

#[test]
#[cfg(unix)]
fn test_backslash_in_file_name_is_a_separate_document() {
    let corpus = TestCorpus::new();
    corpus.write("a/b.txt", "pisica");
    corpus.write(r"a\b.txt", "camion");

    let stats = corpus.build();
    assert_eq!(stats.created, 2);
    assert_ne!(corpus.id("a/b.txt"), corpus.id(r"a\b.txt"));

    let snapshot = IndexSnapshot::open(corpus.index_path()).unwrap();
    assert_eq!(snapshot.num_docs(), 2);
    assert_eq!(corpus.ids("pisica"), vec![corpus.id("a/b.txt")]);
    assert_eq!(corpus.ids("camion"), vec![corpus.id(r"a\b.txt")]);
}
