//! A broken pipeline configuration degrades instead of failing.

use std::fs;

use rofts_analysis::{PipelineConfig, Stage};
use rofts_fts::{IndexMetadata, open_for_search};

use crate::common::TestCorpus;

#[test]
fn test_unwritable_stopwords_degrade() {
    let blocked = tempfile::tempdir().unwrap();
    let artifact = blocked.path().join("stopwords.txt");
    fs::create_dir_all(&artifact).unwrap();

    let corpus = TestCorpus::with_config(PipelineConfig::romanian(&artifact));
    corpus.write("cat", "Pisicile negre");

    let stats = corpus.build();
    assert!(stats.degraded);
    assert_eq!(stats.documents_indexed, 1);

    let metadata = IndexMetadata::load(corpus.index_path()).unwrap().unwrap();
    assert!(metadata.degraded);

    // Still tokenized, lowercased and stemmed.
    assert_eq!(corpus.ids("PISICILE"), vec![corpus.id("cat")]);
}

#[test]
fn test_invalid_stages_degrade() {
    let config = PipelineConfig::default().with_stages(vec![Stage::Lowercase, Stage::Tokenize]);
    let corpus = TestCorpus::with_config(config);
    corpus.write("cat", "pisica neagra");

    let stats = corpus.build();
    assert!(stats.degraded);
    assert_eq!(corpus.ids("pisica"), vec![corpus.id("cat")]);
}

#[test]
fn test_degraded_index_queried_with_default_pipeline() {
    let blocked = tempfile::tempdir().unwrap();
    let artifact = blocked.path().join("stopwords.txt");
    fs::create_dir_all(&artifact).unwrap();

    let corpus = TestCorpus::with_config(PipelineConfig::romanian(&artifact));
    corpus.write("cat", "Pisicile negre");
    assert!(corpus.build().degraded);

    // A usable stopword file appears after indexing.
    fs::remove_dir(&artifact).unwrap();
    fs::write(&artifact, "și\npe\n").unwrap();

    let (engine, _snapshot) = open_for_search(corpus.index_path(), corpus.config()).unwrap();
    assert!(engine.pipeline().is_degraded());
    assert_eq!(corpus.ids("PISICILE"), vec![corpus.id("cat")]);
}
