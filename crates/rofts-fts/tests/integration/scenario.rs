//! End-to-end matching behaviour on small corpora.

use rofts_fts::QueryOutcome;

use crate::common::{TestCorpus, cat_and_dog};

#[test]
fn test_cat_and_dog() {
    let corpus = cat_and_dog();

    let results = corpus.search(&["pisica", "camion"]);

    assert_eq!(
        results.get("pisica"),
        Some(&QueryOutcome::Matches(vec![corpus.id("cat")]))
    );
    assert_eq!(results.get("camion"), Some(&QueryOutcome::NoResults));
}

#[test]
fn test_query_diacritic_forms_match() {
    let corpus = cat_and_dog();

    for query in ["pisică", "PISICĂ", "Pisica", "pisica"] {
        assert_eq!(corpus.ids(query), vec![corpus.id("cat")], "query {query}");
    }
    assert_eq!(corpus.ids("câinele"), vec![corpus.id("dog")]);
}

#[test]
fn test_indexed_diacritics_match_plain_queries() {
    let corpus = TestCorpus::new();
    corpus.write("toy", "O mașinuță roșie");
    corpus.write("legacy", "Maşinuţa funcţionează");
    corpus.build();

    let mut ids = corpus.ids("masinuta");
    ids.sort();
    let mut expected = vec![corpus.id("legacy"), corpus.id("toy")];
    expected.sort();
    assert_eq!(ids, expected);

    assert_eq!(corpus.ids("functioneaza"), vec![corpus.id("legacy")]);
    assert_eq!(corpus.ids("funcționează"), vec![corpus.id("legacy")]);
}

#[test]
fn test_spellings_differing_by_diacritics_agree() {
    let corpus = cat_and_dog();

    let pairs = [
        ("pisică neagră", "pisica neagra"),
        ("câinele", "cainele"),
        ("maşinuţă", "mașinuță"),
    ];
    for (a, b) in pairs {
        assert_eq!(corpus.ids(a), corpus.ids(b), "{a} vs {b}");
    }
}

#[test]
fn test_inflected_form_matches() {
    let corpus = cat_and_dog();
    assert_eq!(corpus.ids("pisicii"), vec![corpus.id("cat")]);
}

#[test]
fn test_nested_directories_indexed() {
    let corpus = TestCorpus::new();
    corpus.write("a/b/deep.txt", "pisica");
    corpus.write("top.txt", "caine");

    let stats = corpus.build();

    assert_eq!(stats.documents_indexed, 2);
    assert_eq!(corpus.ids("pisica"), vec![corpus.id("a/b/deep.txt")]);
}

#[test]
fn test_parsed_form_reported() {
    let corpus = cat_and_dog();
    let results = corpus.search(&["Pisică"]);

    let result = results.iter().next().unwrap();
    let parsed = result.parsed.as_ref().unwrap();
    assert_eq!(parsed.raw(), "Pisică");
    assert_eq!(parsed.terms().len(), 1);
    assert!(parsed.terms()[0].is_ascii());
}
