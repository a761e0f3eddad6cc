//! Document identifier utilities.
//!
//! Identifiers are the update key of the index: the same file must map to the
//! same identifier on every indexing run, or re-indexing inserts duplicates
//! instead of replacing records.

use std::path::Path;

/// Compute the identifier of a document from its filesystem path.
///
/// The path is canonicalized (absolute, symlinks resolved) when possible and
/// rendered with `/` separators. When canonicalization fails (for instance,
/// the file was removed between discovery and indexing) the path is used as
/// given, with separators normalized.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rofts_core::ids::document_id;
///
/// assert_eq!(document_id(Path::new("no/such/file.txt")), "no/such/file.txt");
/// ```
pub fn document_id(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical) => normalize_separators(&canonical.to_string_lossy()),
        Err(e) => {
            log::debug!("Cannot canonicalize {}: {e}", path.display());
            normalize_separators(&path.to_string_lossy())
        }
    }
}

/// Replace platform separators with `/`.
///
/// Only Windows uses `\` as a separator. Elsewhere it is an ordinary
/// filename character and is kept, so `a\b.txt` and `a/b.txt` stay distinct.
///
/// ```
/// use rofts_core::ids::normalize_separators;
///
/// assert_eq!(normalize_separators("docs/real/a.txt"), "docs/real/a.txt");
/// ```
pub fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '\\' {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // -------------------------------------------------------------------------
    // document_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_document_id_existing_file_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pisica.txt");
        fs::write(&file, "pisica neagra").unwrap();

        let id = document_id(&file);
        assert!(id.ends_with("/pisica.txt"));
        assert!(Path::new(&id).is_absolute() || id.contains(':'));
    }

    #[test]
    fn test_document_id_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("caine.txt");
        fs::write(&file, "cainele maro").unwrap();

        assert_eq!(document_id(&file), document_id(&file));
    }

    #[test]
    fn test_document_id_resolves_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let indirect = dir.path().join("sub").join("..").join("a.txt");
        assert_eq!(document_id(&indirect), document_id(&file));
    }

    #[test]
    fn test_document_id_missing_file_falls_back() {
        assert_eq!(document_id(Path::new("missing/file.txt")), "missing/file.txt");
    }

    // -------------------------------------------------------------------------
    // normalize_separators tests
    // -------------------------------------------------------------------------

    #[test]
    #[cfg(windows)]
    fn test_normalize_separators_backslashes() {
        assert_eq!(normalize_separators(r"a\b\c"), "a/b/c");
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_separators_keeps_backslash_in_names() {
        assert_eq!(normalize_separators(r"a\b.txt"), r"a\b.txt");
    }

    #[test]
    #[cfg(unix)]
    fn test_document_id_backslash_name_is_distinct() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        let nested = dir.path().join("a").join("b.txt");
        let flat = dir.path().join(r"a\b.txt");
        fs::write(&nested, "pisica").unwrap();
        fs::write(&flat, "camion").unwrap();

        assert_ne!(document_id(&nested), document_id(&flat));
        assert!(document_id(&flat).ends_with(r"/a\b.txt"));
    }

    #[test]
    fn test_normalize_separators_empty() {
        assert_eq!(normalize_separators(""), "");
    }
}
