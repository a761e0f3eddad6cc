//! Diacritic folding.
//!
//! Romanian letters with diacritics (ă, â, î, ș, ț and the legacy cedilla
//! forms ş, ţ) decompose under NFKD into an ASCII base letter followed by a
//! combining mark. Dropping the marks yields the spelling people type on
//! keyboards without a Romanian layout.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritical marks from `text`.
///
/// Letters without a decomposition (digits, ASCII, non-Latin scripts) are
/// kept unchanged.
///
/// ```
/// use rofts_analysis::fold::fold_diacritics;
///
/// assert_eq!(fold_diacritics("mașinuță"), "masinuta");
/// assert_eq!(fold_diacritics("ŞI"), "SI");
/// assert_eq!(fold_diacritics("camion"), "camion");
/// ```
pub fn fold_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}
