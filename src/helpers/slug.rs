//! Slug derivation for content filenames

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 80;

lazy_static! {
    static ref NON_SLUG_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Combining Diacritical Marks block (U+0300..U+036F)
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Turn arbitrary text into a URL- and filesystem-safe token
///
/// Existing files in the site repository were named with this exact
/// algorithm, so the steps and their order must not change:
/// lower-case, NFKD, drop combining marks, collapse everything outside
/// `[a-z0-9]` into single hyphens, trim hyphens, cut to 80 characters.
///
/// # Examples
/// ```ignore
/// slugify("Café Opening") // -> "cafe-opening"
/// ```
pub fn slugify(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let hyphenated = NON_SLUG_RUN.replace_all(&folded, "-");
    hyphenated
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Spring -- Fair!! 2024 "), "spring-fair-2024");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Café Opening"), "cafe-opening");
        assert_eq!(slugify("Ångström über Niño"), "angstrom-uber-nino");
    }

    #[test]
    fn test_slugify_compatibility_forms() {
        // NFKD folds the ligature and full-width digits
        assert_eq!(slugify("ﬁnal ２０２４"), "final-2024");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["Café Opening", "Hello, World!", "a--b", "Über 9000 ideas"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ---"), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "word ".repeat(40);
        let slug = slugify(&long);
        assert_eq!(slug.len(), MAX_SLUG_LEN);
        assert!(slug.starts_with("word-word"));
    }
}
