//! Text normalization for gazetteer matching.
//!
//! Every string that enters the matchers — gazetteer names, demonym
//! phrases, user-supplied locations and bios — goes through the same
//! pipeline so that matching is a plain string comparison afterwards:
//!
//! 1. strip a fixed set of punctuation glyphs,
//! 2. transliterate to ASCII (NFKD decomposition, drop combining marks,
//!    drop anything that still is not ASCII — this also removes emoji),
//! 3. lowercase,
//! 4. collapse runs of whitespace to a single space.
//!
//! The pipeline is deterministic, pure, and idempotent:
//! `normalize(normalize(s)) == normalize(s)`.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Everything that is neither a word character nor whitespace becomes a
/// space: periods, parentheses, plain and curly quotes, brackets, `#`,
/// commas. Runs before transliteration so that glyphs with no NFKD
/// decomposition (curly apostrophes, guillemets) still separate words
/// instead of silently gluing them together.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]+").unwrap());

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Twitter markup removed before normalization: URLs, @mentions, the
/// RT/FAV reserved words, and bare numbers. Hashtag bodies are kept (only
/// the `#` is punctuation), matching how profile bios are written.
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static RESERVED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:RT|FAV)\b").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());

/// Remove social-media markup that carries no location signal.
///
/// Applied by every detection method before [`normalize`].
pub fn strip_social_markup(text: &str) -> String {
    let text = URL.replace_all(text, " ");
    let text = MENTION.replace_all(&text, " ");
    let text = RESERVED.replace_all(&text, " ");
    let text = NUMBER.replace_all(&text, " ");
    text.into_owned()
}

/// Normalize a string for matching.
///
/// Returns the cleaned, ASCII-lowercased, single-spaced form. Empty and
/// emoji-only inputs normalize to the empty string.
pub fn normalize(text: &str) -> String {
    let spaced = NON_WORD.replace_all(text, " ");
    // NFKD, then keep only ASCII base characters. Combining marks produced
    // by the decomposition are non-ASCII, so diacritics fall out here; so
    // do emoji and any script that does not transliterate.
    let ascii: String = spaced.nfkd().filter(char::is_ascii).collect();
    let lower = ascii.to_lowercase();
    let collapsed = MULTI_SPACE.replace_all(lower.trim(), " ");
    collapsed.trim().to_string()
}

/// Tokenize on Unicode word boundaries.
///
/// Whitespace and punctuation never produce tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("Valdemoro, España"), "valdemoro espana");
        assert_eq!(normalize("Cataluña"), "cataluna");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Comunidad   de  MADRID "), "comunidad de madrid");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert_eq!(normalize(""), "");
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn emoji_only_input_normalizes_to_empty() {
        assert_eq!(normalize("🇪🇸🇮🇹"), "");
        assert!(tokenize(&normalize("🎉🎉")).is_empty());
    }

    #[test]
    fn punctuation_only_input_yields_no_tokens() {
        assert_eq!(normalize("... (#) '«»'"), "");
    }

    #[test]
    fn curly_apostrophes_and_brackets_removed() {
        assert_eq!(normalize("Terres de l’Ebre [sud]"), "terres de l ebre sud");
    }

    #[test]
    fn markup_stripping_removes_urls_mentions_numbers() {
        let s = strip_social_markup("RT @user 23 de Enero https://t.co/x visit www.x.com");
        assert_eq!(normalize(&s), "de enero visit");
    }

    #[test]
    fn idempotent() {
        for s in ["Valdemoro, España", "  GC 🇮🇨 ", "l’Ebre", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
