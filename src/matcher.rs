//! Token-level matching primitives shared by the detection methods.
//!
//! Two matching modes live here:
//!
//! - [`match_location`]: unordered membership matching used for place
//!   names. A candidate matches when *all* of its words appear somewhere
//!   in the token sequence; overlapping candidates are resolved in favor
//!   of the longer (more specific) name, and ties between independent
//!   matches go to the leftmost mention.
//! - [`match_consecutive`]: strict contiguous-window matching used for
//!   demonym phrases, which must appear as adjacent words to count.

/// Find the best-matching candidate name within `tokens`.
///
/// A candidate (possibly multi-word) is a matching iff every one of its
/// words is present in `tokens`; adjacency is not required at this stage.
/// Containment resolution: when one matching's word set subsumes
/// another's (`"san sebastian"` inside `"san sebastian de los reyes"`),
/// only the longer survives. Among the survivors, the candidate whose
/// first word occurs earliest in `tokens` wins.
///
/// Returns `None` when nothing matches; callers map that to the default
/// `"unknown"` place.
pub fn match_location<'a, I>(candidates: I, tokens: &[String]) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut matchings: Vec<String> = Vec::new();
    for candidate in candidates {
        let all_present = candidate
            .split_whitespace()
            .all(|word| tokens.iter().any(|t| t == word));
        if !all_present {
            continue;
        }
        // Longer, more specific names absorb shorter ones they contain.
        if matchings.iter().any(|m| contains_phrase(m, candidate)) {
            continue;
        }
        matchings.retain(|m| !contains_phrase(candidate, m));
        matchings.push(candidate.clone());
    }

    let mut best: Option<(usize, String)> = None;
    for matching in matchings {
        let first_word = matching.split_whitespace().next()?;
        if let Some(idx) = tokens.iter().position(|t| t == first_word) {
            match best {
                Some((min_idx, _)) if idx >= min_idx => {}
                _ => best = Some((idx, matching)),
            }
        }
    }
    best.map(|(_, m)| m)
}

/// True when every word of `needle` is a word of `haystack`.
///
/// Whole words only: `"madrid"` is contained in `"comunidad de madrid"`
/// but not in `"valmadrido"`. The words need not be adjacent, so
/// `"san reyes"` is contained in `"san sebastian de los reyes"`.
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split_whitespace().collect();
    let ndl: Vec<&str> = needle.split_whitespace().collect();
    if ndl.is_empty() || ndl.len() > hay.len() {
        return false;
    }
    ndl.iter().all(|w| hay.contains(w))
}

/// Find the first occurrence of `phrase` as a contiguous word window in
/// `tokens`, returning the start index of the window.
///
/// Demonyms demand adjacency: `"castellano manchego"` must appear as two
/// consecutive words, not merely both words somewhere in the bio.
pub fn match_consecutive(phrase: &str, tokens: &[String]) -> Option<usize> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.is_empty() || words.len() > tokens.len() {
        return None;
    }
    tokens
        .windows(words.len())
        .position(|window| window.iter().map(String::as_str).eq(words.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn single_word_match() {
        let names = vec!["madrid".to_string(), "valencia".to_string()];
        let found = match_location(&names, &toks("madrid espana"));
        assert_eq!(found.as_deref(), Some("madrid"));
    }

    #[test]
    fn all_words_required() {
        let names = vec!["san sebastian de los reyes".to_string()];
        assert_eq!(match_location(&names, &toks("san sebastian")), None);
    }

    #[test]
    fn longer_name_absorbs_contained_shorter_name() {
        let names = vec![
            "san sebastian".to_string(),
            "san sebastian de los reyes".to_string(),
        ];
        let found = match_location(&names, &toks("san sebastian de los reyes madrid"));
        assert_eq!(found.as_deref(), Some("san sebastian de los reyes"));
        // Same result regardless of candidate order.
        let reversed: Vec<String> = names.into_iter().rev().collect();
        let found = match_location(&reversed, &toks("san sebastian de los reyes madrid"));
        assert_eq!(found.as_deref(), Some("san sebastian de los reyes"));
    }

    #[test]
    fn leftmost_mention_wins() {
        let names = vec!["cordoba".to_string(), "sevilla".to_string()];
        let found = match_location(&names, &toks("sevilla y cordoba"));
        assert_eq!(found.as_deref(), Some("sevilla"));
    }

    #[test]
    fn no_match_is_none() {
        let names = vec!["galicia".to_string()];
        assert_eq!(match_location(&names, &toks("buenos aires")), None);
        assert_eq!(match_location(&names, &[]), None);
    }

    #[test]
    fn containment_is_word_bounded() {
        assert!(contains_phrase("comunidad de madrid", "madrid"));
        assert!(!contains_phrase("valmadrido", "madrid"));
        assert!(!contains_phrase("madrid", "comunidad de madrid"));
    }

    #[test]
    fn containment_ignores_word_order_and_gaps() {
        assert!(contains_phrase("san sebastian de los reyes", "san reyes"));
        assert!(contains_phrase("san sebastian de los reyes", "reyes san"));
        assert!(!contains_phrase("san sebastian de los reyes", "san pedro"));
    }

    #[test]
    fn non_contiguous_subset_name_is_absorbed() {
        let names = vec![
            "san reyes".to_string(),
            "san sebastian de los reyes".to_string(),
        ];
        let found = match_location(&names, &toks("san sebastian de los reyes"));
        assert_eq!(found.as_deref(), Some("san sebastian de los reyes"));
    }

    #[test]
    fn consecutive_requires_adjacency() {
        let tokens = toks("soy castellano y tambien manchego");
        assert_eq!(match_consecutive("castellano manchego", &tokens), None);
        let tokens = toks("soy castellano manchego de toledo");
        assert_eq!(match_consecutive("castellano manchego", &tokens), Some(1));
    }

    #[test]
    fn consecutive_first_occurrence() {
        let tokens = toks("gallego o gallego");
        assert_eq!(match_consecutive("gallego", &tokens), Some(0));
    }
}
