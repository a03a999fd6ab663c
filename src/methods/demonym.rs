//! Demonym matching over the profile description.

use crate::gazetteer::{Chain, DemonymRule, Gazetteer, PlaceKind};
use crate::matcher::{match_consecutive, match_location};
use crate::normalize::{normalize, strip_social_markup, tokenize};

/// Resolve a place from nationality / regional-identity words in the bio.
///
/// A demonym phrase only counts when it appears as *consecutive* words in
/// the description. Two exclusion rules then apply, both derived from the
/// matched window:
///
/// - **banned prefix**: the word immediately before the window negates the
///   demonym (`"rock en español"` names a genre, not a residence);
/// - **banned place**: one of the rule's banned place names is
///   independently found in the co-located location field — an explicit
///   place mention outranks an inferred demonym (`"Zamorano"` with
///   location `"Zamora, Michoacán"` is the Mexican Zamora, not the
///   Spanish one).
///
/// Among surviving matches the most specific granularity wins: a regional
/// identity beats the national one it implies.
pub fn identify_place_from_demonyms_in_description(
    gazetteer: &Gazetteer,
    description: &str,
    location: &str,
    want: PlaceKind,
) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    let description_tokens = tokenize(&normalize(&strip_social_markup(description)));
    if description_tokens.is_empty() {
        return None;
    }
    let location_tokens = tokenize(&normalize(&strip_social_markup(location)));

    let mut survivors: Vec<Chain<'_>> = Vec::new();
    for rule in gazetteer.demonym_rules() {
        let Some(start) = match_consecutive(&rule.phrase, &description_tokens) else {
            continue;
        };
        if banned_by_prefix(rule, &description_tokens, start) {
            log::debug!("demonym '{}' discarded by banned prefix", rule.phrase);
            continue;
        }
        if banned_by_colocated_place(rule, &location_tokens) {
            log::debug!("demonym '{}' discarded by banned place in location", rule.phrase);
            continue;
        }
        if let Some(chain) = gazetteer.find_demonym(&rule.phrase) {
            survivors.push(chain);
        }
    }

    for kind in PlaceKind::most_specific_first() {
        if let Some(chain) = survivors.iter().find(|c| c.found().kind == kind) {
            return Some(chain.label(want));
        }
    }
    None
}

/// The word immediately preceding the matched window, when there is one,
/// checked against the rule's banned prefixes.
fn banned_by_prefix(rule: &DemonymRule, tokens: &[String], start: usize) -> bool {
    if start == 0 {
        return false;
    }
    let prefix = &tokens[start - 1];
    rule.banned_prefixes.iter().any(|banned| banned == prefix)
}

/// True when one of the rule's banned place names is found in the
/// location tokens by the ordinary location matcher.
fn banned_by_colocated_place(rule: &DemonymRule, location_tokens: &[String]) -> bool {
    if rule.banned_places.is_empty() || location_tokens.is_empty() {
        return false;
    }
    match_location(&rule.banned_places, location_tokens).is_some()
}
