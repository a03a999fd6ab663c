//! Language-majority matching over the profile description.

use std::collections::BTreeMap;

use crate::gazetteer::{Gazetteer, PlaceKind};
use crate::lang::LanguageEnsemble;
use crate::normalize::{normalize, strip_social_markup};

/// Resolve a place from the language the bio is written in.
///
/// The ensemble must reach its quorum (3 of 4 by default) on a single
/// language; anything less is low confidence. The majority language then
/// maps to gazetteer places that speak it, walking granularities from most
/// specific to least: a level is accepted only when *exactly one* place of
/// that level speaks the language — a language spoken in three regions
/// identifies none of them.
pub fn identify_place_from_description_language(
    gazetteer: &Gazetteer,
    ensemble: &LanguageEnsemble,
    description: &str,
    want: PlaceKind,
) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    let normalized = normalize(&strip_social_markup(description));
    if normalized.is_empty() {
        return None;
    }
    let majority = ensemble.majority(&normalized)?;

    let chains = gazetteer.find_language(&majority);
    if chains.is_empty() {
        return None;
    }
    let mut by_kind: BTreeMap<PlaceKind, Vec<usize>> = BTreeMap::new();
    for (idx, chain) in chains.iter().enumerate() {
        by_kind.entry(chain.found().kind).or_default().push(idx);
    }
    for kind in PlaceKind::most_specific_first() {
        match by_kind.get(&kind).map(Vec::as_slice) {
            Some([only]) => return Some(chains[*only].label(want)),
            Some(_) => continue,
            None => continue,
        }
    }
    None
}
