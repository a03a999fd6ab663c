//! Place-name matching over the free-text location field, including
//! homonym disambiguation.

use std::collections::BTreeSet;

use crate::gazetteer::{Chain, Gazetteer, PlaceKind};
use crate::matcher::match_location;
use crate::normalize::{normalize, strip_social_markup, tokenize};

/// Resolve a free-text location string against the gazetteer name sets.
///
/// Levels are tried most specific first; the first match wins. A match on
/// a homonymous name is only accepted when the input carries no other
/// tokens at all, or when a disambiguating ancestor name (country, and
/// region/province for deeper matches) is present in the same input.
/// Otherwise the ambiguous substring is removed and the whole search
/// restarts on the reduced string, so a second place mention can still
/// resolve.
///
/// The removal is a plain substring `replace`: if the ambiguous name also
/// occurs inside an unrelated word sequence elsewhere in the input, that
/// occurrence is stripped too. Known approximation, kept deliberately.
pub fn identify_place_from_location(
    gazetteer: &Gazetteer,
    location: &str,
    want: PlaceKind,
) -> Option<String> {
    if location.is_empty() {
        return None;
    }
    let mut normalized = normalize(&strip_social_markup(location));
    loop {
        let tokens = tokenize(&normalized);
        if tokens.is_empty() {
            return None;
        }

        let mut matched: Option<(String, PlaceKind)> = None;
        for kind in PlaceKind::most_specific_first() {
            if let Some(found) = match_location(gazetteer.names(kind), &tokens) {
                matched = Some((found, kind));
                break;
            }
        }
        let (found, kind) = matched?;

        let Some(chain) = gazetteer.find_name(&found, kind) else {
            // Name sets and tree are built from the same data; a miss here
            // is a defect, not a runtime condition.
            log::warn!("name '{found}' in {kind} set but absent from tree");
            return None;
        };

        if !gazetteer.homonyms().contains(&found) {
            return Some(resolve(&chain, kind, want));
        }
        // Homonymous match. A bare single-name input is taken at face
        // value: there is no context to contradict it.
        if normalized.trim() == found {
            return Some(resolve(&chain, kind, want));
        }
        // Otherwise demand a disambiguating ancestor mention.
        let context = context_names(&chain, kind, &found);
        if match_location(&context, &tokens).is_some() {
            return Some(resolve(&chain, kind, want));
        }
        // No context: drop the ambiguous substring and retry coarser.
        let reduced = normalize(&normalized.replace(&found, " "));
        if reduced == normalized {
            // Multi-word name matched out of order; nothing was removed,
            // so retrying would loop forever.
            return None;
        }
        normalized = reduced;
    }
}

/// Normalized ancestor names usable as disambiguating context: the country
/// always, plus region (for province/city matches) and province (for city
/// matches), excluding the ambiguous name itself.
fn context_names(chain: &Chain<'_>, kind: PlaceKind, found: &str) -> BTreeSet<String> {
    let mut levels = vec![PlaceKind::Country];
    if matches!(kind, PlaceKind::City | PlaceKind::Province) {
        levels.push(PlaceKind::Region);
    }
    if kind == PlaceKind::City {
        levels.push(PlaceKind::Province);
    }
    let mut context = BTreeSet::new();
    for level in levels {
        if let Some(place) = chain.at(level) {
            for name in place.normalized_names() {
                if name != found && !name.is_empty() {
                    context.insert(name);
                }
            }
        }
    }
    context
}

/// A country-level match always resolves to the country, whatever level
/// was requested; anything deeper resolves along the parent chain.
fn resolve(chain: &Chain<'_>, kind: PlaceKind, want: PlaceKind) -> String {
    if kind == PlaceKind::Country {
        chain.label(PlaceKind::Country)
    } else {
        chain.label(want)
    }
}
