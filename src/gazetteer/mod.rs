//! Hierarchical place gazetteer.
//!
//! The gazetteer is a four-level administrative tree (country → region →
//! province → city) loaded once from a JSON document and read-only for the
//! life of the process. Loading derives the caches the matchers run
//! against:
//!
//! | Cache | Contents | Used by |
//! |-------|----------|---------|
//! | `names` | normalized canonical + alternative names, per level | place-name matching |
//! | `homonyms` | normalized names marked ambiguous in the source data | homonym resolver |
//! | `flag_codes` | emoji flag shortcodes (`":es:"`) | flag matching |
//! | `languages` | language codes spoken somewhere in the tree | language-majority matching |
//! | `demonyms` | normalized demonym phrases with exclusion rules | demonym matching |
//!
//! The tree itself is kept alongside the caches: parent chains are
//! reconstructed on demand with a single generic depth-first walk
//! ([`Gazetteer::find_path`] / [`Gazetteer::collect_paths`]) instead of a
//! per-concern recursive search.

pub mod builder;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::normalize;
use crate::{Error, Result};

/// Administrative level of a place, from least to most specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    /// Top of the hierarchy.
    Country,
    /// Autonomous community / first-level subdivision. The conventional
    /// resolution granularity.
    #[default]
    Region,
    /// Second-level subdivision.
    Province,
    /// Leaf level.
    City,
}

impl PlaceKind {
    /// All levels, least specific first.
    pub const ALL: [PlaceKind; 4] = [
        PlaceKind::Country,
        PlaceKind::Region,
        PlaceKind::Province,
        PlaceKind::City,
    ];

    /// Iterate levels from most specific (`City`) to least (`Country`).
    ///
    /// Matching always tries the most specific level first so that a city
    /// mention beats a same-string country mention.
    pub fn most_specific_first() -> impl Iterator<Item = PlaceKind> {
        Self::ALL.into_iter().rev()
    }

    /// Wire label, as used in the gazetteer JSON `type` field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlaceKind::Country => "country",
            PlaceKind::Region => "region",
            PlaceKind::Province => "province",
            PlaceKind::City => "city",
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Demonym record of a place: the identity words plus the exclusion rules
/// that keep them from firing on false cognates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demonyms {
    /// Demonym phrases (`"gallego"`, `"castellano manchego"`).
    #[serde(default)]
    pub names: Vec<String>,
    /// A demonym match is discarded when the word immediately before it is
    /// one of these (`"rock en español"` is a music genre, not residency).
    #[serde(default)]
    pub banned_prefixes: Vec<String>,
    /// A demonym match is discarded when one of these place names is
    /// independently found in the co-located location field (a `"Zamorano"`
    /// living in `"Zamora, Michoacán"` is not from the Spanish Zamora).
    #[serde(default)]
    pub banned_places: Vec<String>,
}

/// A node in the place hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Canonical display name.
    pub name: String,
    /// Synonyms, in source order.
    #[serde(default)]
    pub alternative_names: Vec<String>,
    /// Administrative level.
    #[serde(rename = "type")]
    pub kind: PlaceKind,
    /// Emoji flag shortcodes (`":es:"`), usually empty below country level.
    #[serde(default, rename = "flag_emoji_code")]
    pub flag_emoji_codes: Vec<String>,
    /// Language codes primarily spoken here.
    #[serde(default)]
    pub languages: Vec<String>,
    /// True when this place's normalized name collides with another
    /// place's name elsewhere in the hierarchy. Encoded as 0/1 on the wire.
    #[serde(
        default,
        deserialize_with = "bool_from_int",
        serialize_with = "int_from_bool"
    )]
    pub homonymous: bool,
    /// Demonym record, absent for most places.
    #[serde(
        default,
        deserialize_with = "demonyms_compat",
        skip_serializing_if = "Option::is_none"
    )]
    pub demonyms: Option<Demonyms>,
    /// Children when `kind == Country`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Place>,
    /// Children when `kind == Region`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provinces: Vec<Place>,
    /// Children when `kind == Province`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<Place>,
}

impl Place {
    /// Children of this node; empty for cities.
    #[must_use]
    pub fn children(&self) -> &[Place] {
        match self.kind {
            PlaceKind::Country => &self.regions,
            PlaceKind::Region => &self.provinces,
            PlaceKind::Province => &self.cities,
            PlaceKind::City => &[],
        }
    }

    /// Canonical name followed by alternative names, normalized.
    pub fn normalized_names(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.name)
            .chain(self.alternative_names.iter())
            .map(|n| normalize(n))
    }
}

fn bool_from_int<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<bool, D::Error> {
    // The wire format uses 0/1; accept a plain bool too.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(u8),
        Bool(bool),
    }
    Ok(match Flag::deserialize(de)? {
        Flag::Int(n) => n != 0,
        Flag::Bool(b) => b,
    })
}

fn int_from_bool<S: Serializer>(value: &bool, ser: S) -> std::result::Result<S::Ok, S::Error> {
    ser.serialize_u8(u8::from(*value))
}

fn demonyms_compat<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<Demonyms>, D::Error> {
    // Older gazetteer dumps carry a bare array of demonym names; current
    // ones carry the full record. Accept both.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Record(Demonyms),
        List(Vec<String>),
    }
    Ok(match Option::<Repr>::deserialize(de)? {
        None => None,
        Some(Repr::List(names)) if names.is_empty() => None,
        Some(Repr::List(names)) => Some(Demonyms {
            names,
            ..Demonyms::default()
        }),
        Some(Repr::Record(record)) if record.names.is_empty() => None,
        Some(Repr::Record(record)) => Some(record),
    })
}

/// A normalized demonym phrase with its exclusion rules, flattened out of
/// the tree at load time.
#[derive(Debug, Clone)]
pub struct DemonymRule {
    /// Normalized demonym phrase.
    pub phrase: String,
    /// Normalized banned prefix words.
    pub banned_prefixes: Vec<String>,
    /// Normalized banned place names.
    pub banned_places: Vec<String>,
}

/// Root-to-match ancestor chain produced by a tree walk.
///
/// Ancestors appear least specific first; the matched place is the last
/// element and is also available via [`Chain::found`].
pub struct Chain<'g> {
    path: Vec<&'g Place>,
    found: &'g Place,
}

impl<'g> Chain<'g> {
    /// The matched place itself.
    #[must_use]
    pub fn found(&self) -> &'g Place {
        self.found
    }

    /// The ancestor (or the match itself) at `kind`, if the chain reaches
    /// that level.
    #[must_use]
    pub fn at(&self, kind: PlaceKind) -> Option<&'g Place> {
        self.path.iter().find(|p| p.kind == kind).copied()
    }

    /// Resolve the chain to a display name at the requested granularity.
    ///
    /// When the chain has no entry at `want` (a country-level flag cannot
    /// resolve to a city), falls back directly to the country.
    #[must_use]
    pub fn label(&self, want: PlaceKind) -> String {
        if let Some(place) = self.at(want) {
            return place.name.clone();
        }
        self.at(PlaceKind::Country)
            .map_or_else(|| self.found.name.clone(), |p| p.name.clone())
    }
}

/// Immutable gazetteer store: the place tree plus the derived caches.
///
/// Built once by [`Gazetteer::load`] (or [`Gazetteer::from_countries`]) and
/// never mutated afterwards, so it can be shared freely across threads.
#[derive(Debug)]
pub struct Gazetteer {
    countries: Vec<Place>,
    names: BTreeMap<PlaceKind, BTreeSet<String>>,
    homonyms: BTreeSet<String>,
    flag_codes: BTreeSet<String>,
    languages: BTreeSet<String>,
    demonyms: Vec<DemonymRule>,
}

impl Gazetteer {
    /// Load a gazetteer from a JSON (or JSON-lines) file.
    ///
    /// Only the first non-empty line is read; it must hold the full array
    /// of country objects. Any structural problem is fatal: no partial
    /// store is ever built.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read gazetteer {}: {e}", path.display()))
        })?;
        let line = content
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("gazetteer {} is empty", path.display()))
            })?;
        Self::from_json(line)
    }

    /// Build a gazetteer from a JSON document holding the country array.
    pub fn from_json(document: &str) -> Result<Self> {
        let countries: Vec<Place> = serde_json::from_str(document)
            .map_err(|e| Error::configuration(format!("malformed gazetteer document: {e}")))?;
        Ok(Self::from_countries(countries))
    }

    /// Build a gazetteer from an already-parsed country tree.
    #[must_use]
    pub fn from_countries(countries: Vec<Place>) -> Self {
        let mut gazetteer = Gazetteer {
            countries: Vec::new(),
            names: BTreeMap::new(),
            homonyms: BTreeSet::new(),
            flag_codes: BTreeSet::new(),
            languages: BTreeSet::new(),
            demonyms: Vec::new(),
        };
        for country in &countries {
            gazetteer.index_place(country);
        }
        log::info!(
            "gazetteer loaded: {} countries, {} names, {} homonyms, {} flags, {} demonyms",
            countries.len(),
            gazetteer.names.values().map(BTreeSet::len).sum::<usize>(),
            gazetteer.homonyms.len(),
            gazetteer.flag_codes.len(),
            gazetteer.demonyms.len(),
        );
        gazetteer.countries = countries;
        gazetteer
    }

    fn index_place(&mut self, place: &Place) {
        let names = self.names.entry(place.kind).or_default();
        for name in place.normalized_names() {
            if name.is_empty() {
                continue;
            }
            if !names.insert(name.clone()) {
                // Duplicate normalized names across distinct places are a
                // data error unless flagged homonymous; they collapse into
                // one set entry either way.
                log::debug!("duplicate {} name '{}' collapsed", place.kind, name);
            }
        }
        self.flag_codes
            .extend(place.flag_emoji_codes.iter().map(|c| c.to_lowercase()));
        self.languages.extend(place.languages.iter().cloned());
        if let Some(demonyms) = &place.demonyms {
            for phrase in &demonyms.names {
                self.demonyms.push(DemonymRule {
                    phrase: normalize(phrase),
                    banned_prefixes: demonyms.banned_prefixes.iter().map(|p| normalize(p)).collect(),
                    banned_places: demonyms.banned_places.iter().map(|p| normalize(p)).collect(),
                });
            }
        }
        if place.homonymous {
            self.homonyms.insert(normalize(&place.name));
        }
        for child in place.children() {
            self.index_place(child);
        }
    }

    /// Normalized names at a given level.
    #[must_use]
    pub fn names(&self, kind: PlaceKind) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.names.get(&kind).unwrap_or(&EMPTY)
    }

    /// Normalized names flagged as homonymous in the source data.
    #[must_use]
    pub fn homonyms(&self) -> &BTreeSet<String> {
        &self.homonyms
    }

    /// Known emoji flag shortcodes, lowercased.
    #[must_use]
    pub fn flag_codes(&self) -> &BTreeSet<String> {
        &self.flag_codes
    }

    /// Language codes spoken somewhere in the tree.
    #[must_use]
    pub fn languages(&self) -> &BTreeSet<String> {
        &self.languages
    }

    /// Flattened demonym rules, in tree order.
    #[must_use]
    pub fn demonym_rules(&self) -> &[DemonymRule] {
        &self.demonyms
    }

    /// The full country tree.
    #[must_use]
    pub fn countries(&self) -> &[Place] {
        &self.countries
    }

    /// Depth-first search for the first place satisfying `pred`, returning
    /// its full ancestor chain.
    pub fn find_path(&self, pred: impl Fn(&Place) -> bool) -> Option<Chain<'_>> {
        fn walk<'g>(
            places: &'g [Place],
            pred: &dyn Fn(&Place) -> bool,
            path: &mut Vec<&'g Place>,
        ) -> Option<&'g Place> {
            for place in places {
                path.push(place);
                if pred(place) {
                    return Some(place);
                }
                if let Some(found) = walk(place.children(), pred, path) {
                    return Some(found);
                }
                path.pop();
            }
            None
        }
        let mut path = Vec::new();
        let found = walk(&self.countries, &pred, &mut path)?;
        Some(Chain { path, found })
    }

    /// Depth-first search collecting every place satisfying `pred`.
    pub fn collect_paths(&self, pred: impl Fn(&Place) -> bool) -> Vec<Chain<'_>> {
        fn walk<'g>(
            places: &'g [Place],
            pred: &dyn Fn(&Place) -> bool,
            path: &mut Vec<&'g Place>,
            out: &mut Vec<Chain<'g>>,
        ) {
            for place in places {
                path.push(place);
                if pred(place) {
                    out.push(Chain {
                        path: path.clone(),
                        found: place,
                    });
                }
                walk(place.children(), pred, path, out);
                path.pop();
            }
        }
        let mut path = Vec::new();
        let mut out = Vec::new();
        walk(&self.countries, &pred, &mut path, &mut out);
        out
    }

    /// Find the place at `kind` whose normalized canonical or alternative
    /// name equals `normalized`.
    pub fn find_name(&self, normalized: &str, kind: PlaceKind) -> Option<Chain<'_>> {
        self.find_path(|p| p.kind == kind && p.normalized_names().any(|n| n == normalized))
    }

    /// Find the place owning an emoji flag shortcode.
    pub fn find_flag(&self, code: &str) -> Option<Chain<'_>> {
        self.find_path(|p| {
            p.flag_emoji_codes
                .iter()
                .any(|c| c.eq_ignore_ascii_case(code))
        })
    }

    /// Find the place owning a normalized demonym phrase.
    pub fn find_demonym(&self, phrase: &str) -> Option<Chain<'_>> {
        self.find_path(|p| {
            p.demonyms
                .as_ref()
                .is_some_and(|d| d.names.iter().any(|n| normalize(n) == phrase))
        })
    }

    /// All places that primarily speak `language`.
    pub fn find_language(&self, language: &str) -> Vec<Chain<'_>> {
        self.collect_paths(|p| p.languages.iter().any(|l| l == language))
    }
}
