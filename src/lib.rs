//! # ubica
//!
//! Location disambiguation for social-media profiles.
//!
//! Given the two free-text fields a profile offers — a `location` string
//! and a `description` (bio) — `ubica` resolves them to a canonical
//! administrative place using a hierarchical gazetteer and four
//! independent heuristics, tried in a fixed priority order:
//!
//! | # | Method | Input | Label |
//! |---|--------|-------|-------|
//! | 1 | Place-name matching + homonym resolution | location | `matching_place_location` |
//! | 2 | Demonym matching | description (+ location) | `matching_demonyms_description` |
//! | 3 | Description-language majority vote | description | `language_description` |
//! | 4 | Emoji-flag matching | location | `matching_flag_location` |
//!
//! The first method that produces a confident answer wins; when all fall
//! through, the resolution is the literal `"unknown"` with an empty method
//! label. Low confidence is the dominant outcome on real data and is part
//! of the contract, not an error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ubica::{LocationDetector, PlaceKind};
//!
//! let detector = LocationDetector::from_path("data/places_spain.json")?;
//! let resolution = detector.identify_location(
//!     "GC 🇮🇨",
//!     "Diputado por Lugo. Gallego, por lo tanto, español.",
//!     PlaceKind::Region,
//! );
//! println!("{} via {}", resolution.place, resolution.method_label());
//! # Ok::<(), ubica::Error>(())
//! ```
//!
//! ## Gazetteer
//!
//! The gazetteer is a country → region → province → city tree carrying
//! per-place alternative names, demonyms with exclusion rules, emoji flag
//! shortcodes and spoken languages. It loads once at construction and is
//! immutable afterwards, so a detector can be shared across threads. A
//! flat CSV form can be converted with [`GazetteerBuilder`].
//!
//! ## Design Philosophy
//!
//! - **First success wins**: no weighting or voting between methods.
//! - **`"unknown"` over guessing**: every matcher prefers abstaining to an
//!   ambiguous answer (homonyms without context, multi-flag strings,
//!   split language votes, multi-place languages).
//! - **Normalize once, compare exactly**: all matching happens on
//!   ASCII-lowercased, diacritic-stripped, single-spaced strings.

#![warn(missing_docs)]

pub mod detector;
mod error;
pub mod eval;
pub mod gazetteer;
pub mod lang;
pub mod matcher;
pub mod methods;
pub mod normalize;

pub use detector::{
    DetectorBuilder, LocationDetector, MethodKind, Resolution, DEFAULT_PLACE,
};
pub use error::{Error, Result};
pub use eval::{evaluate, EvalReport};
pub use gazetteer::builder::GazetteerBuilder;
pub use gazetteer::{Chain, DemonymRule, Demonyms, Gazetteer, Place, PlaceKind};
pub use lang::{
    LanguageDetect, LanguageEnsemble, LinguaDetector, ScriptDetector, StopwordDetector,
    WhatlangDetector, UNDEFINED_LANG,
};
pub use normalize::{normalize, strip_social_markup, tokenize};
