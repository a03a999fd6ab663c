//! Location detector: prioritized fallback chain over the detection
//! methods.
//!
//! The detector runs its enabled methods in a fixed priority order —
//! place-name matching, then demonyms, then description language, then
//! flags — and returns the first confident resolution together with the
//! method that produced it. There is no voting between methods: an earlier
//! method's answer stands even when a later one would disagree.
//!
//! ```no_run
//! use ubica::{LocationDetector, PlaceKind};
//!
//! let detector = LocationDetector::from_path("data/places_spain.json")?;
//! let resolution = detector.identify_location(
//!     "Valdemoro, España",
//!     "Me gusta el cine",
//!     PlaceKind::Region,
//! );
//! assert_eq!(resolution.place, "Comunidad de Madrid");
//! # Ok::<(), ubica::Error>(())
//! ```

use std::path::Path;

use crate::gazetteer::{Gazetteer, PlaceKind};
use crate::lang::LanguageEnsemble;
use crate::methods::{demonym, flag, language, location};
use crate::Result;

/// Label returned when no method resolves a place.
pub const DEFAULT_PLACE: &str = "unknown";

/// The four detection strategies, in their fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Direct place-name matching on the location field. Always enabled.
    PlaceName,
    /// Demonym matching on the description (consulting the location field
    /// for banned-place exclusions).
    Demonym,
    /// Language-majority matching on the description.
    DescriptionLanguage,
    /// Emoji-flag matching on the location field.
    Flag,
}

impl MethodKind {
    /// Wire label persisted by callers next to the resolved place.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MethodKind::PlaceName => "matching_place_location",
            MethodKind::Demonym => "matching_demonyms_description",
            MethodKind::DescriptionLanguage => "language_description",
            MethodKind::Flag => "matching_flag_location",
        }
    }
}

/// Outcome of one [`LocationDetector::identify_location`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved place name, or [`DEFAULT_PLACE`].
    pub place: String,
    /// Which method resolved it; `None` when every method fell through.
    pub method: Option<MethodKind>,
}

impl Resolution {
    /// True when no method produced a confident answer.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.method.is_none()
    }

    /// The resolving method's wire label, or the empty string.
    #[must_use]
    pub fn method_label(&self) -> &'static str {
        self.method.map_or("", MethodKind::label)
    }
}

/// Resolves free-text profile fields to administrative places.
///
/// Construction loads the gazetteer once; the detector is read-only
/// afterwards and can be shared across threads.
pub struct LocationDetector {
    gazetteer: Gazetteer,
    ensemble: LanguageEnsemble,
    methods: Vec<MethodKind>,
}

impl LocationDetector {
    /// Detector with every method enabled and the default language
    /// ensemble, loading the gazetteer from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::builder().build(Gazetteer::load(path)?))
    }

    /// Detector with every method enabled and the default language
    /// ensemble, over an already-loaded gazetteer.
    #[must_use]
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self::builder().build(gazetteer)
    }

    /// Configure which methods are enabled and which ensemble to use.
    #[must_use]
    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::default()
    }

    /// The loaded gazetteer.
    #[must_use]
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// The enabled methods, in priority order.
    #[must_use]
    pub fn methods(&self) -> &[MethodKind] {
        &self.methods
    }

    /// Run the enabled methods in priority order; first success wins.
    pub fn identify_location(
        &self,
        location: &str,
        description: &str,
        want: PlaceKind,
    ) -> Resolution {
        for &method in &self.methods {
            let found = match method {
                MethodKind::PlaceName => {
                    location::identify_place_from_location(&self.gazetteer, location, want)
                }
                MethodKind::Demonym => demonym::identify_place_from_demonyms_in_description(
                    &self.gazetteer,
                    description,
                    location,
                    want,
                ),
                MethodKind::DescriptionLanguage => {
                    language::identify_place_from_description_language(
                        &self.gazetteer,
                        &self.ensemble,
                        description,
                        want,
                    )
                }
                MethodKind::Flag => {
                    flag::identify_place_flag_in_location(&self.gazetteer, location, want)
                }
            };
            if let Some(place) = found {
                return Resolution {
                    place,
                    method: Some(method),
                };
            }
            log::debug!("method {} fell through", method.label());
        }
        Resolution {
            place: DEFAULT_PLACE.to_string(),
            method: None,
        }
    }

    /// Place-name matching only. Returns [`DEFAULT_PLACE`] on no match.
    #[must_use]
    pub fn identify_place_from_location(&self, location: &str, want: PlaceKind) -> String {
        location::identify_place_from_location(&self.gazetteer, location, want)
            .unwrap_or_else(|| DEFAULT_PLACE.to_string())
    }

    /// Flag matching only. Returns [`DEFAULT_PLACE`] on no match.
    #[must_use]
    pub fn identify_place_flag_in_location(&self, location: &str, want: PlaceKind) -> String {
        flag::identify_place_flag_in_location(&self.gazetteer, location, want)
            .unwrap_or_else(|| DEFAULT_PLACE.to_string())
    }

    /// Demonym matching only. Returns [`DEFAULT_PLACE`] on no match.
    #[must_use]
    pub fn identify_place_from_demonyms_in_description(
        &self,
        description: &str,
        location: &str,
        want: PlaceKind,
    ) -> String {
        demonym::identify_place_from_demonyms_in_description(
            &self.gazetteer,
            description,
            location,
            want,
        )
        .unwrap_or_else(|| DEFAULT_PLACE.to_string())
    }

    /// Language-majority matching only. Returns [`DEFAULT_PLACE`] on no
    /// match.
    #[must_use]
    pub fn identify_place_from_description_language(
        &self,
        description: &str,
        want: PlaceKind,
    ) -> String {
        language::identify_place_from_description_language(
            &self.gazetteer,
            &self.ensemble,
            description,
            want,
        )
        .unwrap_or_else(|| DEFAULT_PLACE.to_string())
    }
}

/// Builder over the method toggles and the language ensemble.
///
/// Place-name matching cannot be disabled; the other three methods can.
pub struct DetectorBuilder {
    flag_in_location: bool,
    demonym_in_description: bool,
    language_of_description: bool,
    ensemble: Option<LanguageEnsemble>,
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self {
            flag_in_location: true,
            demonym_in_description: true,
            language_of_description: true,
            ensemble: None,
        }
    }
}

impl DetectorBuilder {
    /// Toggle emoji-flag matching.
    #[must_use]
    pub fn flag_in_location(mut self, enabled: bool) -> Self {
        self.flag_in_location = enabled;
        self
    }

    /// Toggle demonym matching.
    #[must_use]
    pub fn demonym_in_description(mut self, enabled: bool) -> Self {
        self.demonym_in_description = enabled;
        self
    }

    /// Toggle language-majority matching.
    #[must_use]
    pub fn language_of_description(mut self, enabled: bool) -> Self {
        self.language_of_description = enabled;
        self
    }

    /// Replace the default language ensemble (used by tests to inject
    /// deterministic backends).
    #[must_use]
    pub fn ensemble(mut self, ensemble: LanguageEnsemble) -> Self {
        self.ensemble = Some(ensemble);
        self
    }

    /// Build the detector over `gazetteer`.
    #[must_use]
    pub fn build(self, gazetteer: Gazetteer) -> LocationDetector {
        let mut methods = vec![MethodKind::PlaceName];
        if self.demonym_in_description {
            methods.push(MethodKind::Demonym);
        }
        if self.language_of_description {
            methods.push(MethodKind::DescriptionLanguage);
        }
        if self.flag_in_location {
            methods.push(MethodKind::Flag);
        }
        let needs_ensemble = self.language_of_description;
        let ensemble = match self.ensemble {
            Some(ensemble) => ensemble,
            None if needs_ensemble => LanguageEnsemble::default(),
            // Language matching disabled: an empty ensemble avoids paying
            // for model initialization nobody will use.
            None => LanguageEnsemble::new(Vec::new()),
        };
        LocationDetector {
            gazetteer,
            ensemble,
            methods,
        }
    }
}
