//! Language-majority matching with injected deterministic backends.

mod common;

use common::fixture_gazetteer;
use ubica::{LanguageDetect, LanguageEnsemble, LocationDetector, PlaceKind, UNDEFINED_LANG};

/// Backend that always votes the same language.
struct Fixed(&'static str);

impl LanguageDetect for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }
    fn detect(&self, _text: &str) -> String {
        self.0.to_string()
    }
}

fn detector_with_votes(votes: [&'static str; 4]) -> LocationDetector {
    let ensemble =
        LanguageEnsemble::new(votes.into_iter().map(|v| Box::new(Fixed(v)) as _).collect());
    LocationDetector::builder()
        .ensemble(ensemble)
        .build(fixture_gazetteer())
}

#[test]
fn three_of_four_agreement_resolves() {
    let detector = detector_with_votes(["gl", "gl", "gl", "es"]);
    assert_eq!(
        detector.identify_place_from_description_language("Unha aperta a todos.", PlaceKind::Region),
        "Galicia"
    );
}

#[test]
fn two_of_four_agreement_is_unknown() {
    let detector = detector_with_votes(["gl", "gl", "es", "es"]);
    assert_eq!(
        detector.identify_place_from_description_language("Unha aperta a todos.", PlaceKind::Region),
        "unknown"
    );
}

#[test]
fn failed_backends_lose_their_vote() {
    // Two broken backends report "undefined"; the remaining agreement is
    // below quorum.
    let detector = detector_with_votes(["gl", "gl", UNDEFINED_LANG, UNDEFINED_LANG]);
    assert_eq!(
        detector.identify_place_from_description_language("Unha aperta.", PlaceKind::Region),
        "unknown"
    );
}

#[test]
fn language_spoken_in_several_places_at_a_level_is_rejected() {
    // Catalan is spoken in Cataluña and Comunidad Valenciana: two regions,
    // no provinces or cities, so no level has exactly one place.
    let detector = detector_with_votes(["ca", "ca", "ca", "ca"]);
    assert_eq!(
        detector.identify_place_from_description_language("Bon dia a tothom.", PlaceKind::Region),
        "unknown"
    );
}

#[test]
fn country_level_language_falls_back_to_country_label() {
    let detector = detector_with_votes(["es", "es", "es", "es"]);
    assert_eq!(
        detector.identify_place_from_description_language("Hola a todos.", PlaceKind::Region),
        "España"
    );
}

#[test]
fn unmapped_majority_language_is_unknown() {
    let detector = detector_with_votes(["fr", "fr", "fr", "fr"]);
    assert_eq!(
        detector.identify_place_from_description_language("Bonjour à tous.", PlaceKind::Region),
        "unknown"
    );
}

#[test]
fn empty_description_short_circuits() {
    let detector = detector_with_votes(["es", "es", "es", "es"]);
    assert_eq!(
        detector.identify_place_from_description_language("", PlaceKind::Region),
        "unknown"
    );
    // Emoji-only bios normalize to nothing before the ensemble runs.
    assert_eq!(
        detector.identify_place_from_description_language("🎉🎉🎉", PlaceKind::Region),
        "unknown"
    );
}

#[test]
fn default_ensemble_reaches_quorum_on_clear_spanish() {
    // Real backends: whatlang, lingua and the stopword profiles all agree
    // on unambiguous Spanish prose; the script backend abstains.
    let detector = LocationDetector::new(fixture_gazetteer());
    let description = "Me gusta la ciudad y el campo, pero sobre todo me gusta la gente \
                       que vive en los pueblos de este pais.";
    assert_eq!(
        detector.identify_place_from_description_language(description, PlaceKind::Region),
        "España"
    );
}
