//! Demonym matching over the Spain fixture gazetteer.

mod common;

use common::fixture_detector;
use ubica::PlaceKind;

#[test]
fn regional_demonym_beats_the_national_one() {
    let detector = fixture_detector();
    let description = "Diputado por Lugo @GPPopular Vicesecretario Nacional de Participación \
                       🅿️🅿️ Abogado. Gallego, por lo tanto, español. Instagram: jaimedeolanopp 👏";
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(description, "", PlaceKind::Region),
        "Galicia"
    );
}

#[test]
fn banned_prefix_suppresses_the_match() {
    let detector = fixture_detector();
    // "rock en español" names a genre, not a residence.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Hola, me gusta el color negro y el rock en español.",
            "Bucaramanga, Santander",
            PlaceKind::Region
        ),
        "unknown"
    );
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Texano. Me gusta lo español. Católico. Conservador.",
            "San Antonio",
            PlaceKind::Region
        ),
        "unknown"
    );
}

#[test]
fn banned_place_in_location_suppresses_the_match() {
    let detector = fixture_detector();
    // A Zamorano whose location names the Mexican Zamora is not from the
    // Spanish one.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Mexicano, Michoacano, Zamorano, Atlista, Raider. Enamorado y pareja de \
             @claus1026. México es más que sus políticos🇲🇽",
            "Zamora, Michoacan",
            PlaceKind::Region
        ),
        "unknown"
    );
    // Without the co-located mention the demonym stands.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Zamorano de toda la vida.",
            "",
            PlaceKind::Region
        ),
        "Castilla y León"
    );
}

#[test]
fn valencian_identity_resolves_despite_negated_national_demonym() {
    let detector = fixture_detector();
    let description = "SOM VALENCIANS. Pero un hombre honesto, no es frances, ni alemán, \
                       ni español, es ciudadano del mundo, y su patria esta en todas partes. \
                       100% VALENCIANISTE.";
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(description, "", PlaceKind::Region),
        "Comunidad Valenciana"
    );
}

#[test]
fn demonym_phrases_must_be_consecutive() {
    let detector = fixture_detector();
    // Both words of no demonym appear adjacent here; "gallego" alone does.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Soy gallego y muy orgulloso.",
            "",
            PlaceKind::Region
        ),
        "Galicia"
    );
    // The demonym split across other words does not count.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "galle y luego go",
            "",
            PlaceKind::Region
        ),
        "unknown"
    );
}

#[test]
fn requested_granularity_resolves_along_the_parent_chain() {
    let detector = fixture_detector();
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Zamorano de toda la vida.",
            "",
            PlaceKind::Country
        ),
        "España"
    );
    // Deeper than the demonym's owner: the fallback goes straight to the
    // country, not to the owning region.
    assert_eq!(
        detector.identify_place_from_demonyms_in_description(
            "Gallega de nacimiento.",
            "",
            PlaceKind::City
        ),
        "España"
    );
}

#[test]
fn empty_description_is_unknown() {
    let detector = fixture_detector();
    assert_eq!(
        detector.identify_place_from_demonyms_in_description("", "Madrid", PlaceKind::Region),
        "unknown"
    );
}
