//! CSV → JSON gazetteer conversion, end to end.

use ubica::{Error, Gazetteer, GazetteerBuilder, PlaceKind};

const CSV: &str = "\
country,region,province,city,homonymous_places,language,flag_emoji_code,demonym,demonym_banned_prefixes,demonym_banned_places
España/Spain/Espanya,,,,,es,:es:,español/española,en/lo/ni,
España,Galicia,,,,gl,,gallego/gallega,,
España,Galicia,Lugo,Lugo,Lugo,,,,,
España,Canarias/Islas Canarias,,,,,:ic:,,,
España,Castilla y León,Zamora,Zamora,Zamora,,,zamorano,,Zamora/Michoacan
";

#[test]
fn converted_csv_loads_and_detects() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("places.csv");
    let json_path = dir.path().join("places.json");
    std::fs::write(&csv_path, CSV).unwrap();
    let gazetteer = GazetteerBuilder::new()
        .convert(&csv_path, &json_path)
        .unwrap();

    assert!(gazetteer.names(PlaceKind::Country).contains("espanya"));
    assert!(gazetteer.names(PlaceKind::Region).contains("islas canarias"));
    assert!(gazetteer.homonyms().contains("lugo"));
    assert!(gazetteer.homonyms().contains("zamora"));
    assert!(gazetteer.flag_codes().contains(":ic:"));
    assert!(gazetteer
        .demonym_rules()
        .iter()
        .any(|r| r.phrase == "zamorano" && r.banned_places == ["zamora", "michoacan"]));

    // The written document is the single-line format `load` expects.
    let reloaded = Gazetteer::load(&json_path).unwrap();
    assert_eq!(
        reloaded.names(PlaceKind::City),
        gazetteer.names(PlaceKind::City)
    );

    let detector = ubica::LocationDetector::builder()
        .language_of_description(false)
        .build(reloaded);
    assert_eq!(
        detector.identify_place_from_location("Lugo, Galicia", PlaceKind::Region),
        "Galicia"
    );
}

#[test]
fn malformed_csv_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "country,region\n,Galicia\n").unwrap();
    let err = GazetteerBuilder::new().from_csv_path(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn missing_gazetteer_file_is_a_configuration_error() {
    let err = Gazetteer::load("/nonexistent/places.json").unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}
