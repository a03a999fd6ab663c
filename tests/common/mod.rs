//! Shared fixtures for the integration suites.

use ubica::{Gazetteer, LocationDetector};

/// Path to the Spain fixture gazetteer.
pub fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("places_spain.json")
}

/// Fixture gazetteer, loaded through the file path like production does.
pub fn fixture_gazetteer() -> Gazetteer {
    Gazetteer::load(fixture_path()).expect("fixture gazetteer loads")
}

/// Detector over the fixture gazetteer with every method enabled.
pub fn fixture_detector() -> LocationDetector {
    LocationDetector::new(fixture_gazetteer())
}
