//! CSV → JSON gazetteer conversion.
//!
//! The gazetteer is maintained as a flat spreadsheet, one row per (country,
//! region, province, city) path, with `/`-separated multi-value cells. This
//! module nests it into the tree consumed by [`Gazetteer::load`].
//!
//! Expected columns: `country`, `region`, `province`, `city`,
//! `homonymous_places`, `language`, `flag_emoji_code`, `demonym`,
//! `demonym_banned_prefixes`, `demonym_banned_places`.
//!
//! Within a name cell, the first `/`-separated value is the canonical name
//! and the rest are alternative names. A place's attributes (languages,
//! flags, demonyms) are captured from the first row in which that place
//! appears; later rows only extend the tree below it.

use std::path::Path;

use serde::Deserialize;

use crate::gazetteer::{Demonyms, Gazetteer, Place, PlaceKind};
use crate::{Error, Result};

const SEPARATOR: char = '/';

#[derive(Debug, Deserialize)]
struct Row {
    country: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    province: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    homonymous_places: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    flag_emoji_code: String,
    #[serde(default)]
    demonym: String,
    #[serde(default)]
    demonym_banned_prefixes: String,
    #[serde(default)]
    demonym_banned_places: String,
}

impl Row {
    fn cell(&self, kind: PlaceKind) -> &str {
        match kind {
            PlaceKind::Country => &self.country,
            PlaceKind::Region => &self.region,
            PlaceKind::Province => &self.province,
            PlaceKind::City => &self.city,
        }
    }
}

fn split_cell(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(SEPARATOR)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Builds the nested gazetteer tree from the flat CSV format.
#[derive(Debug, Default)]
pub struct GazetteerBuilder;

impl GazetteerBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse the CSV at `path` into a country tree.
    pub fn from_csv_path(&self, path: impl AsRef<Path>) -> Result<Vec<Place>> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        self.build(reader.deserialize())
    }

    /// Parse CSV content into a country tree.
    pub fn from_csv_str(&self, content: &str) -> Result<Vec<Place>> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        self.build(reader.deserialize())
    }

    fn build(
        &self,
        rows: impl Iterator<Item = std::result::Result<Row, csv::Error>>,
    ) -> Result<Vec<Place>> {
        let mut countries: Vec<Place> = Vec::new();
        let mut homonymous: Vec<String> = Vec::new();
        for (line, row) in rows.enumerate() {
            let row = row.map_err(|e| {
                Error::configuration(format!("malformed gazetteer CSV row {}: {e}", line + 1))
            })?;
            if row.country.is_empty() {
                return Err(Error::configuration(format!(
                    "gazetteer CSV row {} has no country",
                    line + 1
                )));
            }
            for name in split_cell(&row.homonymous_places) {
                if !homonymous.contains(&name) {
                    homonymous.push(name);
                }
            }

            let country = upsert(&mut countries, &row, PlaceKind::Country, &homonymous);
            if row.region.is_empty() {
                continue;
            }
            let region = upsert(&mut country.regions, &row, PlaceKind::Region, &homonymous);
            if row.province.is_empty() {
                continue;
            }
            let province = upsert(&mut region.provinces, &row, PlaceKind::Province, &homonymous);
            if !row.city.is_empty() {
                upsert(&mut province.cities, &row, PlaceKind::City, &homonymous);
            }
        }
        log::info!("gazetteer CSV converted: {} countries", countries.len());
        Ok(countries)
    }

    /// Serialize a country tree as the single-line JSON document consumed
    /// by [`Gazetteer::load`].
    pub fn write_json(&self, countries: &[Place], path: impl AsRef<Path>) -> Result<()> {
        let document = serde_json::to_string(countries)?;
        std::fs::write(path.as_ref(), document)?;
        Ok(())
    }

    /// End-to-end conversion: CSV in, JSON out, and a loaded [`Gazetteer`]
    /// back for immediate use.
    pub fn convert(
        &self,
        csv_path: impl AsRef<Path>,
        json_path: impl AsRef<Path>,
    ) -> Result<Gazetteer> {
        let countries = self.from_csv_path(csv_path)?;
        self.write_json(&countries, json_path)?;
        Ok(Gazetteer::from_countries(countries))
    }
}

/// Find the row's place at `kind` in `siblings`, creating it (with this
/// row's attributes) when absent.
fn upsert<'a>(
    siblings: &'a mut Vec<Place>,
    row: &Row,
    kind: PlaceKind,
    homonymous: &[String],
) -> &'a mut Place {
    let names = split_cell(row.cell(kind));
    let canonical = names.first().cloned().unwrap_or_default();
    if let Some(idx) = siblings.iter().position(|p| p.name == canonical) {
        return &mut siblings[idx];
    }
    let demonym_names = split_cell(&row.demonym);
    let demonyms = if demonym_names.is_empty() {
        None
    } else {
        Some(Demonyms {
            names: demonym_names,
            banned_prefixes: split_cell(&row.demonym_banned_prefixes),
            banned_places: split_cell(&row.demonym_banned_places),
        })
    };
    siblings.push(Place {
        name: canonical.clone(),
        alternative_names: names.into_iter().skip(1).collect(),
        kind,
        flag_emoji_codes: split_cell(&row.flag_emoji_code),
        languages: split_cell(&row.language),
        homonymous: homonymous.contains(&canonical),
        demonyms,
        regions: Vec::new(),
        provinces: Vec::new(),
        cities: Vec::new(),
    });
    let idx = siblings.len() - 1;
    &mut siblings[idx]
}
