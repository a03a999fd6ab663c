//! Detector evaluation against a labeled test set.
//!
//! The test set is a CSV with `location` and `correct_location` columns;
//! `unknown` (any casing) marks the negative class. Only the place-name
//! method is exercised — the test sets are curated location strings, not
//! full profiles.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detector::{LocationDetector, DEFAULT_PLACE};
use crate::gazetteer::PlaceKind;
use crate::Result;

#[derive(Debug, Deserialize)]
struct TestRow {
    location: String,
    correct_location: String,
}

/// Confusion counts and derived metrics for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    /// Rows evaluated.
    pub total: usize,
    /// Correctly resolved places.
    pub true_positives: usize,
    /// Correctly returned `unknown`.
    pub true_negatives: usize,
    /// Resolved a place where the answer was `unknown` or a different
    /// place.
    pub false_positives: usize,
    /// Returned `unknown` where a place was expected.
    pub false_negatives: usize,
    /// (TP + TN) / total.
    pub accuracy: f64,
    /// TP / (TP + FP).
    pub precision: f64,
    /// TP / (TP + FN).
    pub recall: f64,
}

/// Evaluate the detector's place-name method over the test set at `path`.
pub fn evaluate(
    detector: &LocationDetector,
    path: impl AsRef<Path>,
    want: PlaceKind,
) -> Result<EvalReport> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let (mut total, mut tp, mut tn, mut fp, mut fn_) = (0usize, 0usize, 0usize, 0usize, 0usize);
    for row in reader.deserialize() {
        let row: TestRow = row?;
        total += 1;
        let answer = detector.identify_place_from_location(&row.location, want);
        let answer_lc = answer.to_lowercase();
        let expected_lc = row.correct_location.trim().to_lowercase();
        if answer_lc == expected_lc {
            if expected_lc == DEFAULT_PLACE {
                tn += 1;
            } else {
                tp += 1;
            }
        } else {
            log::info!(
                "evaluation miss: location '{}' resolved to '{}', expected '{}'",
                row.location,
                answer,
                row.correct_location
            );
            if answer_lc == DEFAULT_PLACE {
                fn_ += 1;
            } else {
                fp += 1;
            }
        }
    }
    let ratio = |num: usize, den: usize| {
        if den == 0 {
            0.0
        } else {
            num as f64 / den as f64
        }
    };
    let report = EvalReport {
        total,
        true_positives: tp,
        true_negatives: tn,
        false_positives: fp,
        false_negatives: fn_,
        accuracy: ratio(tp + tn, total),
        precision: ratio(tp, tp + fp),
        recall: ratio(tp, tp + fn_),
    };
    log::info!(
        "evaluation over {} rows: accuracy {:.4}, precision {:.4}, recall {:.4}",
        report.total,
        report.accuracy,
        report.precision,
        report.recall
    );
    Ok(report)
}
