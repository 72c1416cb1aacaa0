//! Prediction records returned to the caller.

use super::labels::RiceVariety;
use serde::Serialize;
use std::fmt;

/// One labeled score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    /// Display name of the variety.
    pub class_name: &'static str,
    /// Index of the variety in the label table.
    pub class_index: usize,
    /// Model probability for this variety, in `[0, 1]`.
    pub confidence: f32,
}

impl PredictionRecord {
    /// Builds a record for a variety.
    pub fn new(variety: RiceVariety, confidence: f32) -> Self {
        Self {
            class_name: variety.name(),
            class_index: variety.index(),
            confidence,
        }
    }

    /// The variety this record refers to.
    pub fn variety(&self) -> Option<RiceVariety> {
        RiceVariety::from_index(self.class_index)
    }

    /// Confidence as a percentage.
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

impl fmt::Display for PredictionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.class_name, self.confidence_percent())
    }
}

/// Ranked predictions for one image.
///
/// Records are sorted by descending confidence, ties broken by ascending class
/// index. Every known variety appears exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Classification {
    records: Vec<PredictionRecord>,
}

impl Classification {
    /// Wraps records that are already ranked.
    pub(crate) fn from_ranked(records: Vec<PredictionRecord>) -> Self {
        Self { records }
    }

    /// The highest-confidence prediction.
    pub fn top(&self) -> Option<&PredictionRecord> {
        self.records.first()
    }

    /// All records, best first.
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
        self.records.iter()
    }

    /// Sum of all confidences; close to 1.0 for a softmax output.
    pub fn confidence_total(&self) -> f32 {
        self.records.iter().map(|r| r.confidence).sum()
    }

    /// Records in label-table order, one per variety, for per-class charts.
    pub fn by_class_index(&self) -> Vec<PredictionRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.class_index);
        records
    }

    /// Consumes the classification, returning the ranked records.
    pub fn into_records(self) -> Vec<PredictionRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Classification {
    type Item = &'a PredictionRecord;
    type IntoIter = std::slice::Iter<'a, PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}
