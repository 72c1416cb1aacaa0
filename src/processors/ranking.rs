//! Ranking of raw classifier scores.

use crate::core::GrainError;
use crate::domain::{Classification, PredictionRecord, RICE_VARIETIES, RiceVariety};
use tracing::error;

/// Maps raw per-class scores to labeled, sorted predictions.
///
/// Scores are zipped with the label table by index, then sorted by descending
/// confidence. Equal confidences keep ascending class index order, so the
/// output is fully deterministic.
#[derive(Debug, Clone)]
pub struct ResultRanker {
    labels: &'static [RiceVariety],
}

impl Default for ResultRanker {
    fn default() -> Self {
        Self {
            labels: &RICE_VARIETIES,
        }
    }
}

impl ResultRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks a score vector.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::ScoreVectorLength`] when the vector length differs
    /// from the label table. This means the model and the label table are out of
    /// sync, and [`GrainError::NonFiniteScore`] when any score is NaN or
    /// infinite, which no valid model output contains.
    pub fn rank(&self, scores: &[f32]) -> Result<Classification, GrainError> {
        if scores.len() != self.labels.len() {
            let error = GrainError::ScoreVectorLength {
                expected: self.labels.len(),
                actual: scores.len(),
            };
            error!("{}", error);
            return Err(error);
        }

        if let Some((class_index, &value)) =
            scores.iter().enumerate().find(|(_, s)| !s.is_finite())
        {
            let error = GrainError::NonFiniteScore { class_index, value };
            error!("{}", error);
            return Err(error);
        }

        let mut records: Vec<PredictionRecord> = self
            .labels
            .iter()
            .zip(scores)
            .map(|(&variety, &confidence)| PredictionRecord::new(variety, confidence))
            .collect();

        records.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then(a.class_index.cmp(&b.class_index))
        });

        Ok(Classification::from_ranked(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_confidence() {
        let ranked = ResultRanker::new()
            .rank(&[0.05, 0.05, 0.05, 0.05, 0.05, 0.75])
            .unwrap();

        let top = ranked.top().unwrap();
        assert_eq!(top.class_name, "Sushi Rice");
        assert_eq!(top.confidence, 0.75);
        assert_eq!(ranked.len(), 6);
    }

    #[test]
    fn test_ties_keep_label_order() {
        let ranked = ResultRanker::new()
            .rank(&[0.1, 0.3, 0.1, 0.3, 0.1, 0.1])
            .unwrap();
        let indices: Vec<_> = ranked.iter().map(|r| r.class_index).collect();
        assert_eq!(indices, vec![1, 3, 0, 2, 4, 5]);
    }

    #[test]
    fn test_each_label_once() {
        let ranked = ResultRanker::new()
            .rank(&[0.4, 0.02, 0.3, 0.08, 0.1, 0.1])
            .unwrap();
        let mut indices: Vec<_> = ranked.iter().map(|r| r.class_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..6).collect::<Vec<_>>());
        for pair in ranked.records().windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_wrong_length_is_contract_violation() {
        let error = ResultRanker::new().rank(&[0.5, 0.5]).unwrap_err();
        assert!(matches!(
            error,
            GrainError::ScoreVectorLength {
                expected: 6,
                actual: 2
            }
        ));
        assert!(error.is_contract_violation());
    }

    #[test]
    fn test_nan_score_is_rejected() {
        let error = ResultRanker::new()
            .rank(&[0.1, f32::NAN, 0.3, 0.2, 0.25, 0.15])
            .unwrap_err();
        assert!(matches!(
            error,
            GrainError::NonFiniteScore { class_index: 1, .. }
        ));
        assert!(error.is_contract_violation());
    }

    #[test]
    fn test_infinite_score_is_rejected() {
        let result = ResultRanker::new().rank(&[0.1, 0.2, 0.3, f32::INFINITY, 0.25, 0.15]);
        assert!(matches!(
            result,
            Err(GrainError::NonFiniteScore { class_index: 3, .. })
        ));
    }
}
