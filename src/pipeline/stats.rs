//! Pipeline-wide statistics helpers.
//!
//! This module defines the `PipelineStats` structure used to track
//! classification requests and the `StatsManager` helper that coordinates
//! thread-safe updates to these metrics.

use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Statistics for the classification pipeline.
///
/// Tracks how many requests reached the model stage and how long they took.
/// Requests rejected before admission (busy, model unavailable) are not counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    /// The total number of classification requests processed.
    pub total_processed: usize,
    /// The number of requests that returned a ranked classification.
    pub successful_predictions: usize,
    /// The number of requests that failed after admission.
    pub failed_predictions: usize,
    /// The average classification time in milliseconds.
    pub average_classification_time_ms: f64,
}

impl PipelineStats {
    /// Creates a new PipelineStats instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the success rate as a percentage (0.0 to 100.0).
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            (self.successful_predictions as f64 / self.total_processed as f64) * 100.0
        }
    }

    /// Returns the failure rate as a percentage (0.0 to 100.0).
    pub fn failure_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            (self.failed_predictions as f64 / self.total_processed as f64) * 100.0
        }
    }

    /// Returns the average processing speed in images per second.
    pub fn images_per_second(&self) -> f64 {
        if self.average_classification_time_ms == 0.0 {
            0.0
        } else {
            1000.0 / self.average_classification_time_ms
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Statistics:")?;
        writeln!(f, "  Total processed: {}", self.total_processed)?;
        writeln!(
            f,
            "  Successful: {} ({:.1}%)",
            self.successful_predictions,
            self.success_rate()
        )?;
        writeln!(
            f,
            "  Failed: {} ({:.1}%)",
            self.failed_predictions,
            self.failure_rate()
        )?;
        writeln!(
            f,
            "  Average classification time: {:.2} ms",
            self.average_classification_time_ms
        )?;
        writeln!(
            f,
            "  Processing speed: {:.2} images/sec",
            self.images_per_second()
        )?;
        Ok(())
    }
}

/// Thread-safe manager for updating pipeline statistics.
#[derive(Debug, Default)]
pub struct StatsManager {
    stats: Mutex<PipelineStats>,
}

impl StatsManager {
    /// Creates a new `StatsManager` instance with zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    // Counters stay meaningful after a panicking request, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, PipelineStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current statistics snapshot.
    pub fn get_stats(&self) -> PipelineStats {
        self.lock().clone()
    }

    /// Records one finished request.
    pub fn record(&self, succeeded: bool, elapsed_ms: f64) {
        let mut stats = self.lock();

        let previous_total = stats.total_processed;
        let new_total = previous_total + 1;
        let accumulated = stats.average_classification_time_ms * previous_total as f64;

        stats.total_processed = new_total;
        if succeeded {
            stats.successful_predictions += 1;
        } else {
            stats.failed_predictions += 1;
        }
        stats.average_classification_time_ms = (accumulated + elapsed_ms) / new_total as f64;
    }

    /// Resets the tracked statistics to their default state.
    pub fn reset_stats(&self) {
        *self.lock() = PipelineStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_running_average() {
        let manager = StatsManager::new();
        manager.record(true, 10.0);
        manager.record(false, 30.0);
        manager.record(true, 20.0);

        let stats = manager.get_stats();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.successful_predictions, 2);
        assert_eq!(stats.failed_predictions, 1);
        assert!((stats.average_classification_time_ms - 20.0).abs() < 1e-9);
        assert!((stats.success_rate() - 66.666).abs() < 0.01);
        assert!((stats.images_per_second() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let manager = StatsManager::new();
        manager.record(true, 5.0);
        manager.reset_stats();
        assert_eq!(manager.get_stats(), PipelineStats::default());
        assert_eq!(manager.get_stats().success_rate(), 0.0);
    }

    #[test]
    fn test_display_summary() {
        let manager = StatsManager::new();
        manager.record(true, 4.0);
        let text = manager.get_stats().to_string();
        assert!(text.contains("Total processed: 1"));
        assert!(text.contains("Successful: 1 (100.0%)"));
    }
}
