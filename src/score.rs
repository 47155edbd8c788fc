use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One finished round, as it appears on the scoreboard.
///
/// Built exactly once, at the moment a round ends, and never mutated
/// afterwards. The timestamp is kept as a preformatted display string so
/// persisted entries render the same way they were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub timestamp: String,
    pub hits: u32,
    #[serde(rename = "accuracyPercent")]
    pub accuracy_percent: f64,
}

impl ScoreResult {
    /// Build a result for a round that presented words from a pool of
    /// `total_words`. Accuracy is hits over the full pool, rounded to two
    /// decimal places.
    pub fn new(hits: u32, total_words: usize, ended_at: DateTime<Local>) -> Self {
        Self {
            timestamp: ended_at.format("%b %d, %I:%M %p").to_string(),
            hits,
            accuracy_percent: accuracy_percent(hits, total_words),
        }
    }
}

/// `round2(hits / total * 100)`; an empty pool scores 0.0 rather than NaN.
pub fn accuracy_percent(hits: u32, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    let raw = hits as f64 / total_words as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy_percent(1, 3), 33.33);
        assert_eq!(accuracy_percent(2, 3), 66.67);
        assert_eq!(accuracy_percent(3, 3), 100.0);
        assert_eq!(accuracy_percent(0, 120), 0.0);
    }

    #[test]
    fn test_accuracy_empty_pool() {
        assert_eq!(accuracy_percent(0, 0), 0.0);
    }

    #[test]
    fn test_result_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap();
        let result = ScoreResult::new(4, 10, at);

        assert_eq!(result.timestamp, "Mar 07, 02:05 PM");
        assert_eq!(result.hits, 4);
        assert_eq!(result.accuracy_percent, 40.0);
    }

    #[test]
    fn test_result_serde_round_trip() {
        let result = ScoreResult::new(7, 120, Local::now());
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("accuracyPercent"));
        let back: ScoreResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
