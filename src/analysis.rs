//! Summary statistics over a user's mood entries.

use std::collections::BTreeMap;

use crate::dto::{MoodAnalysisResponse, MoodTrend};
use crate::models::mood_entry::MoodEntry;

/// Count, mean rating, chronological trend and rating histogram.
///
/// Entries may arrive in any order; trends are always ascending by
/// `entry_date`. No entries yields the all-zero analysis.
pub fn analyze(entries: &[MoodEntry]) -> MoodAnalysisResponse {
    if entries.is_empty() {
        return MoodAnalysisResponse::default();
    }

    let mut ordered: Vec<&MoodEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| (a.entry_date, a.id).cmp(&(b.entry_date, b.id)));

    let total = ordered.len();
    let sum: i64 = ordered.iter().map(|e| i64::from(e.mood_rating)).sum();

    let mut distribution: BTreeMap<i32, usize> = BTreeMap::new();
    for entry in &ordered {
        *distribution.entry(entry.mood_rating).or_insert(0) += 1;
    }

    MoodAnalysisResponse {
        total_entries: total,
        average_mood_rating: sum as f64 / total as f64,
        trends: ordered
            .into_iter()
            .map(|e| MoodTrend {
                date: e.entry_date,
                mood_rating: e.mood_rating,
                notes: e.notes.clone(),
            })
            .collect(),
        mood_distribution: distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn entry(id: i64, day: u32, rating: i32) -> MoodEntry {
        MoodEntry {
            id,
            user_id: Uuid::nil(),
            mood_rating: rating,
            notes: Some(format!("day {}", day)),
            entry_date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_is_zeroed() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.total_entries, 0);
        assert_eq!(analysis.average_mood_rating, 0.0);
        assert!(analysis.trends.is_empty());
        assert!(analysis.mood_distribution.is_empty());
    }

    #[test]
    fn test_two_entry_example() {
        let analysis = analyze(&[entry(1, 1, 3), entry(2, 2, 5)]);

        assert_eq!(analysis.total_entries, 2);
        assert_eq!(analysis.average_mood_rating, 4.0);
        assert_eq!(analysis.mood_distribution, BTreeMap::from([(3, 1), (5, 1)]));
        assert_eq!(analysis.trends[0].mood_rating, 3);
        assert_eq!(analysis.trends[1].mood_rating, 5);
    }

    #[test]
    fn test_average_is_not_rounded() {
        let analysis = analyze(&[entry(1, 1, 1), entry(2, 2, 2), entry(3, 3, 2)]);
        assert!((analysis.average_mood_rating - 5.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_independent_of_input_order() {
        let forward = analyze(&[entry(1, 1, 2), entry(2, 2, 4), entry(3, 3, 4), entry(4, 4, 1)]);
        let shuffled = analyze(&[entry(3, 3, 4), entry(1, 1, 2), entry(4, 4, 1), entry(2, 2, 4)]);

        assert_eq!(forward, shuffled);
        let days: Vec<u32> = shuffled
            .trends
            .iter()
            .map(|t| chrono::Datelike::day(&t.date))
            .collect();
        assert_eq!(days, [1, 2, 3, 4]);
    }

    #[test]
    fn test_distribution_only_has_present_ratings_and_sums_to_total() {
        let entries: Vec<MoodEntry> = (1..=9).map(|d| entry(d as i64, d, if d % 3 == 0 { 5 } else { 2 })).collect();
        let analysis = analyze(&entries);

        assert_eq!(analysis.mood_distribution.keys().copied().collect::<Vec<_>>(), [2, 5]);
        assert_eq!(
            analysis.mood_distribution.values().sum::<usize>(),
            analysis.total_entries
        );
        assert!(!analysis.mood_distribution.contains_key(&1));
    }

    #[test]
    fn test_trend_keeps_notes() {
        let analysis = analyze(&[entry(1, 5, 4)]);
        assert_eq!(analysis.trends[0].notes.as_deref(), Some("day 5"));
    }
}
