//! Plain-text views: the entry list and the analysis dashboard.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::dto::{MoodAnalysisResponse, MoodEntryResponse};

const BAR: char = '█';
const DISTRIBUTION_WIDTH: usize = 30;

pub fn mood_label(rating: i32) -> &'static str {
    match rating {
        1 => "Very Sad",
        2 => "Sad",
        3 => "Neutral",
        4 => "Happy",
        5 => "Very Happy",
        _ => "Unknown",
    }
}

pub fn mood_emoji(rating: i32) -> &'static str {
    match rating {
        1 => "😢",
        2 => "😟",
        3 => "😐",
        4 => "😊",
        5 => "😄",
        _ => "❔",
    }
}

/// `January 2, 2024`
pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Jan 2`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

pub fn render_entry(entry: &MoodEntryResponse) -> String {
    let mut line = format!(
        "{}  {} {} ({}/5)",
        long_date(&entry.entry_date),
        mood_emoji(entry.mood_rating),
        mood_label(entry.mood_rating),
        entry.mood_rating
    );
    if let Some(notes) = entry.notes.as_deref() {
        line.push_str("\n    ");
        line.push_str(notes);
    }
    line
}

pub fn render_history(entries: &[MoodEntryResponse]) -> String {
    if entries.is_empty() {
        return "Mood History\n\nNo mood entries yet\nStart tracking your mood to see your history here.\n"
            .to_string();
    }

    let mut out = String::from("Mood History\n\n");
    for entry in entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out
}

pub fn render_analysis(analysis: &MoodAnalysisResponse) -> String {
    if analysis.total_entries == 0 {
        return "Mood Analysis\n\nNo data to analyze\nAdd more mood entries to see your mood trends and analysis.\n"
            .to_string();
    }

    let mut out = String::new();
    let highest = analysis
        .trends
        .iter()
        .map(|t| t.mood_rating)
        .max()
        .unwrap_or_default();

    // write! into a String cannot fail.
    let _ = writeln!(out, "Mood Analysis\n");
    let _ = writeln!(out, "  Average Mood   {:.1}", analysis.average_mood_rating);
    let _ = writeln!(out, "  Total Entries  {}", analysis.total_entries);
    let _ = writeln!(out, "  Highest Mood   {}", highest);

    let _ = writeln!(out, "\nMood Trends Over Time");
    for trend in &analysis.trends {
        let rating = trend.mood_rating.clamp(0, 5) as usize;
        let _ = writeln!(
            out,
            "  {:<7} {:<5} {}",
            short_date(&trend.date),
            BAR.to_string().repeat(rating),
            trend.mood_rating
        );
    }

    let _ = writeln!(out, "\nMood Distribution");
    let total = analysis.total_entries as f64;
    for (rating, count) in &analysis.mood_distribution {
        let share = *count as f64 / total;
        let width = (share * DISTRIBUTION_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {} {:<10} {:<width$} {} ({:.0}%)",
            mood_emoji(*rating),
            mood_label(*rating),
            BAR.to_string().repeat(width.max(1)),
            count,
            share * 100.0,
            width = DISTRIBUTION_WIDTH
        );
    }

    let _ = writeln!(out, "\nInsights");
    let _ = writeln!(
        out,
        "  Your average mood rating is {:.1} out of 5.",
        analysis.average_mood_rating
    );
    let _ = writeln!(
        out,
        "  You've logged {} mood entries so far.",
        analysis.total_entries
    );
    if analysis.trends.len() >= 7 {
        let _ = writeln!(
            out,
            "  Keep tracking your mood daily to identify patterns and trends over time."
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::MoodTrend;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn analysis_for(ratings: &[i32]) -> MoodAnalysisResponse {
        let trends: Vec<MoodTrend> = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| MoodTrend {
                date: at(i as u32 + 1),
                mood_rating: *r,
                notes: None,
            })
            .collect();
        let mut distribution = BTreeMap::new();
        for r in ratings {
            *distribution.entry(*r).or_insert(0) += 1;
        }
        MoodAnalysisResponse {
            total_entries: ratings.len(),
            average_mood_rating: ratings.iter().sum::<i32>() as f64 / ratings.len() as f64,
            trends,
            mood_distribution: distribution,
        }
    }

    #[test]
    fn test_dates() {
        assert_eq!(long_date(&at(2)), "January 2, 2024");
        assert_eq!(short_date(&at(2)), "Jan 2");
    }

    #[test]
    fn test_history_lists_entries_with_labels() {
        let entries = vec![
            MoodEntryResponse {
                id: 2,
                mood_rating: 5,
                notes: Some("great run".into()),
                entry_date: at(2),
            },
            MoodEntryResponse {
                id: 1,
                mood_rating: 3,
                notes: None,
                entry_date: at(1),
            },
        ];

        let text = render_history(&entries);
        let first = text.find("January 2, 2024").unwrap();
        let second = text.find("January 1, 2024").unwrap();
        assert!(first < second);
        assert!(text.contains("Very Happy (5/5)"));
        assert!(text.contains("great run"));
        assert!(text.contains("Neutral (3/5)"));
    }

    #[test]
    fn test_empty_states() {
        assert!(render_history(&[]).contains("No mood entries yet"));
        assert!(render_analysis(&MoodAnalysisResponse::default()).contains("No data to analyze"));
    }

    #[test]
    fn test_analysis_dashboard() {
        let text = render_analysis(&analysis_for(&[3, 5]));

        assert!(text.contains("Average Mood   4.0"));
        assert!(text.contains("Total Entries  2"));
        assert!(text.contains("Highest Mood   5"));
        assert!(text.contains("Jan 1   ███   3"));
        assert!(text.contains("Jan 2   █████ 5"));
        assert!(text.contains("Neutral"));
        assert!(text.contains("1 (50%)"));
        assert!(text.contains("Your average mood rating is 4.0 out of 5."));
        assert!(!text.contains("Keep tracking"));
    }

    #[test]
    fn test_keep_tracking_hint_after_a_week() {
        let text = render_analysis(&analysis_for(&[1, 2, 3, 4, 5, 4, 3]));
        assert!(text.contains("Keep tracking your mood daily"));
        assert!(text.contains("You've logged 7 mood entries so far."));
    }

    #[test]
    fn test_labels() {
        assert_eq!(mood_label(1), "Very Sad");
        assert_eq!(mood_label(4), "Happy");
        assert_eq!(mood_emoji(5), "😄");
    }
}
