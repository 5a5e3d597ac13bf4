//! Static advice keyed by mood label.
//!
//! The lookup is total: any label outside the known set gets
//! [`DEFAULT_SUGGESTIONS`], so a stale or hand-edited row can never break
//! the dashboard.

use crate::models::mood::MoodLabel;

/// How many suggestions the dashboard shows for the latest check-in.
pub const MAX_DASHBOARD_SUGGESTIONS: usize = 3;

pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Take a moment for yourself",
    "Stay mindful",
    "Practice self-care",
];

pub fn suggestions_for_label(label: MoodLabel) -> &'static [&'static str] {
    match label {
        MoodLabel::Stressed => &[
            "Take 5 deep breaths",
            "Go for a short walk",
            "Listen to calming music",
        ],
        MoodLabel::Tired => &[
            "Take a 10-minute break",
            "Drink some water",
            "Do light stretching",
        ],
        MoodLabel::Focused => &[
            "Tackle your most important task",
            "Set a timer for focused work",
            "Eliminate distractions",
        ],
        MoodLabel::Happy => &[
            "Share your positive energy",
            "Express gratitude",
            "Help someone else",
        ],
        MoodLabel::Sad => &[
            "Talk to a friend",
            "Practice self-care",
            "Do something you enjoy",
        ],
        MoodLabel::Anxious => &[
            "Practice mindfulness",
            "Focus on what you can control",
            "Use grounding techniques",
        ],
        MoodLabel::Calm => &[
            "Maintain this peaceful state",
            "Practice meditation",
            "Enjoy the moment",
        ],
        MoodLabel::Excited => &[
            "Channel energy productively",
            "Share your excitement",
            "Plan something fun",
        ],
        MoodLabel::Neutral => &[
            "Check in with yourself",
            "Set small goals",
            "Practice gratitude",
        ],
    }
}

/// Suggestions for a raw label as stored. Matching is exact; anything
/// else, including "HAPPY" or " sad ", gets the default list.
pub fn suggestions_for(raw: &str) -> &'static [&'static str] {
    MoodLabel::from_stored(raw)
        .map(suggestions_for_label)
        .unwrap_or(DEFAULT_SUGGESTIONS)
}

/// The first few suggestions for the dashboard panel.
pub fn dashboard_suggestions(raw: &str) -> Vec<&'static str> {
    suggestions_for(raw)
        .iter()
        .take(MAX_DASHBOARD_SUGGESTIONS)
        .copied()
        .collect()
}
