use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored check-in. `mood` keeps the raw label so rows written before a
/// label change still load; [`MoodLabel::from_stored`] resolves it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mood {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The closed set of moods a user can check in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Neutral,
    Stressed,
    Focused,
    Calm,
    Anxious,
    Excited,
    Tired,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl MoodLabel {
    pub const ALL: [MoodLabel; 9] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Neutral,
        MoodLabel::Stressed,
        MoodLabel::Focused,
        MoodLabel::Calm,
        MoodLabel::Anxious,
        MoodLabel::Excited,
        MoodLabel::Tired,
    ];

    /// Exact match against a stored or path label. Unlike `FromStr`, no
    /// trimming or case folding: "HAPPY" is not a known label.
    pub fn from_stored(raw: &str) -> Option<MoodLabel> {
        MoodLabel::ALL.into_iter().find(|label| label.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Focused => "focused",
            MoodLabel::Calm => "calm",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Excited => "excited",
            MoodLabel::Tired => "tired",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MoodLabel::Happy => "Happy",
            MoodLabel::Sad => "Sad",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Stressed => "Stressed",
            MoodLabel::Focused => "Focused",
            MoodLabel::Calm => "Calm",
            MoodLabel::Anxious => "Anxious",
            MoodLabel::Excited => "Excited",
            MoodLabel::Tired => "Tired",
        }
    }

    pub fn style(self) -> MoodStyle {
        let (icon, color) = match self {
            MoodLabel::Happy => ("smile", "bg-green-100 text-green-800"),
            MoodLabel::Sad => ("frown", "bg-blue-100 text-blue-800"),
            MoodLabel::Neutral => ("meh", "bg-gray-100 text-gray-800"),
            MoodLabel::Stressed => ("brain", "bg-red-100 text-red-800"),
            MoodLabel::Focused => ("zap", "bg-purple-100 text-purple-800"),
            MoodLabel::Calm => ("heart", "bg-green-100 text-green-800"),
            MoodLabel::Anxious => ("brain", "bg-orange-100 text-orange-800"),
            MoodLabel::Excited => ("sun", "bg-yellow-100 text-yellow-800"),
            MoodLabel::Tired => ("coffee", "bg-gray-100 text-gray-800"),
        };
        MoodStyle { icon, color }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        MoodLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Icon key and color classes a client renders a mood with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

impl MoodStyle {
    pub const FALLBACK: MoodStyle = MoodStyle {
        icon: "meh",
        color: "bg-gray-100 text-gray-800",
    };

    /// Style for a raw stored label; unknown labels get [`MoodStyle::FALLBACK`].
    pub fn for_raw(raw: &str) -> MoodStyle {
        MoodLabel::from_stored(raw)
            .map(MoodLabel::style)
            .unwrap_or(Self::FALLBACK)
    }
}

/// A mood row with its display metadata attached.
#[derive(Debug, Clone, Serialize)]
pub struct MoodView {
    #[serde(flatten)]
    pub mood: Mood,
    pub style: MoodStyle,
}

impl From<Mood> for MoodView {
    fn from(mood: Mood) -> Self {
        let style = MoodStyle::for_raw(&mood.mood);
        Self { mood, style }
    }
}

#[cfg(test)]
pub fn sample_mood(user_id: Uuid, label: &str, created_at: DateTime<Utc>) -> Mood {
    Mood {
        id: Uuid::new_v4(),
        user_id,
        mood: label.to_string(),
        note: None,
        created_at,
    }
}
