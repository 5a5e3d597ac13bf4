//! # Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field validation is expressed via `validator` derive macros; anything
//!   that needs the mood catalog lives in `normalize` helpers instead

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::mood::{MoodLabel, MoodStyle, MoodView};
use crate::models::user::Profile;

pub const MAX_NOTE_CHARS: usize = 1000;

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "Full name must be under 100 characters"))]
    pub full_name: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/auth/refresh
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /api/auth/forgot
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// POST /api/auth/reset
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// GET /api/me
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub profile: Option<Profile>,
}

// ============================================================================
// Profile
// ============================================================================

/// PUT /api/profile — partial update; an empty string clears the field.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50, message = "Username must be under 50 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "Full name must be under 100 characters"))]
    pub full_name: Option<String>,
}

/// Trim an optional free-text field; blank becomes `None`.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// ============================================================================
// Moods
// ============================================================================

/// POST /api/moods
#[derive(Debug, Deserialize)]
pub struct CreateMoodRequest {
    #[serde(default)]
    pub mood: String,
    pub note: Option<String>,
}

/// A check-in that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMood {
    pub label: MoodLabel,
    pub note: Option<String>,
}

impl CreateMoodRequest {
    pub fn normalize(&self) -> AppResult<NewMood> {
        if self.mood.trim().is_empty() {
            return Err(AppError::Validation("Please select a mood".into()));
        }

        let label = self
            .mood
            .parse::<MoodLabel>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let note = blank_to_none(self.note.as_deref());
        if note
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_NOTE_CHARS)
        {
            return Err(AppError::Validation(format!(
                "Note must be under {} characters",
                MAX_NOTE_CHARS
            )));
        }

        Ok(NewMood { label, note })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateMoodResponse {
    pub mood: MoodView,
    pub message: String,
}

/// GET /api/moods
#[derive(Debug, Deserialize)]
pub struct MoodHistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/moods/catalog
#[derive(Debug, Serialize)]
pub struct MoodCatalogEntry {
    pub name: MoodLabel,
    pub label: &'static str,
    pub style: MoodStyle,
}

/// GET /api/suggestions/{mood}
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub mood: String,
    pub recognized: bool,
    pub suggestions: &'static [&'static str],
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub greeting: String,
    pub profile: Option<Profile>,
    pub moods: Vec<MoodView>,
    pub latest_mood: Option<MoodView>,
    pub suggestions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<&'static str>,
}

// ============================================================================
// Admin
// ============================================================================

/// `?user_id=` on admin mood listings: a UUID or `all`.
#[derive(Debug, Deserialize)]
pub struct AdminMoodQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminMoodEntry {
    #[serde(flatten)]
    pub mood: MoodView,
    pub user_name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_moods: usize,
    pub today_moods: usize,
}

/// GET /api/admin/overview
#[derive(Debug, Serialize)]
pub struct AdminOverviewResponse {
    pub stats: AdminStats,
    pub users: Vec<Profile>,
    pub moods: Vec<AdminMoodEntry>,
    pub selected_user: Option<Uuid>,
}

// ============================================================================
// Navigation
// ============================================================================

#[derive(Debug, Serialize, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// GET /api/nav
#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub authenticated: bool,
    pub links: Vec<NavLink>,
    pub can_sign_out: bool,
}
