//! Cross-user browsing for profiles with `is_admin` set.
//!
//! Every endpoint here checks the flag on the server before touching any
//! other user's rows.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::{AdminMoodEntry, AdminMoodQuery, AdminOverviewResponse, AdminStats};
use crate::error::{AppError, AppResult};
use crate::handlers::moods::recent_moods_for_user;
use crate::handlers::profile::fetch_profile;
use crate::models::mood::{Mood, MoodView};
use crate::models::user::Profile;
use crate::AppState;

pub const GLOBAL_MOOD_LIMIT: i64 = 50;
pub const PER_USER_MOOD_LIMIT: i64 = 20;

const ACCESS_DENIED: &str = "Access denied";
const UNKNOWN_USER: &str = "Unknown User";

/// Which moods an admin listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodFilter {
    All,
    User(Uuid),
}

impl MoodFilter {
    /// `None`, empty, or `all` select everyone; anything else must be a user id.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(MoodFilter::All),
            Some(id) => Uuid::parse_str(id)
                .map(MoodFilter::User)
                .map_err(|_| AppError::Validation(format!("Invalid user id: {}", id))),
        }
    }

    pub fn limit(self) -> i64 {
        match self {
            MoodFilter::All => GLOBAL_MOOD_LIMIT,
            MoodFilter::User(_) => PER_USER_MOOD_LIMIT,
        }
    }

    pub fn selected_user(self) -> Option<Uuid> {
        match self {
            MoodFilter::All => None,
            MoodFilter::User(id) => Some(id),
        }
    }
}

/// Gate on the caller's own profile. No profile counts as not an admin.
pub fn ensure_admin(profile: Option<&Profile>) -> AppResult<()> {
    match profile {
        Some(p) if p.is_admin => Ok(()),
        _ => Err(AppError::Forbidden(ACCESS_DENIED.into())),
    }
}

async fn require_admin(db: &PgPool, auth_user: &AuthUser) -> AppResult<()> {
    let profile = fetch_profile(db, auth_user.id).await?;
    ensure_admin(profile.as_ref()).map_err(|e| {
        tracing::warn!(user_id = %auth_user.id, "Admin access denied");
        e
    })
}

async fn all_profiles(db: &PgPool) -> AppResult<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created_at DESC")
        .fetch_all(db)
        .await?;
    Ok(profiles)
}

async fn filtered_moods(db: &PgPool, filter: MoodFilter) -> AppResult<Vec<Mood>> {
    match filter {
        MoodFilter::User(user_id) => recent_moods_for_user(db, user_id, filter.limit()).await,
        MoodFilter::All => {
            let moods = sqlx::query_as::<_, Mood>(
                "SELECT * FROM moods ORDER BY created_at DESC LIMIT $1",
            )
            .bind(filter.limit())
            .fetch_all(db)
            .await?;
            Ok(moods)
        }
    }
}

/// Attach each mood's owner name, looked up from the profile list.
pub fn annotate_moods(moods: Vec<Mood>, profiles: &[Profile]) -> Vec<AdminMoodEntry> {
    let names: HashMap<Uuid, &str> = profiles
        .iter()
        .map(|p| (p.user_id, p.display_name()))
        .collect();

    moods
        .into_iter()
        .map(|mood| AdminMoodEntry {
            user_name: names
                .get(&mood.user_id)
                .copied()
                .unwrap_or(UNKNOWN_USER)
                .to_string(),
            mood: MoodView::from(mood),
        })
        .collect()
}

pub fn compute_stats(users: &[Profile], moods: &[AdminMoodEntry], today: NaiveDate) -> AdminStats {
    AdminStats {
        total_users: users.len(),
        total_moods: moods.len(),
        today_moods: moods
            .iter()
            .filter(|m| m.mood.mood.created_at.date_naive() == today)
            .count(),
    }
}

pub async fn admin_overview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<AdminMoodQuery>,
) -> AppResult<Json<AdminOverviewResponse>> {
    let filter = MoodFilter::parse(query.user_id.as_deref())?;
    require_admin(&state.db, &auth_user).await?;

    let (users, moods) = tokio::try_join!(
        all_profiles(&state.db),
        filtered_moods(&state.db, filter),
    )?;

    let moods = annotate_moods(moods, &users);
    let stats = compute_stats(&users, &moods, Utc::now().date_naive());

    Ok(Json(AdminOverviewResponse {
        stats,
        users,
        moods,
        selected_user: filter.selected_user(),
    }))
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Profile>>> {
    require_admin(&state.db, &auth_user).await?;
    Ok(Json(all_profiles(&state.db).await?))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<AdminMoodQuery>,
) -> AppResult<Json<Vec<AdminMoodEntry>>> {
    let filter = MoodFilter::parse(query.user_id.as_deref())?;
    require_admin(&state.db, &auth_user).await?;

    let (users, moods) = tokio::try_join!(
        all_profiles(&state.db),
        filtered_moods(&state.db, filter),
    )?;
    Ok(Json(annotate_moods(moods, &users)))
}
