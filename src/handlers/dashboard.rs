use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::DashboardResponse;
use crate::error::AppResult;
use crate::handlers::moods::{recent_moods_for_user, DEFAULT_HISTORY_LIMIT};
use crate::handlers::profile::fetch_profile;
use crate::models::mood::{Mood, MoodView};
use crate::models::user::Profile;
use crate::services::suggestions::dashboard_suggestions;
use crate::AppState;

pub const EMPTY_STATE: &str = "No check-ins yet";

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardResponse>> {
    // Independent reads; neither depends on the other's result.
    let (profile, moods) = tokio::try_join!(
        fetch_profile(&state.db, auth_user.id),
        recent_moods_for_user(&state.db, auth_user.id, DEFAULT_HISTORY_LIMIT),
    )?;

    Ok(Json(build_dashboard(profile, moods)))
}

/// `moods` must be ordered newest first.
pub fn build_dashboard(profile: Option<Profile>, moods: Vec<Mood>) -> DashboardResponse {
    let greeting = match profile.as_ref().and_then(|p| p.full_name.as_deref()) {
        Some(name) if !name.is_empty() => format!("Welcome back, {}!", name),
        _ => "Welcome back!".to_string(),
    };

    let moods: Vec<MoodView> = moods.into_iter().map(MoodView::from).collect();
    let latest_mood = moods.first().cloned();
    let suggestions = latest_mood
        .as_ref()
        .map(|latest| dashboard_suggestions(&latest.mood.mood))
        .unwrap_or_default();
    let empty_state = moods.is_empty().then_some(EMPTY_STATE);

    DashboardResponse {
        greeting,
        profile,
        moods,
        latest_mood,
        suggestions,
        empty_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::sample_mood;
    use crate::models::user::sample_profile;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn test_no_moods_shows_empty_state_and_no_suggestions() {
        let dash = build_dashboard(None, Vec::new());
        assert_eq!(dash.empty_state, Some(EMPTY_STATE));
        assert!(dash.suggestions.is_empty());
        assert!(dash.latest_mood.is_none());
        assert_eq!(dash.greeting, "Welcome back!");
    }

    #[test]
    fn test_suggestions_follow_latest_mood() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let moods = vec![
            sample_mood(user_id, "stressed", now),
            sample_mood(user_id, "happy", now - Duration::hours(1)),
        ];

        let dash = build_dashboard(None, moods);
        assert_eq!(dash.empty_state, None);
        assert_eq!(dash.moods.len(), 2);
        assert_eq!(dash.latest_mood.unwrap().mood.mood, "stressed");
        assert!(dash.suggestions.len() <= 3);
        assert_eq!(
            dash.suggestions,
            vec![
                "Take 5 deep breaths",
                "Go for a short walk",
                "Listen to calming music"
            ]
        );
    }

    #[test]
    fn test_unknown_latest_label_uses_default_bucket() {
        let user_id = Uuid::new_v4();
        let dash = build_dashboard(None, vec![sample_mood(user_id, "grumpy", Utc::now())]);
        assert_eq!(dash.suggestions[0], "Take a moment for yourself");
        assert_eq!(dash.moods[0].style.icon, "meh");
    }

    #[test]
    fn test_greeting_uses_full_name() {
        let mut profile = sample_profile(Uuid::new_v4(), false);
        profile.full_name = Some("Ada".into());
        let dash = build_dashboard(Some(profile), Vec::new());
        assert_eq!(dash.greeting, "Welcome back, Ada!");
        assert!(dash.profile.is_some());
    }

    #[test]
    fn test_empty_state_is_omitted_from_json_when_moods_exist() {
        let dash = build_dashboard(None, vec![sample_mood(Uuid::new_v4(), "calm", Utc::now())]);
        let json = serde_json::to_value(&dash).unwrap();
        assert!(json.get("empty_state").is_none());
        assert_eq!(json["latest_mood"]["mood"], "calm");
    }

    mod with_database {
        use super::*;
        use crate::test_support::{app, created_ats, get_as, is_newest_first, seed_mood, seed_user};
        use axum::http::StatusCode;
        use chrono::TimeZone;
        use sqlx::PgPool;

        #[sqlx::test(migrations = "./migrations")]
        async fn test_dashboard_without_moods(db: PgPool) {
            let user_id = seed_user(&db, Some("Ada"), false).await;

            let (status, body) = get_as(app(db), user_id, "/api/dashboard").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["greeting"], "Welcome back, Ada!");
            assert_eq!(body["empty_state"], EMPTY_STATE);
            assert!(body["latest_mood"].is_null());
            assert_eq!(body["suggestions"].as_array().map(Vec::len), Some(0));
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_dashboard_uses_ten_latest_and_newest_label(db: PgPool) {
            let user_id = seed_user(&db, None, false).await;
            let base = Utc.timestamp_opt(1_750_000_000, 0).unwrap();
            for i in 0..11 {
                seed_mood(&db, user_id, "happy", base + Duration::minutes(i)).await;
            }
            seed_mood(&db, user_id, "anxious", base + Duration::minutes(30)).await;

            let (status, body) = get_as(app(db), user_id, "/api/dashboard").await;
            assert_eq!(status, StatusCode::OK);
            let times = created_ats(&body["moods"]);
            assert_eq!(times.len(), 10);
            assert!(is_newest_first(&times));
            assert_eq!(body["latest_mood"]["mood"], "anxious");
            assert_eq!(body["suggestions"][0], "Practice mindfulness");
            assert_eq!(body["suggestions"].as_array().map(Vec::len), Some(3));
            assert!(body.get("empty_state").is_none());
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_dashboard_without_profile_greets_anonymously(db: PgPool) {
            let (status, body) = get_as(app(db), Uuid::new_v4(), "/api/dashboard").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["greeting"], "Welcome back!");
            assert!(body["profile"].is_null());
        }
    }
}
