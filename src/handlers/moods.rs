use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::{
    CreateMoodRequest, CreateMoodResponse, MoodCatalogEntry, MoodHistoryQuery,
    SuggestionsResponse,
};
use crate::error::AppResult;
use crate::models::mood::{Mood, MoodLabel, MoodView};
use crate::services::suggestions::suggestions_for;
use crate::AppState;

pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Most recent moods for one user, newest first.
pub async fn recent_moods_for_user(db: &PgPool, user_id: Uuid, limit: i64) -> AppResult<Vec<Mood>> {
    let moods = sqlx::query_as::<_, Mood>(
        r#"
        SELECT * FROM moods
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(moods)
}

pub fn clamp_history_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Record a check-in. Repeated submissions create repeated rows.
pub async fn create_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<(StatusCode, Json<CreateMoodResponse>)> {
    let new_mood = body.normalize()?;

    let mood = sqlx::query_as::<_, Mood>(
        r#"
        INSERT INTO moods (id, user_id, mood, note)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(new_mood.label.as_str())
    .bind(&new_mood.note)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(user_id = %auth_user.id, error = %e, "Error saving mood");
        e
    })?;

    tracing::info!(user_id = %auth_user.id, mood = %new_mood.label, "Mood logged");

    Ok((
        StatusCode::CREATED,
        Json(CreateMoodResponse {
            message: format!("Your {} mood has been recorded.", new_mood.label),
            mood: mood.into(),
        }),
    ))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodHistoryQuery>,
) -> AppResult<Json<Vec<MoodView>>> {
    let limit = clamp_history_limit(query.limit);
    let moods = recent_moods_for_user(&state.db, auth_user.id, limit).await?;
    Ok(Json(moods.into_iter().map(MoodView::from).collect()))
}

pub async fn mood_catalog() -> Json<Vec<MoodCatalogEntry>> {
    Json(
        MoodLabel::ALL
            .into_iter()
            .map(|label| MoodCatalogEntry {
                name: label,
                label: label.title(),
                style: label.style(),
            })
            .collect(),
    )
}

pub async fn get_suggestions(Path(mood): Path<String>) -> Json<SuggestionsResponse> {
    let recognized = MoodLabel::from_stored(&mood).is_some();
    Json(SuggestionsResponse {
        suggestions: suggestions_for(&mood),
        recognized,
        mood,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::suggestions::DEFAULT_SUGGESTIONS;

    #[test]
    fn test_clamp_history_limit() {
        assert_eq!(clamp_history_limit(None), 10);
        assert_eq!(clamp_history_limit(Some(0)), 1);
        assert_eq!(clamp_history_limit(Some(25)), 25);
        assert_eq!(clamp_history_limit(Some(10_000)), MAX_HISTORY_LIMIT);
    }

    #[tokio::test]
    async fn test_catalog_lists_every_label_in_order() {
        let Json(catalog) = mood_catalog().await;
        let names: Vec<_> = catalog.iter().map(|e| e.name).collect();
        assert_eq!(names, MoodLabel::ALL.to_vec());
        assert_eq!(catalog[8].label, "Tired");
        assert_eq!(catalog[8].style.icon, "coffee");
    }

    #[tokio::test]
    async fn test_suggestions_for_unknown_mood() {
        let Json(resp) = get_suggestions(Path("grumpy".to_string())).await;
        assert!(!resp.recognized);
        assert_eq!(resp.suggestions, DEFAULT_SUGGESTIONS);

        let Json(resp) = get_suggestions(Path("tired".to_string())).await;
        assert!(resp.recognized);
        assert_eq!(resp.suggestions[0], "Take a 10-minute break");
    }

    #[tokio::test]
    async fn test_suggestions_do_not_fold_case_or_trim() {
        for raw in ["HAPPY", " sad "] {
            let Json(resp) = get_suggestions(Path(raw.to_string())).await;
            assert!(!resp.recognized, "{:?} should be out of set", raw);
            assert_eq!(resp.suggestions, DEFAULT_SUGGESTIONS);
        }
    }

    mod with_database {
        use super::*;
        use crate::test_support::{app, created_ats, get_as, is_newest_first, post_json_as, seed_mood, seed_user};
        use axum::http::StatusCode;
        use chrono::{Duration, TimeZone, Utc};
        use serde_json::json;

        #[sqlx::test(migrations = "./migrations")]
        async fn test_happy_checkin_with_empty_note_stores_null(db: PgPool) {
            let user_id = seed_user(&db, None, false).await;

            let (status, body) = post_json_as(
                app(db.clone()),
                user_id,
                "/api/moods",
                json!({ "mood": "happy", "note": "" }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["message"], "Your happy mood has been recorded.");
            assert!(body["mood"]["note"].is_null());

            let (mood, note) = sqlx::query_as::<_, (String, Option<String>)>(
                "SELECT mood, note FROM moods WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(&db)
            .await
            .unwrap();
            assert_eq!(mood, "happy");
            assert_eq!(note, None);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_empty_mood_writes_nothing(db: PgPool) {
            let user_id = seed_user(&db, None, false).await;

            let (status, _) = post_json_as(
                app(db.clone()),
                user_id,
                "/api/moods",
                json!({ "mood": "", "note": "still here" }),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

            let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM moods")
                .fetch_one(&db)
                .await
                .unwrap();
            assert_eq!(count, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_history_is_own_and_newest_first(db: PgPool) {
            let me = seed_user(&db, None, false).await;
            let other = seed_user(&db, None, false).await;
            let base = Utc.timestamp_opt(1_750_000_000, 0).unwrap();
            for i in 0..5 {
                seed_mood(&db, me, "calm", base + Duration::minutes(i)).await;
                seed_mood(&db, other, "sad", base + Duration::minutes(i)).await;
            }

            let (status, body) = get_as(app(db), me, "/api/moods?limit=3").await;
            assert_eq!(status, StatusCode::OK);
            let times = created_ats(&body);
            assert_eq!(times.len(), 3);
            assert!(is_newest_first(&times));
            assert_eq!(times[0], base + Duration::minutes(4));
            for mood in body.as_array().unwrap() {
                assert_eq!(mood["user_id"], me.to_string());
            }
        }
    }
}
