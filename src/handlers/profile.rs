use axum::{extract::State, Extension, Json};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{blank_to_none, UpdateProfileRequest};
use crate::error::{AppError, AppResult};
use crate::models::user::Profile;
use crate::AppState;

/// Single-row profile lookup. A missing row is an expected outcome, not an error.
pub async fn fetch_profile(db: &PgPool, user_id: Uuid) -> AppResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?;
    Ok(profile)
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Profile>> {
    let profile = fetch_profile(&state.db, auth_user.id)
        .await?
        .ok_or(AppError::NotFound("Profile not found".into()))?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<Profile>> {
    body.validate()?;

    // Absent field keeps the current value; an empty string clears it.
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles SET
            username = CASE WHEN $2 THEN $3 ELSE username END,
            full_name = CASE WHEN $4 THEN $5 ELSE full_name END,
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(body.username.is_some())
    .bind(blank_to_none(body.username.as_deref()))
    .bind(body.full_name.is_some())
    .bind(blank_to_none(body.full_name.as_deref()))
    .fetch_optional(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Username already taken"))?
    .ok_or(AppError::NotFound("Profile not found".into()))?;

    tracing::debug!(user_id = %auth_user.id, "Profile updated");
    Ok(Json(profile))
}
