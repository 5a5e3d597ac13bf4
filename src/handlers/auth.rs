use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    jwt::{create_token_pair, generate_opaque_token, hash_token, verify_token, TokenPair, TokenType},
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::dto::{
    blank_to_none, ForgotPasswordRequest, LoginRequest, MessageResponse, RefreshRequest,
    ResetPasswordRequest, SessionResponse, SignupRequest,
};
use crate::error::{AppError, AppResult};
use crate::handlers::profile::fetch_profile;
use crate::models::user::User;
use crate::AppState;

const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for that email, a reset link has been sent.";

async fn store_refresh_token(
    db: &sqlx::PgPool,
    user_id: Uuid,
    raw_refresh_token: &str,
    ttl_secs: i64,
    parent_token_id: Option<Uuid>,
) -> AppResult<Uuid> {
    let token_hash = hash_token(raw_refresh_token);
    let expires_at = Utc::now() + Duration::seconds(ttl_secs);
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, parent_token_id)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&token_hash)
    .bind(expires_at)
    .bind(parent_token_id)
    .execute(db)
    .await?;

    Ok(id)
}

/// Create a token pair and persist the refresh token hash.
async fn issue_token_pair(
    state: &AppState,
    user_id: Uuid,
    email: &str,
    parent_token_id: Option<Uuid>,
) -> AppResult<TokenPair> {
    let tokens = create_token_pair(user_id, email, &state.config)?;
    store_refresh_token(
        &state.db,
        user_id,
        &tokens.refresh_token,
        state.config.jwt_refresh_ttl_secs,
        parent_token_id,
    )
    .await?;
    Ok(tokens)
}

async fn revoke_all_user_tokens(db: &sqlx::PgPool, user_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked = true, revoked_at = NOW()
        WHERE user_id = $1 AND revoked = false
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<TokenPair>)> {
    body.validate()?;

    let email = normalize_email(&body.email);
    let pwd_hash = hash_password(&body.password)?;
    let user_id = Uuid::new_v4();

    // Account and profile are created together; a profile never exists without its user.
    let mut tx = state.db.begin().await?;

    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(&email)
        .bind(&pwd_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email already registered"))?;

    sqlx::query(
        r#"
        INSERT INTO profiles (id, user_id, username, full_name, email)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(blank_to_none(body.username.as_deref()))
    .bind(blank_to_none(body.full_name.as_deref()))
    .bind(&email)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Username already taken"))?;

    tx.commit().await?;

    tracing::info!(user_id = %user_id, "User signed up");

    let tokens = issue_token_pair(&state, user_id, &email, None).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    body.validate().map_err(|_| AppError::Unauthorized)?;

    let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE email = $1")
        .bind(normalize_email(&body.email))
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let tokens = issue_token_pair(&state, user.id, &user.email, None).await?;
    Ok(Json(tokens))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token_data = verify_token(&body.refresh_token, &state.config)?;

    if token_data.claims.token_type != TokenType::Refresh {
        return Err(AppError::Unauthorized);
    }

    let token_hash = hash_token(&body.refresh_token);

    let (stored_id, stored_user_id, revoked) = sqlx::query_as::<_, (Uuid, Uuid, bool)>(
        "SELECT id, user_id, revoked FROM refresh_tokens WHERE token_hash = $1",
    )
    .bind(&token_hash)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::Unauthorized)?;

    // A revoked token coming back means it leaked: kill the whole family.
    if revoked {
        tracing::warn!(
            user_id = %stored_user_id,
            token_id = %stored_id,
            "Refresh token reuse detected, revoking all tokens for user"
        );
        revoke_all_user_tokens(&state.db, stored_user_id).await?;
        return Err(AppError::Unauthorized);
    }

    if stored_user_id != token_data.claims.sub {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE refresh_tokens SET revoked = true, revoked_at = NOW() WHERE id = $1")
        .bind(stored_id)
        .execute(&state.db)
        .await?;

    let tokens = issue_token_pair(
        &state,
        token_data.claims.sub,
        &token_data.claims.email,
        Some(stored_id),
    )
    .await?;
    Ok(Json(tokens))
}

/// Always answers the same way so the endpoint does not reveal which emails have accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    body.validate()?;

    let user_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(normalize_email(&body.email))
        .fetch_optional(&state.db)
        .await?;

    if let Some(user_id) = user_id {
        let raw_token = generate_opaque_token();
        let expires_at = Utc::now() + Duration::seconds(state.config.password_reset_ttl_secs);

        sqlx::query(
            r#"
            INSERT INTO password_resets (id, user_id, token_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(hash_token(&raw_token))
        .bind(expires_at)
        .execute(&state.db)
        .await?;

        // No mail transport; operators pick the token up from the log.
        tracing::info!(
            user_id = %user_id,
            reset_token = %raw_token,
            expires_at = %expires_at,
            "Password reset requested"
        );
    }

    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    body.validate()?;

    let mut tx = state.db.begin().await?;

    // Consume the token in the same statement that checks it, so it works once.
    let user_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        UPDATE password_resets
        SET used_at = NOW()
        WHERE token_hash = $1 AND used_at IS NULL AND expires_at > NOW()
        RETURNING user_id
        "#,
    )
    .bind(hash_token(&body.token))
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::Validation("Reset link is invalid or has expired".into()))?;

    let pwd_hash = hash_password(&body.password)?;
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(&pwd_hash)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked = true, revoked_at = NOW()
        WHERE user_id = $1 AND revoked = false
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user_id, "Password reset completed");
    Ok(Json(MessageResponse::new("Password updated. Please sign in.")))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MessageResponse>> {
    revoke_all_user_tokens(&state.db, auth_user.id).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<SessionResponse>> {
    let profile = fetch_profile(&state.db, auth_user.id).await?;

    Ok(Json(SessionResponse {
        id: auth_user.id,
        email: auth_user.email,
        profile,
    }))
}
