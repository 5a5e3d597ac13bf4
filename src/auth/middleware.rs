use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::{verify_token, TokenType};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// The caller behind a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Resolve the bearer token in `headers` to an [`AuthUser`].
pub fn authenticate(headers: &HeaderMap, config: &Config) -> AppResult<AuthUser> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, config)?;

    // Refresh tokens are only good for /api/auth/refresh.
    if token_data.claims.token_type != TokenType::Access {
        return Err(AppError::Unauthorized);
    }

    Ok(AuthUser {
        id: token_data.claims.sub,
        email: if token_data.claims.email.is_empty() {
            None
        } else {
            Some(token_data.claims.email)
        },
    })
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(req.headers(), &state.config)?;
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_access_token, create_refresh_token};
    use crate::config::test_config;
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_authenticate_accepts_access_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "me@example.com", &config).unwrap();

        let user = authenticate(&bearer(&token), &config).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_authenticate_rejects_refresh_token() {
        let config = test_config();
        let token = create_refresh_token(Uuid::new_v4(), "me@example.com", &config).unwrap();
        assert!(matches!(
            authenticate(&bearer(&token), &config),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_authenticate_rejects_missing_or_malformed_header() {
        let config = test_config();
        assert!(authenticate(&HeaderMap::new(), &config).is_err());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert!(authenticate(&headers, &config).is_err());
    }
}
