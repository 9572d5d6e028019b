use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, UserInfo, VerifyResponse},
        jwt::{AuthUser, JwtKeys},
        repo::{authenticate, User},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            warn!("login with missing fields");
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ));
        }
    };

    let Some(user) = authenticate(&state.db, &username, &password).await? else {
        warn!(email = %username, "login rejected");
        return Err(ApiError::InvalidCredentials);
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.user_id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse { token, user }))
}

/// Echoes the decoded claims back so a client can check a stored token.
#[instrument(skip_all)]
pub async fn verify(AuthUser(claims): AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { user: claims })
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let users = User::list_active(&state.db).await?;
    Ok(Json(users))
}
