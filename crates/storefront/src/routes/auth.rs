//! Account sign-up, sign-in, and password handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalUser, RequireUser};
use crate::models::{CurrentUser, session::session_keys};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<CurrentUser>,
}

async fn establish_session(session: &Session, user: &CurrentUser) -> Result<()> {
    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|err| AppError::Internal(format!("session error: {err}")))?;
    session
        .insert(session_keys::CURRENT_USER, user)
        .await
        .map_err(|err| AppError::Internal(format!("session error: {err}")))?;
    Ok(())
}

/// `POST /auth/signup`
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let user = state.auth().sign_up(&body.email, &body.password).await?;
    establish_session(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse { user: Some(user) })))
}

/// `POST /auth/login`
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Credentials>,
) -> Result<Json<SessionResponse>> {
    let user = state.auth().sign_in(&body.email, &body.password).await?;
    establish_session(&session, &user).await?;
    Ok(Json(SessionResponse { user: Some(user) }))
}

/// `POST /auth/logout`
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session
        .delete()
        .await
        .map_err(|err| AppError::Internal(format!("session error: {err}")))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// `POST /auth/password`
#[instrument(skip(state, user, body), fields(user_id = %user.0.id))]
pub async fn change_password(
    State(state): State<AppState>,
    user: RequireUser,
    Json(body): Json<PasswordChange>,
) -> Result<StatusCode> {
    state
        .auth()
        .update_password(user.0.id, &body.current_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/session`
pub async fn session(OptionalUser(user): OptionalUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}
