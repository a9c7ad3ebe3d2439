//! Authentication route handlers.
//!
//! Registration and login verify credentials through the auth service and
//! then write the client into the server-side session. Nothing identity-
//! related is ever read back from the request body afterwards.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{clear_current_client, set_current_client};
use crate::models::{Client, CurrentClient};
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Create an account and log it in.
#[instrument(skip(state, session, body))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Client>> {
    let client = AuthService::new(state.pool())
        .register(
            &body.name,
            &body.email,
            body.phone.as_deref(),
            &body.password,
        )
        .await?;

    set_current_client(&session, &CurrentClient::from(&client)).await?;
    tracing::info!(client_id = %client.id, "Client registered");

    Ok(Json(client))
}

/// Login with email and password.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<Client>> {
    let client = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;

    // Fresh session id on privilege change
    session.cycle_id().await?;
    set_current_client(&session, &CurrentClient::from(&client)).await?;

    Ok(Json(client))
}

/// Logout: drop the client from the session. The cart survives.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_client(&session).await?;
    Ok(Json(json!({ "success": true })))
}
