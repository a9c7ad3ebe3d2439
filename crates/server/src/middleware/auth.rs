//! Authentication extractors.
//!
//! Identity is whatever the server-side session says, set by the auth
//! handlers after verifying credentials. Handlers never read identity or
//! role from anything the client sent.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use relace_core::ClientRole;

use crate::models::{CurrentClient, session_keys};

/// Extractor that requires a logged-in client.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireAuth(client): RequireAuth) -> impl IntoResponse {
///     Json(client)
/// }
/// ```
pub struct RequireAuth(pub CurrentClient);

/// Extractor that requires a logged-in client with the `admin` role.
pub struct RequireAdmin(pub CurrentClient);

/// Extractor that optionally reads the logged-in client.
pub struct OptionalAuth(pub Option<CurrentClient>);

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No session, or no client in it.
    Unauthorized,
    /// Logged in, but not an admin.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "authentication required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "admin access required" })),
            )
                .into_response(),
        }
    }
}

/// Read the current client out of the request's session.
async fn current_client(parts: &mut Parts) -> Option<CurrentClient> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentClient>(session_keys::CURRENT_CLIENT)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_client(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let client = current_client(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if client.role != ClientRole::Admin {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(client))
    }
}

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_client(parts).await))
    }
}

/// Store the logged-in client in the session (after verifying credentials).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_client(
    session: &Session,
    client: &CurrentClient,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_CLIENT, client)
        .await
}

/// Clear the logged-in client from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_client(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentClient>(session_keys::CURRENT_CLIENT)
        .await?;
    Ok(())
}
