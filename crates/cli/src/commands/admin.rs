//! Admin account management command.

use relace_core::ClientRole;
use relace_server::services::AuthService;

use super::{CommandError, connect};

/// Create an admin account.
///
/// Registers a client through the normal auth service (so the password is
/// hashed the same way the API hashes it), then promotes it to the `admin`
/// role.
///
/// # Errors
///
/// Returns `CommandError` if registration fails or the promotion query fails.
pub async fn create_account(email: &str, name: &str, password: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    let client = AuthService::new(&pool)
        .register(name, email, None, password)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    sqlx::query("UPDATE shop.client SET role = $2, updated_at = now() WHERE id = $1")
        .bind(client.id)
        .bind(ClientRole::Admin.to_string())
        .execute(&pool)
        .await?;

    tracing::info!(client_id = %client.id, email = %client.email, "Admin account created");
    Ok(())
}
