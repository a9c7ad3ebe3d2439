//! Client repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use relace_core::{ClientId, ClientRole, ClientStatus, Email};

use super::RepositoryError;
use crate::models::Client;

/// Raw `shop.client` row. Role, status, and email are validated on the way
/// into the domain type.
#[derive(Debug, FromRow)]
struct ClientRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    status: String,
    order_count: i32,
    order_total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: ClientRole = row
            .role
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let status: ClientStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: ClientId::new(row.id),
            name: row.name,
            email,
            phone: row.phone,
            role,
            status,
            order_count: row.order_count,
            order_total: row.order_total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const CLIENT_COLUMNS: &str =
    "id, name, email, phone, role, status, order_count, order_total, created_at, updated_at";

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a client by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM shop.client WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    /// Get a client by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM shop.client WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    /// Get a client and their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Client, String)>, RepositoryError> {
        #[derive(FromRow)]
        struct WithHash {
            #[sqlx(flatten)]
            client: ClientRow,
            password_hash: String,
        }

        let row: Option<WithHash> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS}, password_hash FROM shop.client WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((Client::try_from(r.client)?, r.password_hash)))
            .transpose()
    }

    /// Create a new client with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: Option<&str>,
        password_hash: &str,
    ) -> Result<Client, RepositoryError> {
        let row: ClientRow = sqlx::query_as(&format!(
            "INSERT INTO shop.client (name, email, phone, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(phone)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Client::try_from(row)
    }

    /// Update a client's profile fields. `None` leaves a field unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the client does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn update_profile(
        &self,
        id: ClientId,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "UPDATE shop.client
             SET name = COALESCE($2, name),
                 phone = COALESCE($3, phone),
                 updated_at = now()
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), Client::try_from)
    }
}
