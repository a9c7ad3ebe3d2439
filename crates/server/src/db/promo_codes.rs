//! Promo code repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use relace_core::{PromoCodeId, PromoKind};

use super::RepositoryError;
use crate::models::PromoCode;

/// Raw `shop.promo_code` row; `kind` is validated into [`PromoKind`].
#[derive(Debug, FromRow)]
struct PromoCodeRow {
    id: i32,
    code: String,
    kind: String,
    value: Decimal,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    max_uses: Option<i32>,
    used_count: i32,
    min_subtotal: Option<Decimal>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PromoCodeRow> for PromoCode {
    type Error = RepositoryError;

    fn try_from(row: PromoCodeRow) -> Result<Self, Self::Error> {
        let kind: PromoKind = row
            .kind
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: PromoCodeId::new(row.id),
            code: row.code,
            kind,
            value: row.value,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            max_uses: row.max_uses,
            used_count: row.used_count,
            min_subtotal: row.min_subtotal,
            active: row.active,
            created_at: row.created_at,
        })
    }
}

const PROMO_COLUMNS: &str = "id, code, kind, value, starts_at, ends_at, max_uses, used_count, \
                             min_subtotal, active, created_at";

/// Fields for creating a promo code.
#[derive(Debug, Clone)]
pub struct NewPromoCode {
    pub code: String,
    pub kind: PromoKind,
    pub value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub min_subtotal: Option<Decimal>,
}

/// Repository for promo code database operations.
pub struct PromoCodeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PromoCodeRepository<'a> {
    /// Create a new promo code repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look a code up by its (case-insensitive) code string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        let row: Option<PromoCodeRow> = sqlx::query_as(&format!(
            "SELECT {PROMO_COLUMNS} FROM shop.promo_code WHERE code = $1"
        ))
        .bind(code.trim().to_uppercase())
        .fetch_optional(self.pool)
        .await?;

        row.map(PromoCode::try_from).transpose()
    }

    /// All promo codes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(&self) -> Result<Vec<PromoCode>, RepositoryError> {
        let rows: Vec<PromoCodeRow> = sqlx::query_as(&format!(
            "SELECT {PROMO_COLUMNS} FROM shop.promo_code ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PromoCode::try_from).collect()
    }

    /// Create a promo code. The code string is stored uppercased.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewPromoCode) -> Result<PromoCode, RepositoryError> {
        let row: PromoCodeRow = sqlx::query_as(&format!(
            "INSERT INTO shop.promo_code
                 (code, kind, value, starts_at, ends_at, max_uses, min_subtotal)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PROMO_COLUMNS}"
        ))
        .bind(new.code.trim().to_uppercase())
        .bind(new.kind.to_string())
        .bind(new.value)
        .bind(new.starts_at)
        .bind(new.ends_at)
        .bind(new.max_uses)
        .bind(new.min_subtotal)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("promo code already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        PromoCode::try_from(row)
    }
}
