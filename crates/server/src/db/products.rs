//! Product repository for catalog and stock operations.

use sqlx::PgPool;

use relace_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str =
    "id, name, brand, category, price, sizes, stock, images, created_at, updated_at";

/// Catalog listing filter. All fields are optional and combine with AND.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    /// Exact brand match (case-insensitive).
    pub brand: Option<String>,
    /// Exact category match (case-insensitive).
    pub category: Option<String>,
    /// Substring match on the product name.
    pub query: Option<String>,
    /// Page size (defaults to 50, capped at 100).
    pub limit: Option<i64>,
    /// Offset for simple slicing pagination.
    pub offset: Option<i64>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List catalog products matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 100);
        let offset = filter.offset.unwrap_or(0).max(0);

        let products = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product
             WHERE ($1::TEXT IS NULL OR brand ILIKE $1)
               AND ($2::TEXT IS NULL OR category ILIKE $2)
               AND ($3::TEXT IS NULL OR name ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        ))
        .bind(filter.brand.as_deref())
        .bind(filter.category.as_deref())
        .bind(filter.query.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Distinct brand names in the catalog, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn brands(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT brand FROM shop.product ORDER BY brand")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|(brand,)| brand).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Adjust a product's stock by a signed delta, clamping at zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn adjust_stock(
        &self,
        id: ProductId,
        delta: i32,
    ) -> Result<Product, RepositoryError> {
        let product: Option<Product> = sqlx::query_as(&format!(
            "UPDATE shop.product
             SET stock = GREATEST(stock + $2, 0), updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(delta)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }
}
