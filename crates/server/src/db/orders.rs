//! Order repository: creation, listing, and status updates.
//!
//! Order creation and status updates are each a single transaction, so the
//! side effects the storefront depends on (promo usage counts, client order
//! counters, stock deduction) cannot drift from the order row itself.

use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use chrono::{DateTime, Utc};
use relace_core::cart::CartLine;
use relace_core::pricing::Quote;
use relace_core::{ClientId, OrderId, OrderStatus, round2};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderWithItems};

/// Raw `shop."order"` row; `status` is validated into [`OrderStatus`].
#[derive(Debug, FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    client_id: i32,
    status: String,
    subtotal: Decimal,
    shipping_cost: Decimal,
    discount: Decimal,
    total: Decimal,
    shipping_address: String,
    shipping_country: String,
    payment_method: String,
    promo_code: Option<String>,
    stock_deducted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: OrderId::new(row.id),
            order_number: row.order_number,
            client_id: ClientId::new(row.client_id),
            status,
            subtotal: row.subtotal,
            shipping_cost: row.shipping_cost,
            discount: row.discount,
            total: row.total,
            shipping_address: row.shipping_address,
            shipping_country: row.shipping_country,
            payment_method: row.payment_method,
            promo_code: row.promo_code,
            stock_deducted: row.stock_deducted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, order_number, client_id, status, subtotal, shipping_cost, \
                             discount, total, shipping_address, shipping_country, \
                             payment_method, promo_code, stock_deducted, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, brand, size, quantity, \
                            unit_price, total_price, image";

/// Fields for creating an order (the priced cart plus checkout form data).
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub client_id: ClientId,
    pub quote: &'a Quote,
    pub lines: &'a [CartLine],
    pub shipping_address: &'a str,
    pub shipping_country: &'a str,
    pub payment_method: &'a str,
    pub promo_code: Option<&'a str>,
}

/// Admin listing filter. All fields optional, combined with AND.
#[derive(Debug, Default, Clone)]
pub struct AdminOrderFilter {
    /// Filter by exact status.
    pub status: Option<OrderStatus>,
    /// Keep orders containing at least one item of this brand.
    pub brand: Option<String>,
    /// Page size (defaults to 50, capped at 100).
    pub limit: Option<i64>,
    /// Offset for simple slicing pagination.
    pub offset: Option<i64>,
}

/// Generate a public order number (`ORD-` + 8 alphanumerics).
fn generate_order_number() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("ORD-{}", suffix.to_uppercase())
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its items.
    ///
    /// One transaction covers the order row, its items, the promo usage
    /// increment, and the client's order counters, so a failure anywhere
    /// rolls everything back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(&self, new: NewOrder<'_>) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO shop.\"order\"
                 (order_number, client_id, subtotal, shipping_cost, discount, total,
                  shipping_address, shipping_country, payment_method, promo_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(generate_order_number())
        .bind(new.client_id)
        .bind(new.quote.subtotal)
        .bind(new.quote.shipping_cost)
        .bind(new.quote.discount)
        .bind(new.quote.total)
        .bind(new.shipping_address)
        .bind(new.shipping_country)
        .bind(new.payment_method)
        .bind(new.promo_code)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(new.lines.len());
        for line in new.lines {
            let item: OrderItem = sqlx::query_as(&format!(
                "INSERT INTO shop.order_item
                     (order_id, product_id, product_name, brand, size, quantity,
                      unit_price, total_price, image)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(order_row.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(&line.brand)
            .bind(&line.size)
            .bind(i32::try_from(line.quantity).unwrap_or(i32::MAX))
            .bind(line.unit_price)
            .bind(round2(line.line_total()))
            .bind(line.image.as_deref())
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        if let Some(code) = new.promo_code {
            sqlx::query(
                "UPDATE shop.promo_code SET used_count = used_count + 1 WHERE code = $1",
            )
            .bind(code)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE shop.client
             SET order_count = order_count + 1,
                 order_total = order_total + $2,
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(new.client_id)
        .bind(new.quote.total)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OrderWithItems {
            order: Order::try_from(order_row)?,
            items,
        })
    }

    /// A client's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.\"order\"
             WHERE client_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(client_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Look an order up by its public order number, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn get_by_number(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.\"order\" WHERE order_number = $1"
        ))
        .bind(order_number.trim().to_uppercase())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.items_for(OrderId::new(row.id)).await?;
                Ok(Some(OrderWithItems {
                    order: Order::try_from(row)?,
                    items,
                }))
            }
            None => Ok(None),
        }
    }

    /// Get an order by ID, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.\"order\" WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.items_for(OrderId::new(row.id)).await?;
                Ok(Some(OrderWithItems {
                    order: Order::try_from(row)?,
                    items,
                }))
            }
            None => Ok(None),
        }
    }

    /// Admin listing with optional status and brand filters, newest first.
    ///
    /// The brand filter keeps orders containing at least one item of that
    /// brand (one batched query, not a per-order follow-up).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_admin(
        &self,
        filter: &AdminOrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 100);
        let offset = filter.offset.unwrap_or(0).max(0);

        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.\"order\" o
             WHERE ($1::TEXT IS NULL OR o.status = $1)
               AND ($2::TEXT IS NULL OR EXISTS (
                        SELECT 1 FROM shop.order_item oi
                        WHERE oi.order_id = o.id AND oi.brand ILIKE $2))
             ORDER BY o.created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.brand.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Set an order's status.
    ///
    /// The order row is locked for the duration of the transaction. On the
    /// first transition into [`OrderStatus::Confirmed`] the stock of every
    /// ordered product is decremented (clamped at zero) and the order's
    /// `stock_deducted` flag is set, all atomically — so toggling the status
    /// repeatedly can never deduct twice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist, or
    /// `RepositoryError::Database` if a statement fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.\"order\" WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Err(RepositoryError::NotFound);
        };

        let deduct_stock = status == OrderStatus::Confirmed && !current.stock_deducted;
        if deduct_stock {
            sqlx::query(
                "UPDATE shop.product p
                 SET stock = GREATEST(p.stock - agg.qty, 0), updated_at = now()
                 FROM (SELECT product_id, SUM(quantity) AS qty
                       FROM shop.order_item
                       WHERE order_id = $1
                       GROUP BY product_id) agg
                 WHERE p.id = agg.product_id",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let row: OrderRow = sqlx::query_as(&format!(
            "UPDATE shop.\"order\"
             SET status = $2,
                 stock_deducted = stock_deducted OR $3,
                 updated_at = now()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(deduct_stock)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Order::try_from(row)
    }

    /// Items of an order, in insertion order.
    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items: Vec<OrderItem> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM shop.order_item WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_numbers_have_the_public_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 12);
        assert!(
            number[4..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
