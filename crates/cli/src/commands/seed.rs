//! Demo catalog seeding for development.

use rust_decimal::Decimal;

use super::{CommandError, connect};

/// Demo products: (name, brand, category, price, sizes, stock).
const PRODUCTS: &[(&str, &str, &str, Decimal, &[&str], i32)] = &[
    (
        "Air Max 90 OG",
        "Nike",
        "lifestyle",
        Decimal::from_parts(14_999, 0, 0, false, 2),
        &["40", "41", "42", "43", "44"],
        12,
    ),
    (
        "Jordan 1 Retro High",
        "Jordan",
        "basketball",
        Decimal::from_parts(21_900, 0, 0, false, 2),
        &["41", "42", "43", "44", "45"],
        6,
    ),
    (
        "Samba OG",
        "Adidas",
        "lifestyle",
        Decimal::from_parts(11_000, 0, 0, false, 2),
        &["39", "40", "41", "42", "43"],
        20,
    ),
    (
        "990v6 Grey",
        "New Balance",
        "running",
        Decimal::from_parts(19_900, 0, 0, false, 2),
        &["42", "43", "44"],
        4,
    ),
];

/// Insert a demo catalog (products and a welcome promo code).
///
/// Idempotent on the promo code (skipped if it already exists); products are
/// inserted every run, so only seed a fresh database.
///
/// # Errors
///
/// Returns `CommandError` if any insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    for (name, brand, category, price, sizes, stock) in PRODUCTS {
        let sizes: Vec<String> = sizes.iter().map(ToString::to_string).collect();
        sqlx::query(
            "INSERT INTO shop.product (name, brand, category, price, sizes, stock, images)
             VALUES ($1, $2, $3, $4, $5, $6, '{}')",
        )
        .bind(name)
        .bind(brand)
        .bind(category)
        .bind(price)
        .bind(&sizes)
        .bind(stock)
        .execute(&pool)
        .await?;
        tracing::info!(name = *name, brand = *brand, "Seeded product");
    }

    sqlx::query(
        "INSERT INTO shop.promo_code (code, kind, value, min_subtotal)
         VALUES ('BIENVENUE10', 'percentage', 10, 50)
         ON CONFLICT (code) DO NOTHING",
    )
    .execute(&pool)
    .await?;
    tracing::info!("Seeded promo code BIENVENUE10");

    Ok(())
}
