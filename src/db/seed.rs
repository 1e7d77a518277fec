//! Reference fund seed data.

use crate::domain::TimeMs;
use sqlx::sqlite::SqlitePool;
use tracing::info;

/// Funds available for allocation: (name, description).
pub const REFERENCE_FUNDS: &[(&str, &str)] = &[
    (
        "S&P 500 Index Fund",
        "Tracks the S&P 500 index, providing broad exposure to large U.S. companies",
    ),
    (
        "Global Bond Fund",
        "Diversified portfolio of government and corporate bonds from around the world",
    ),
    (
        "Real Estate Investment Trust",
        "Investment in commercial and residential real estate properties",
    ),
    (
        "Emerging Markets Fund",
        "Focuses on stocks from developing economies with high growth potential",
    ),
    (
        "Technology Sector Fund",
        "Concentrated in technology companies across hardware, software, and services",
    ),
    (
        "Dividend Growth Fund",
        "Invests in companies with history of increasing dividend payments",
    ),
    (
        "Green Energy Fund",
        "Focuses on renewable energy and sustainable technology companies",
    ),
];

/// Insert the reference funds if the funds table is empty.
///
/// Returns the number of funds inserted.
pub async fn seed_funds(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM funds")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let now = TimeMs::now();
    let mut inserted = 0u64;
    let mut tx = pool.begin().await?;

    for (name, description) in REFERENCE_FUNDS {
        let result = sqlx::query(
            r#"
            INSERT INTO funds (name, description, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(*name)
        .bind(*description)
        .bind(now.as_ms())
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    info!(count = inserted, "Seeded reference funds");
    Ok(inserted)
}
