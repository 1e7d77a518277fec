//! Fund reference data operations for the repository.

use crate::domain::{Fund, FundId, TimeMs};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::Repository;

fn fund_from(row: &SqliteRow) -> Result<Fund, sqlx::Error> {
    Ok(Fund {
        id: FundId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: TimeMs::new(row.try_get("created_at")?),
    })
}

impl Repository {
    /// All funds ordered by id.
    pub async fn query_funds(&self) -> Result<Vec<Fund>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM funds
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(fund_from).collect()
    }

    pub async fn query_fund(&self, id: FundId) -> Result<Option<Fund>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM funds
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(fund_from).transpose()
    }
}
