//! Investment event operations for the repository.

use crate::domain::{
    Decimal, EventId, EventKind, FundId, InvestmentEvent, LedgerRow, NewInvestmentEvent, TimeMs,
};
use crate::error::LedgerError;
use crate::store::AppendCheck;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Executor, Row};
use tracing::warn;

use super::Repository;

const SCAN_SQL: &str = r#"
    SELECT e.id, e.amount, e.event_type, e.fund_id, e.created_at, f.name AS fund_name
    FROM investment_events e
    LEFT JOIN funds f ON f.id = e.fund_id
    ORDER BY e.id ASC
"#;

const SCAN_BEFORE_SQL: &str = r#"
    SELECT e.id, e.amount, e.event_type, e.fund_id, e.created_at, f.name AS fund_name
    FROM investment_events e
    LEFT JOIN funds f ON f.id = e.fund_id
    WHERE e.id < ?
    ORDER BY e.id ASC
"#;

async fn fetch_ledger_rows<'e, E>(executor: E) -> Result<Vec<LedgerRow>, LedgerError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(SCAN_SQL).fetch_all(executor).await?;
    rows.iter().map(ledger_row_from).collect()
}

async fn fetch_ledger_rows_before<'e, E>(
    executor: E,
    id: EventId,
) -> Result<Vec<LedgerRow>, LedgerError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(SCAN_BEFORE_SQL)
        .bind(id.as_i64())
        .fetch_all(executor)
        .await?;
    rows.iter().map(ledger_row_from).collect()
}

async fn insert_event_row<'e, E>(
    executor: E,
    event: NewInvestmentEvent,
) -> Result<InvestmentEvent, LedgerError>
where
    E: Executor<'e, Database = Sqlite>,
{
    event.check_fund_link()?;

    let created_at = TimeMs::now();
    let result = sqlx::query(
        r#"
        INSERT INTO investment_events (amount, event_type, fund_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(event.amount.to_canonical_string())
    .bind(event.kind.as_str())
    .bind(event.fund_id.map(|f| f.as_i64()))
    .bind(created_at.as_ms())
    .execute(executor)
    .await?;

    Ok(InvestmentEvent::from_new(
        EventId::new(result.last_insert_rowid()),
        event,
        created_at,
    ))
}

fn ledger_row_from(row: &SqliteRow) -> Result<LedgerRow, LedgerError> {
    let id: i64 = row.try_get("id")?;
    let amount_str: String = row.try_get("amount")?;
    let kind_str: String = row.try_get("event_type")?;
    let fund_id: Option<i64> = row.try_get("fund_id")?;
    let created_at: i64 = row.try_get("created_at")?;
    let fund_name: Option<String> = row.try_get("fund_name")?;

    let amount = Decimal::from_str_canonical(&amount_str).map_err(|e| {
        warn!(
            event_id = id,
            amount = %amount_str,
            error = %e,
            "Failed to parse stored event amount"
        );
        LedgerError::CorruptRow(format!("event {} has invalid amount {:?}", id, amount_str))
    })?;

    let event_type = kind_str.parse::<EventKind>().map_err(|e| {
        warn!(event_id = id, event_type = %kind_str, "Unknown stored event type");
        LedgerError::CorruptRow(format!("event {}: {}", id, e))
    })?;

    Ok(LedgerRow {
        event: InvestmentEvent {
            id: EventId::new(id),
            amount,
            event_type,
            fund_id: fund_id.map(FundId::new),
            created_at: TimeMs::new(created_at),
        },
        fund_name,
    })
}

impl Repository {
    /// Every event in insertion order, left-joined with fund names.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored row is unreadable.
    pub async fn query_ledger_rows(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        fetch_ledger_rows(&self.pool).await
    }

    /// Append one event.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including foreign key violations.
    pub async fn insert_event(
        &self,
        event: NewInvestmentEvent,
    ) -> Result<InvestmentEvent, LedgerError> {
        insert_event_row(&self.pool, event).await
    }

    /// Insert, then check the rows logged before the new one, in one transaction.
    ///
    /// The insert comes first so the transaction holds the write lock before
    /// it reads, and no other writer can land in between. A check failure
    /// rolls back. Dropping the future mid-way drops the transaction, which
    /// rolls back too, so the pooled connection comes back clean.
    ///
    /// # Errors
    /// Returns the check's error (after rolling back) or any storage error.
    pub async fn insert_event_checked(
        &self,
        event: NewInvestmentEvent,
        check: AppendCheck<'_>,
    ) -> Result<InvestmentEvent, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let stored = insert_event_row(&mut *tx, event).await?;
        let prior = fetch_ledger_rows_before(&mut *tx, stored.id).await?;
        if let Err(err) = check(&prior) {
            tx.rollback().await?;
            return Err(err);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Delete every event. Returns the number of rows removed.
    pub async fn delete_all_events(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM investment_events")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_events(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM investment_events")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
