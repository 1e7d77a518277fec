//! Database initialization and schema migrations.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open the ledger database with the default pool size.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    init_db_with_options(db_path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open (creating if needed) the ledger database, configure pragmas and
/// apply the schema.
pub async fn init_db_with_options(
    db_path: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool).await?;

    info!(path = %db_path, max_connections, "Ledger database initialized");
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // Off by default in SQLite; fund_id references depend on it.
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!(journal_mode = %journal_mode, "SQLite journal mode set");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_db_path(temp_dir: &TempDir) -> String {
        temp_dir
            .path()
            .join("ledger.db")
            .to_string_lossy()
            .to_string()
    }

    #[tokio::test]
    async fn test_init_db_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_db_path(&temp_dir);

        let pool = init_db(&db_path).await.expect("init_db failed");
        assert!(Path::new(&db_path).exists());

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_init_db_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("nested")
            .join("dir")
            .join("ledger.db")
            .to_string_lossy()
            .to_string();

        init_db(&db_path).await.expect("init_db failed");
        assert!(Path::new(&db_path).exists());
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_db_path(&temp_dir))
            .await
            .expect("init_db failed");

        for table in ["funds", "investment_events"] {
            let result: (String,) =
                sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
                    .bind(table)
                    .fetch_one(&pool)
                    .await
                    .expect("query failed");
            assert_eq!(result.0, table);
        }
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_db_path(&temp_dir))
            .await
            .expect("init_db failed");

        run_migrations(&pool)
            .await
            .expect("second migration run failed");
    }

    #[tokio::test]
    async fn test_event_type_check_constraint() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_db_path(&temp_dir))
            .await
            .expect("init_db failed");

        let result = sqlx::query(
            "INSERT INTO investment_events (amount, event_type, created_at) VALUES ('1', 'transfer', 0)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_db_path(&temp_dir))
            .await
            .expect("init_db failed");

        let result: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);

        let insert = sqlx::query(
            "INSERT INTO investment_events (amount, event_type, fund_id, created_at) VALUES ('1', 'allocation', 999, 0)",
        )
        .execute(&pool)
        .await;
        assert!(insert.is_err());
    }

    #[tokio::test]
    async fn test_fund_link_check_constraint() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_db_path(&temp_dir))
            .await
            .expect("init_db failed");

        let allocation_without_fund = sqlx::query(
            "INSERT INTO investment_events (amount, event_type, created_at) VALUES ('1', 'allocation', 0)",
        )
        .execute(&pool)
        .await;
        assert!(allocation_without_fund.is_err());

        sqlx::query("INSERT INTO funds (name, created_at) VALUES ('Test Fund', 0)")
            .execute(&pool)
            .await
            .expect("fund insert failed");
        let deposit_with_fund = sqlx::query(
            "INSERT INTO investment_events (amount, event_type, fund_id, created_at) VALUES ('1', 'deposit', 1, 0)",
        )
        .execute(&pool)
        .await;
        assert!(deposit_with_fund.is_err());

        let withdrawal = sqlx::query(
            "INSERT INTO investment_events (amount, event_type, created_at) VALUES ('1', 'withdrawal', 0)",
        )
        .execute(&pool)
        .await;
        assert!(withdrawal.is_ok());
    }
}
