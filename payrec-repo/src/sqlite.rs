//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use payrec_types::{
    Page, PageRequest, PaymentId, PaymentRecord, PaymentRecordRepository, RepoError, SortField,
};

use crate::types::{PAYMENT_COLUMNS, SqlitePaymentRow, classify, tx_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository and makes sure the schema exists.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::debug!("SQLite schema ready");

        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `payments` table if it does not exist yet.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        Ok(())
    }
}

/// Sort expression per field. Amounts are stored as text, so they are cast
/// for ordering only. The cast is a double: amounts equal to ~15 significant
/// digits tie and fall back to id order.
fn sort_expr(field: SortField) -> &'static str {
    match field {
        SortField::Amount => "CAST(amount AS REAL)",
        other => other.column(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRecordRepository for SqliteRepo {
    async fn find_all(&self, request: &PageRequest) -> Result<Page<PaymentRecord>, RepoError> {
        let order_by = request
            .sort()
            .unwrap_or_default()
            .order_by_clause_with(sort_expr);

        // Count and page read in one transaction so they agree.
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM payments"#)
            .fetch_one(&mut *db_tx)
            .await
            .map_err(classify)?;

        // An offset past i64::MAX is beyond any stored row.
        let rows: Vec<SqlitePaymentRow> = match i64::try_from(request.offset()) {
            Ok(offset) => sqlx::query_as(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM payments {order_by} LIMIT ? OFFSET ?"
            ))
            .bind(i64::from(request.size()))
            .bind(offset)
            .fetch_all(&mut *db_tx)
            .await
            .map_err(classify)?,
            Err(_) => Vec::new(),
        };

        db_tx.commit().await.map_err(tx_error)?;

        let content = rows
            .into_iter()
            .map(SqlitePaymentRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total as u64))
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<PaymentRecord>, RepoError> {
        let row: Option<SqlitePaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn exists_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(1) FROM payments WHERE id = ?"#)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(count > 0)
    }

    async fn save(&self, mut record: PaymentRecord) -> Result<PaymentRecord, RepoError> {
        let amount = record.amount.to_string();
        let status = record.status.to_string();

        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        match record.id {
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE payments
                       SET amount = ?, holder_name = ?, card_number = ?, expiry = ?,
                           security_code = ?, status = ?, order_id = ?, payment_method_id = ?
                       WHERE id = ?"#,
                )
                .bind(&amount)
                .bind(&record.holder_name)
                .bind(&record.card_number)
                .bind(&record.expiry)
                .bind(&record.security_code)
                .bind(&status)
                .bind(record.order_id.get())
                .bind(record.payment_method_id.get())
                .bind(id.get())
                .execute(&mut *db_tx)
                .await
                .map_err(classify)?;

                if result.rows_affected() == 0 {
                    return Err(RepoError::NotFound);
                }
            }
            None => {
                let result = sqlx::query(
                    r#"INSERT INTO payments
                       (amount, holder_name, card_number, expiry, security_code, status, order_id, payment_method_id)
                       VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
                )
                .bind(&amount)
                .bind(&record.holder_name)
                .bind(&record.card_number)
                .bind(&record.expiry)
                .bind(&record.security_code)
                .bind(&status)
                .bind(record.order_id.get())
                .bind(record.payment_method_id.get())
                .execute(&mut *db_tx)
                .await
                .map_err(classify)?;

                record.id = Some(PaymentId::new(result.last_insert_rowid()));
            }
        }

        db_tx.commit().await.map_err(tx_error)?;

        Ok(record)
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        sqlx::query(r#"DELETE FROM payments WHERE id = ?"#)
            .bind(id.get())
            .execute(&mut *db_tx)
            .await
            .map_err(classify)?;

        // Deferred foreign keys are checked here.
        db_tx.commit().await.map_err(classify)?;

        Ok(())
    }
}
