//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use payrec_types::{Page, PageRequest, PaymentId, PaymentRecord, PaymentRecordRepository, RepoError};

use crate::types::{PAYMENT_COLUMNS, PgPaymentRow, classify, tx_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Concurrent writers to the same row are serialized by
/// PostgreSQL's own row locks.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a schema file, splitting by semicolons.
async fn execute_schema(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Schema {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository and makes sure the schema exists.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_schema(&pool, include_str!("../migrations/0001_create_payments_pg.sql"), "payments").await?;
        tracing::debug!("PostgreSQL schema ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        execute_schema(&self.pool, include_str!("../migrations/0001_create_payments_pg.sql"), "payments")
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRecordRepository for PostgresRepo {
    async fn find_all(&self, request: &PageRequest) -> Result<Page<PaymentRecord>, RepoError> {
        let order_by = request.sort().unwrap_or_default().order_by_clause();

        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *db_tx)
            .await
            .map_err(tx_error)?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM payments"#)
            .fetch_one(&mut *db_tx)
            .await
            .map_err(classify)?;

        // An offset past i64::MAX is beyond any stored row.
        let rows: Vec<PgPaymentRow> = match i64::try_from(request.offset()) {
            Ok(offset) => sqlx::query_as(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM payments {order_by} LIMIT $1 OFFSET $2"
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
            .map(PgPaymentRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total as u64))
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<PaymentRecord>, RepoError> {
        let row: Option<PgPaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(PgPaymentRow::into_domain).transpose()
    }

    async fn exists_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
        sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM payments WHERE id = $1)"#)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn save(&self, mut record: PaymentRecord) -> Result<PaymentRecord, RepoError> {
        let status = record.status.to_string();

        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        match record.id {
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE payments
                       SET amount = $1, holder_name = $2, card_number = $3, expiry = $4,
                           security_code = $5, status = $6, order_id = $7, payment_method_id = $8
                       WHERE id = $9"#,
                )
                .bind(record.amount)
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
                let id: i64 = sqlx::query_scalar(
                    r#"INSERT INTO payments
                       (amount, holder_name, card_number, expiry, security_code, status, order_id, payment_method_id)
                       VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                       RETURNING id"#,
                )
                .bind(record.amount)
                .bind(&record.holder_name)
                .bind(&record.card_number)
                .bind(&record.expiry)
                .bind(&record.security_code)
                .bind(&status)
                .bind(record.order_id.get())
                .bind(record.payment_method_id.get())
                .fetch_one(&mut *db_tx)
                .await
                .map_err(classify)?;

                record.id = Some(PaymentId::new(id));
            }
        }

        db_tx.commit().await.map_err(tx_error)?;

        Ok(record)
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(tx_error)?;

        sqlx::query(r#"DELETE FROM payments WHERE id = $1"#)
            .bind(id.get())
            .execute(&mut *db_tx)
            .await
            .map_err(classify)?;

        // Deferred foreign keys are checked here.
        db_tx.commit().await.map_err(classify)?;

        Ok(())
    }
}
