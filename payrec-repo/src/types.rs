//! Database row types and error classification shared by the adapters.

use sqlx::FromRow;

use payrec_types::{OrderId, PaymentId, PaymentMethodId, PaymentRecord, PaymentStatus, RepoError};

/// Maps a driver error to a repository error.
///
/// Foreign-key refusals become [`RepoError::IntegrityViolation`]; everything
/// else is reported as a plain database failure.
pub fn classify(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepoError::IntegrityViolation(db.message().to_string())
        }
        _ => RepoError::Database(err.to_string()),
    }
}

pub fn tx_error(err: sqlx::Error) -> RepoError {
    RepoError::Transaction(err.to_string())
}

/// Column list shared by every SELECT on `payments`.
pub const PAYMENT_COLUMNS: &str =
    "id, amount, holder_name, card_number, expiry, security_code, status, order_id, payment_method_id";

/// Payment row from SQLite. `amount` is stored as decimal text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqlitePaymentRow {
    pub id: i64,
    pub amount: String,
    pub holder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub security_code: String,
    pub status: String,
    pub order_id: i64,
    pub payment_method_id: i64,
}

#[cfg(feature = "sqlite")]
impl SqlitePaymentRow {
    pub fn into_domain(self) -> Result<PaymentRecord, RepoError> {
        let amount = self.amount.parse().map_err(|e| {
            RepoError::Database(format!(
                "Invalid amount '{}' in payment {}: {}",
                self.amount, self.id, e
            ))
        })?;

        Ok(PaymentRecord {
            id: Some(PaymentId::new(self.id)),
            amount,
            holder_name: self.holder_name,
            card_number: self.card_number,
            expiry: self.expiry,
            security_code: self.security_code,
            status: self.status.parse::<PaymentStatus>()?,
            order_id: OrderId::new(self.order_id),
            payment_method_id: PaymentMethodId::new(self.payment_method_id),
        })
    }
}

/// Payment row from PostgreSQL. `amount` is a NUMERIC column.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgPaymentRow {
    pub id: i64,
    pub amount: rust_decimal::Decimal,
    pub holder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub security_code: String,
    pub status: String,
    pub order_id: i64,
    pub payment_method_id: i64,
}

#[cfg(feature = "postgres")]
impl PgPaymentRow {
    pub fn into_domain(self) -> Result<PaymentRecord, RepoError> {
        Ok(PaymentRecord {
            id: Some(PaymentId::new(self.id)),
            amount: self.amount,
            holder_name: self.holder_name,
            card_number: self.card_number,
            expiry: self.expiry,
            security_code: self.security_code,
            status: self.status.parse::<PaymentStatus>()?,
            order_id: OrderId::new(self.order_id),
            payment_method_id: PaymentMethodId::new(self.payment_method_id),
        })
    }
}
