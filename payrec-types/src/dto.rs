//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{OrderId, PaymentId, PaymentMethodId, PaymentRecord, PaymentStatus};
use crate::error::DomainError;

const MAX_HOLDER_NAME_LEN: usize = 50;
const MAX_CARD_NUMBER_LEN: usize = 20;
const EXPIRY_LEN: usize = 5;
const SECURITY_CODE_LEN: usize = 3;

/// Boundary shape of a payment record, used for both input and output.
///
/// On input the `id` is never trusted: creation ignores it and updates target
/// the id from the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecordView {
    /// Storage-assigned identifier (absent before creation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>, example = 1)]
    pub id: Option<PaymentId>,
    /// Amount as an exact decimal
    #[schema(value_type = String, example = "32.25")]
    pub amount: Decimal,
    /// Card holder name
    #[schema(example = "Bach")]
    pub holder_name: String,
    #[schema(example = "294737375583726632")]
    pub card_number: String,
    /// Card expiry in `MM/YY` form
    #[schema(example = "07/08")]
    pub expiry: String,
    #[schema(example = "585")]
    pub security_code: String,
    pub status: PaymentStatus,
    #[schema(value_type = i64, example = 1)]
    pub order_id: OrderId,
    #[schema(value_type = i64, example = 2)]
    pub payment_method_id: PaymentMethodId,
}

impl PaymentRecordView {
    /// Checks the field constraints the HTTP boundary enforces before a view
    /// reaches the service.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::Validation("amount must be positive".into()));
        }
        check_text("holder_name", &self.holder_name, 1, MAX_HOLDER_NAME_LEN)?;
        check_text("card_number", &self.card_number, 1, MAX_CARD_NUMBER_LEN)?;
        check_text("expiry", &self.expiry, EXPIRY_LEN, EXPIRY_LEN)?;
        check_text(
            "security_code",
            &self.security_code,
            SECURITY_CODE_LEN,
            SECURITY_CODE_LEN,
        )?;
        Ok(())
    }
}

fn check_text(field: &str, value: &str, min: usize, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be blank")));
    }
    let len = value.chars().count();
    if len < min || len > max {
        let expected = if min == max {
            format!("exactly {min}")
        } else {
            format!("between {min} and {max}")
        };
        return Err(DomainError::Validation(format!(
            "{field} must be {expected} characters long"
        )));
    }
    Ok(())
}

impl From<PaymentRecord> for PaymentRecordView {
    fn from(entity: PaymentRecord) -> Self {
        Self {
            id: entity.id,
            amount: entity.amount,
            holder_name: entity.holder_name,
            card_number: entity.card_number,
            expiry: entity.expiry,
            security_code: entity.security_code,
            status: entity.status,
            order_id: entity.order_id,
            payment_method_id: entity.payment_method_id,
        }
    }
}
