//! Payment record entity and its lazy reference handle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{OrderId, PaymentId, PaymentMethodId};
use super::status::PaymentStatus;
use crate::dto::PaymentRecordView;

/// The storage-backed representation of a payment record.
///
/// `id` is `None` until the record has been inserted; storage assigns it and it
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Option<PaymentId>,
    /// Exact monetary amount
    pub amount: Decimal,
    pub holder_name: String,
    /// Opaque card token, stored as given
    pub card_number: String,
    /// `MM/YY`, stored as given
    pub expiry: String,
    pub security_code: String,
    pub status: PaymentStatus,
    pub order_id: OrderId,
    pub payment_method_id: PaymentMethodId,
}

impl PaymentRecord {
    /// Builds a not-yet-persisted record from a transfer view.
    ///
    /// Any id carried by the view is dropped; storage assigns a fresh one on save.
    pub fn from_view(view: &PaymentRecordView) -> Self {
        Self {
            id: None,
            amount: view.amount,
            holder_name: view.holder_name.clone(),
            card_number: view.card_number.clone(),
            expiry: view.expiry.clone(),
            security_code: view.security_code.clone(),
            status: view.status,
            order_id: view.order_id,
            payment_method_id: view.payment_method_id,
        }
    }
}

/// Handle to a stored payment record that has not been loaded.
///
/// Obtaining one performs no I/O and does not check that the row exists. The
/// check happens when the entity built from it is saved: an update that matches
/// no row fails with `RepoError::NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRecordRef {
    id: PaymentId,
}

impl PaymentRecordRef {
    pub fn new(id: PaymentId) -> Self {
        Self { id }
    }

    /// Materializes the referenced entity with every field taken from `view`.
    ///
    /// The referenced id wins over whatever id the view carries.
    pub fn with_fields(self, view: &PaymentRecordView) -> PaymentRecord {
        let mut entity = PaymentRecord::from_view(view);
        entity.id = Some(self.id);
        entity
    }
}
