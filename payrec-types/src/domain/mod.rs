//! Domain models for the payment record service.

pub mod ids;
pub mod payment;
pub mod status;

pub use ids::{OrderId, PaymentId, PaymentMethodId};
pub use payment::{PaymentRecord, PaymentRecordRef};
pub use status::PaymentStatus;
