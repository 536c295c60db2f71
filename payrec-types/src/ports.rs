//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) implement it; the service only sees the trait.

use crate::domain::{PaymentId, PaymentRecord, PaymentRecordRef};
use crate::error::RepoError;
use crate::page::{Page, PageRequest};

/// Storage capabilities the payment record service relies on.
///
/// Every method is a single atomic unit of work: either all of its storage
/// effects commit or none do.
#[async_trait::async_trait]
pub trait PaymentRecordRepository: Send + Sync + 'static {
    /// Returns one page of records ordered as requested, plus the total row count.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<PaymentRecord>, RepoError>;

    /// Loads a record by id.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<PaymentRecord>, RepoError>;

    /// Reports whether a record with this id exists.
    async fn exists_by_id(&self, id: PaymentId) -> Result<bool, RepoError>;

    /// Returns a handle to the record without touching storage.
    ///
    /// Existence is only checked once an entity built from the handle is saved.
    fn get_reference(&self, id: PaymentId) -> PaymentRecordRef {
        PaymentRecordRef::new(id)
    }

    /// Persists a record.
    ///
    /// With `id == None` the record is inserted and storage assigns the id.
    /// Otherwise every field of the row with that id is replaced; if no such
    /// row exists the call fails with [`RepoError::NotFound`] and nothing is written.
    async fn save(&self, record: PaymentRecord) -> Result<PaymentRecord, RepoError>;

    /// Removes a record.
    ///
    /// Fails with [`RepoError::IntegrityViolation`] when another row still
    /// references it.
    async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError>;
}
