//! Payment Record Application Service
//!
//! Enforces existence and integrity rules around the repository port and
//! translates the storage failures callers must tell apart into domain errors.
//! Contains NO infrastructure logic.

use payrec_types::{
    AppError, Page, PageRequest, PaymentId, PaymentRecord, PaymentRecordRepository,
    PaymentRecordView, RepoError,
};

/// Application service for payment records.
///
/// Generic over `R: PaymentRecordRepository` - the adapter is injected at compile time.
/// Each method is one unit of work on the repository; errors are returned to the
/// caller as-is, never logged or retried here.
pub struct PaymentRecordService<R: PaymentRecordRepository> {
    repo: R,
}

impl<R: PaymentRecordRepository> PaymentRecordService<R> {
    /// Creates a new service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists one page of records. Storage errors propagate untouched.
    #[tracing::instrument(skip(self), fields(page = request.page(), size = request.size()))]
    pub async fn list(&self, request: &PageRequest) -> Result<Page<PaymentRecordView>, AppError> {
        let page = self.repo.find_all(request).await?;
        tracing::debug!(total = page.total_elements, "listed payment records");
        Ok(page.map(PaymentRecordView::from))
    }

    /// Gets a record by id.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn get_by_id(&self, id: PaymentId) -> Result<PaymentRecordView, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(PaymentRecordView::from)
            .ok_or(AppError::NotFound(id))
    }

    /// Stores a new record. Any id on the view is ignored; storage assigns one.
    #[tracing::instrument(skip(self, view))]
    pub async fn create(&self, view: PaymentRecordView) -> Result<PaymentRecordView, AppError> {
        let saved = self.repo.save(PaymentRecord::from_view(&view)).await?;
        tracing::debug!(payment_id = ?saved.id, "payment record created");
        Ok(saved.into())
    }

    /// Replaces every field of the record at `id` with the view's values.
    ///
    /// The row is not read first: the write itself reports a missing row,
    /// which surfaces as [`AppError::NotFound`].
    #[tracing::instrument(skip(self, view), fields(payment_id = %id))]
    pub async fn update(
        &self,
        id: PaymentId,
        view: PaymentRecordView,
    ) -> Result<PaymentRecordView, AppError> {
        let entity = self.repo.get_reference(id).with_fields(&view);

        match self.repo.save(entity).await {
            Ok(saved) => Ok(saved.into()),
            Err(RepoError::NotFound) => Err(AppError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the record at `id`.
    ///
    /// Fails with [`AppError::NotFound`] when there is nothing to delete and with
    /// [`AppError::IntegrityViolation`] when other rows still reference it.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn delete(&self, id: PaymentId) -> Result<(), AppError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(id));
        }

        match self.repo.delete_by_id(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::IntegrityViolation(_)) => Err(AppError::integrity_violation()),
            Err(e) => Err(e.into()),
        }
    }
}
