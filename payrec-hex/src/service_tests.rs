//! PaymentRecordService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use payrec_types::{
        AppError, Decimal, Direction, OrderId, Page, PageRequest, PaymentId, PaymentMethodId,
        PaymentRecord, PaymentRecordRepository, PaymentRecordView, PaymentStatus, RepoError, Sort,
        SortField,
    };

    use crate::PaymentRecordService;

    /// Simple in-memory repository for testing the service layer.
    ///
    /// Records every port call so tests can check which storage paths a
    /// service operation took.
    pub struct MockRepo {
        rows: Mutex<HashMap<PaymentId, PaymentRecord>>,
        next_id: Mutex<i64>,
        /// Ids that another (imaginary) table still points at
        referenced: Mutex<HashSet<PaymentId>>,
        fail_storage: AtomicBool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
                referenced: Mutex::new(HashSet::new()),
                fail_storage: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn mark_referenced(&self, id: PaymentId) {
            self.referenced.lock().unwrap().insert(id);
        }

        pub fn fail_storage(&self) {
            self.fail_storage.store(true, Ordering::SeqCst);
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn record(&self, call: &'static str) -> Result<(), RepoError> {
            self.calls.lock().unwrap().push(call);
            if self.fail_storage.load(Ordering::SeqCst) {
                return Err(RepoError::Database("connection reset".into()));
            }
            Ok(())
        }
    }

    fn compare(a: &PaymentRecord, b: &PaymentRecord, field: SortField) -> std::cmp::Ordering {
        match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::HolderName => a.holder_name.cmp(&b.holder_name),
            SortField::Status => a.status.as_ref().cmp(b.status.as_ref()),
            SortField::OrderId => a.order_id.cmp(&b.order_id),
            SortField::PaymentMethodId => a.payment_method_id.cmp(&b.payment_method_id),
        }
        .then(a.id.cmp(&b.id))
    }

    #[async_trait]
    impl PaymentRecordRepository for MockRepo {
        async fn find_all(&self, request: &PageRequest) -> Result<Page<PaymentRecord>, RepoError> {
            self.record("find_all")?;
            let sort = request.sort().unwrap_or_default();
            let mut rows: Vec<PaymentRecord> = self.rows.lock().unwrap().values().cloned().collect();
            rows.sort_by(|a, b| compare(a, b, sort.field));
            if sort.direction == Direction::Desc {
                rows.reverse();
            }
            let total = rows.len() as u64;
            let content = rows
                .into_iter()
                .skip(request.offset() as usize)
                .take(request.size() as usize)
                .collect();
            Ok(Page::new(content, request, total))
        }

        async fn find_by_id(&self, id: PaymentId) -> Result<Option<PaymentRecord>, RepoError> {
            self.record("find_by_id")?;
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn exists_by_id(&self, id: PaymentId) -> Result<bool, RepoError> {
            self.record("exists_by_id")?;
            Ok(self.rows.lock().unwrap().contains_key(&id))
        }

        async fn save(&self, mut record: PaymentRecord) -> Result<PaymentRecord, RepoError> {
            self.record("save")?;
            let mut rows = self.rows.lock().unwrap();
            match record.id {
                Some(id) => {
                    let row = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
                    *row = record.clone();
                }
                None => {
                    let mut next_id = self.next_id.lock().unwrap();
                    let id = PaymentId::new(*next_id);
                    *next_id += 1;
                    record.id = Some(id);
                    rows.insert(id, record.clone());
                }
            }
            Ok(record)
        }

        async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError> {
            self.record("delete_by_id")?;
            if self.referenced.lock().unwrap().contains(&id) {
                return Err(RepoError::IntegrityViolation(
                    "FOREIGN KEY constraint failed".into(),
                ));
            }
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    pub fn sample_view() -> PaymentRecordView {
        PaymentRecordView {
            id: None,
            amount: Decimal::new(3225, 2),
            holder_name: "Bach".to_string(),
            card_number: "294737375583726632".to_string(),
            expiry: "07/08".to_string(),
            security_code: "585".to_string(),
            status: PaymentStatus::Created,
            order_id: OrderId::new(1),
            payment_method_id: PaymentMethodId::new(2),
        }
    }

    async fn service_with_one() -> (PaymentRecordService<MockRepo>, PaymentId) {
        let service = PaymentRecordService::new(MockRepo::new());
        let created = service.create(sample_view()).await.unwrap();
        (service, created.id.unwrap())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_fields() {
        let service = PaymentRecordService::new(MockRepo::new());

        let created = service.create(sample_view()).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(PaymentRecordView { id: None, ..created }, sample_view());
    }

    #[tokio::test]
    async fn test_create_ignores_caller_id() {
        let service = PaymentRecordService::new(MockRepo::new());

        let mut view = sample_view();
        view.id = Some(PaymentId::new(500));
        let created = service.create(view).await.unwrap();

        assert_eq!(created.id, Some(PaymentId::new(1)));
        assert!(matches!(
            service.get_by_id(PaymentId::new(500)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_read_after_write() {
        let (service, id) = service_with_one().await;

        let fetched = service.get_by_id(id).await.unwrap();

        assert_eq!(fetched.id, Some(id));
        assert_eq!(PaymentRecordView { id: None, ..fetched }, sample_view());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_carries_id() {
        let service = PaymentRecordService::new(MockRepo::new());

        let err = service.get_by_id(PaymentId::new(100)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(id) if id == PaymentId::new(100)));
        assert_eq!(err.to_string(), "Resource not found! Id: 100");
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let (service, id) = service_with_one().await;

        let replacement = PaymentRecordView {
            id: Some(PaymentId::new(77)),
            amount: Decimal::new(100, 0),
            holder_name: "pix".to_string(),
            card_number: "378292222223".to_string(),
            expiry: "08/09".to_string(),
            security_code: "233".to_string(),
            status: PaymentStatus::Confirmed,
            order_id: OrderId::new(3),
            payment_method_id: PaymentMethodId::new(4),
        };

        let updated = service.update(id, replacement.clone()).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(
            PaymentRecordView {
                id: Some(PaymentId::new(77)),
                ..updated.clone()
            },
            replacement
        );
        assert_eq!(service.get_by_id(id).await.unwrap(), updated);
        assert!(matches!(
            service.get_by_id(PaymentId::new(77)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_does_not_read_before_writing() {
        let (service, id) = service_with_one().await;

        service.update(id, sample_view()).await.unwrap();

        assert_eq!(service.repo().calls(), vec!["save", "save"]);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let service = PaymentRecordService::new(MockRepo::new());

        let result = service.update(PaymentId::new(100), sample_view()).await;

        assert!(matches!(result, Err(AppError::NotFound(id)) if id == PaymentId::new(100)));
        assert_eq!(service.repo().row_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let (service, id) = service_with_one().await;

        service.delete(id).await.unwrap();

        assert!(matches!(
            service.get_by_id(id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(
            service.repo().calls(),
            vec!["save", "exists_by_id", "delete_by_id", "find_by_id"]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found_without_delete_call() {
        let service = PaymentRecordService::new(MockRepo::new());

        let result = service.delete(PaymentId::new(100)).await;

        assert!(matches!(result, Err(AppError::NotFound(id)) if id == PaymentId::new(100)));
        assert_eq!(service.repo().calls(), vec!["exists_by_id"]);
    }

    #[tokio::test]
    async fn test_delete_referenced_is_integrity_violation() {
        let (service, id) = service_with_one().await;
        service.repo().mark_referenced(id);

        let err = service.delete(id).await.unwrap_err();

        assert!(matches!(err, AppError::IntegrityViolation(_)));
        assert_eq!(err.to_string(), "referential integrity failure");
        assert!(service.get_by_id(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_returns_page_metadata() {
        let service = PaymentRecordService::new(MockRepo::new());
        for _ in 0..5 {
            service.create(sample_view()).await.unwrap();
        }

        let request = PageRequest::new(1, 2).unwrap();
        let page = service.list(&request).await.unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 1);
        assert!(page.content.len() <= 2);
        let ids: Vec<_> = page.content.iter().map(|v| v.id.unwrap().get()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_list_honours_sort() {
        let service = PaymentRecordService::new(MockRepo::new());
        for cents in [500, 100, 300] {
            let mut view = sample_view();
            view.amount = Decimal::new(cents, 2);
            service.create(view).await.unwrap();
        }

        let request = PageRequest::new(0, 10)
            .unwrap()
            .with_sort(Sort::desc(SortField::Amount));
        let page = service.list(&request).await.unwrap();

        let amounts: Vec<_> = page.content.iter().map(|v| v.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(500, 2), Decimal::new(300, 2), Decimal::new(100, 2)]
        );
    }

    #[tokio::test]
    async fn test_list_empty() {
        let service = PaymentRecordService::new(MockRepo::new());

        let page = service.list(&PageRequest::new(0, 10).unwrap()).await.unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate_unchanged() {
        let service = PaymentRecordService::new(MockRepo::new());
        service.repo().fail_storage();

        let list = service.list(&PageRequest::new(0, 10).unwrap()).await;
        assert!(matches!(
            list,
            Err(AppError::Repository(RepoError::Database(_)))
        ));

        let create = service.create(sample_view()).await;
        assert!(matches!(
            create,
            Err(AppError::Repository(RepoError::Database(_)))
        ));

        let update = service.update(PaymentId::new(1), sample_view()).await;
        assert!(matches!(
            update,
            Err(AppError::Repository(RepoError::Database(_)))
        ));

        let delete = service.delete(PaymentId::new(1)).await;
        assert!(matches!(
            delete,
            Err(AppError::Repository(RepoError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = PaymentRecordService::new(MockRepo::new());

        let created = service.create(sample_view()).await.unwrap();
        let id = created.id.unwrap();

        let mut change = sample_view();
        change.amount = Decimal::new(100, 0);
        let updated = service.update(id, change).await.unwrap();
        assert_eq!(updated.amount, Decimal::new(100, 0));
        assert_eq!(updated.id, Some(id));

        service.delete(id).await.unwrap();
        assert!(matches!(
            service.get_by_id(id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
