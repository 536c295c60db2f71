//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payrec_types::{Direction, Page, PaymentRecordView, PaymentStatus, SortField};
use utoipa::OpenApi;

use crate::inbound::handlers::ListParams;

// Stand-ins for the generic handlers so utoipa can generate path docs.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List payment records
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(ListParams),
    responses(
        (status = 200, description = "One page of payment records", body = Page<PaymentRecordView>),
        (status = 400, description = "Invalid page size or sort key")
    )
)]
async fn list_payments() {}

/// Get a payment record by ID
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment record ID")
    ),
    responses(
        (status = 200, description = "Payment record found", body = PaymentRecordView),
        (status = 404, description = "No payment record with this ID")
    )
)]
async fn get_payment() {}

/// Create a payment record
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = PaymentRecordView,
    responses(
        (status = 201, description = "Payment record created; any ID in the body is ignored", body = PaymentRecordView),
        (status = 400, description = "Invalid payment record")
    )
)]
async fn create_payment() {}

/// Replace every field of a payment record
#[utoipa::path(
    put,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment record ID; wins over any ID in the body")
    ),
    request_body = PaymentRecordView,
    responses(
        (status = 200, description = "Payment record replaced", body = PaymentRecordView),
        (status = 400, description = "Invalid payment record"),
        (status = 404, description = "No payment record with this ID")
    )
)]
async fn update_payment() {}

/// Delete a payment record
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment record ID")
    ),
    responses(
        (status = 204, description = "Payment record deleted"),
        (status = 404, description = "No payment record with this ID"),
        (status = 409, description = "Payment record is still referenced by another entity")
    )
)]
async fn delete_payment() {}

/// OpenAPI documentation for the payment record API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Record Service API",
        version = "1.0.0",
        description = "Stores, lists, replaces and deletes payment records tied to an order and a payment method.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_payments,
        get_payment,
        create_payment,
        update_payment,
        delete_payment,
    ),
    components(schemas(PaymentRecordView, PaymentStatus, SortField, Direction)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment record CRUD"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_payment_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/payments"));
        assert!(doc.paths.paths.contains_key("/payments/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
