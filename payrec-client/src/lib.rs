//! # Payment Record Client SDK
//!
//! A typed Rust client for the payment record API.

use payrec_types::{Page, PaymentId, PaymentRecordView};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Payment record API client.
pub struct PaymentRecordsClient {
    base_url: String,
    http: Client,
}

impl PaymentRecordsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists one page of payment records. `sort` is `field` or `field,asc|desc`.
    pub async fn list_payments(
        &self,
        page: u32,
        size: u32,
        sort: Option<&str>,
    ) -> Result<Page<PaymentRecordView>, ClientError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(sort) = sort {
            query.push(("sort", sort.to_string()));
        }
        let req = self.http.get(self.url("/payments")).query(&query);
        self.send_json(req).await
    }

    /// Gets a payment record by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentRecordView, ClientError> {
        let req = self.http.get(self.url(&format!("/payments/{}", id)));
        self.send_json(req).await
    }

    /// Creates a payment record. Any ID on `view` is ignored by the server.
    pub async fn create_payment(
        &self,
        view: &PaymentRecordView,
    ) -> Result<PaymentRecordView, ClientError> {
        let req = self.http.post(self.url("/payments")).json(view);
        self.send_json(req).await
    }

    /// Replaces every field of the payment record at `id`.
    pub async fn update_payment(
        &self,
        id: PaymentId,
        view: &PaymentRecordView,
    ) -> Result<PaymentRecordView, ClientError> {
        let req = self
            .http
            .put(self.url(&format!("/payments/{}", id)))
            .json(view);
        self.send_json(req).await
    }

    /// Deletes the payment record at `id`.
    pub async fn delete_payment(&self, id: PaymentId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/payments/{}", id)))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PaymentRecordsClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentRecordsClient::new("http://localhost:3000/");
        assert_eq!(client.url("/payments/1"), "http://localhost:3000/payments/1");
    }

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::Api {
            status: 404,
            message: "Resource not found! Id: 1".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error: 404 - Resource not found! Id: 1");
    }
}
