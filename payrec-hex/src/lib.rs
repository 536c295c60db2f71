//! # Payment Record Hex
//!
//! Application service layer and HTTP adapter for the payment record service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (existence checks, error translation)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: PaymentRecordRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::PaymentRecordService;
