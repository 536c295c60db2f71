//! # Payment Record Types
//!
//! Domain types and port traits for the payment record service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Entity, identifiers and status
//! - `dto/` - The transfer view used at API boundaries
//! - `page/` - Pagination request/result types
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod page;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    OrderId, PaymentId, PaymentMethodId, PaymentRecord, PaymentRecordRef, PaymentStatus,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use page::{Direction, Page, PageRequest, Sort, SortField};
pub use ports::PaymentRecordRepository;
pub use rust_decimal::Decimal;
