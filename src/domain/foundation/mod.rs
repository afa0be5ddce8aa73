//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the memorial domain.

mod errors;
mod ids;
mod money;
mod percentage;
mod service_code;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ServiceItemId;
pub use money::{format_decimal_br, parse_decimal_br, round2, Money};
pub use percentage::Percentage;
pub use service_code::ServiceCode;
pub use timestamp::Timestamp;
