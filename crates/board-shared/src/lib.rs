//! # Board Shared
//!
//! Wire contract of the board API: request and response DTOs, field limits,
//! and the standard response envelopes. Nothing in here knows about storage.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ApiResponse, ErrorResponse};
pub use validation::{Validate, ValidationErrors};
