//! # Board Core
//!
//! The domain layer of the discussion board: members, posts and comments,
//! the repository and transaction ports, and the services that run each
//! board operation inside a single unit of work.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::{CommentService, PostService};
