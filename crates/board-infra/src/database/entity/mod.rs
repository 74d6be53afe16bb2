//! SeaORM entities for the board tables.

pub mod comment;
pub mod member;
pub mod post;
