//! # Board Migrations
//!
//! Schema for the `members`, `posts` and `comments` tables. Used by the
//! `migration` CLI and, with `RUN_MIGRATIONS=true`, by the server at startup.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_board_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_board_tables::Migration)]
    }
}
