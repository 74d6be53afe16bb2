//! Migration CLI for the board database.
//!
//! Reads `DATABASE_URL` (or `.env`) and runs `up`, `down`, `status`, `fresh`
//! and friends against it.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info,sea_orm_migration=info")
        .init();

    cli::run_cli(migration::Migrator).await;
}
