//! Application state - shared across all handlers.

use std::sync::Arc;

use board_core::ports::TransactionManager;
use board_core::{CommentService, PostService};
use board_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use board_infra::{BoardDatabase, DatabaseConfig};

use crate::config::AppConfig;

/// Which store the services run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub comments: CommentService,
    pub backend: StoreBackend,
    #[cfg(feature = "postgres")]
    pub db: Option<BoardDatabase>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or it cannot be reached.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match connect(db_config, config.run_migrations).await {
                    Ok(db) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(db);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {:#}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        }

        tracing::info!("Application state initialized (memory)");
        Self::in_memory()
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_transactions(Arc::new(InMemoryStore::new()), StoreBackend::Memory)
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: BoardDatabase) -> Self {
        let mut state =
            Self::with_transactions(Arc::new(db.transactions()), StoreBackend::Postgres);
        state.db = Some(db);
        state
    }

    fn with_transactions(
        transactions: Arc<dyn TransactionManager>,
        backend: StoreBackend,
    ) -> Self {
        Self {
            posts: PostService::new(Arc::clone(&transactions)),
            comments: CommentService::new(transactions),
            backend,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect(config: &DatabaseConfig, run_migrations: bool) -> anyhow::Result<BoardDatabase> {
    use migration::MigratorTrait;

    let db = BoardDatabase::init(config).await?;
    if run_migrations {
        tracing::info!("Applying pending migrations");
        migration::Migrator::up(db.conn.as_ref(), None).await?;
    }
    Ok(db)
}
