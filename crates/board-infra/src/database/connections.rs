use std::time::Duration;

#[cfg(feature = "postgres")]
use std::sync::Arc;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

#[cfg(feature = "postgres")]
use super::transaction::SeaTransactionManager;

/// Configuration for the board database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub sql_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
            sql_logging: false,
        }
    }
}

/// Pooled connection to the board database.
///
/// # Example
/// ```ignore
/// let db = BoardDatabase::init(&config).await?;
/// let posts = PostService::new(Arc::new(db.transactions()));
/// ```
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct BoardDatabase {
    pub conn: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl BoardDatabase {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sql_logging)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Transaction manager over this pool.
    pub fn transactions(&self) -> SeaTransactionManager {
        SeaTransactionManager::new(Arc::clone(&self.conn))
    }

    /// Round-trip to the server; used by the health check.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
