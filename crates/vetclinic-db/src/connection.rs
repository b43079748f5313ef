//! SurrealDB connection management.

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database host name or address.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Full endpoint override (e.g. `mem://` for an embedded in-memory
    /// instance). When set, `host` and `port` are ignored.
    pub url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            username: "root".into(),
            password: "root".into(),
            namespace: "vetclinic".into(),
            database: "main".into(),
            url: None,
        }
    }
}

impl DbConfig {
    /// Endpoint handed to the SurrealDB client.
    pub fn endpoint(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("ws://{}:{}", self.host, self.port),
        }
    }

    /// Embedded engines run without root credentials.
    pub fn is_embedded(&self) -> bool {
        let endpoint = self.endpoint();
        endpoint == "memory" || endpoint.starts_with("mem://")
    }
}

/// Owns the process-wide SurrealDB handle.
///
/// Opened once at startup; repositories receive clones from
/// [`DbManager::client`], which share the same underlying connection.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Any>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root (remote engines only), selects the
    /// configured namespace and database, and returns a ready-to-use
    /// manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let endpoint = config.endpoint();
        info!(
            endpoint = %endpoint,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = any::connect(endpoint).await?;

        if !config.is_embedded() {
            db.signin(Root {
                username: config.username.clone(),
                password: config.password.clone(),
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a handle sharing the underlying connection.
    pub fn client(&self) -> Surreal<Any> {
        self.db.clone()
    }

    /// Release the connection at shutdown.
    pub fn close(self) {
        info!("Closing SurrealDB connection");
        drop(self.db);
    }
}
