//! Application state - shared across all handlers.

use std::sync::Arc;

use bloglist_core::ports::{BlogRepository, PasswordService, TokenService, UserRepository};
use bloglist_core::services::{BlogService, OwnershipPolicy, UserService};
use bloglist_infra::{Argon2PasswordService, InMemoryStore};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use bloglist_infra::{PostgresBlogRepository, PostgresUserRepository, database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<BlogService>,
    pub users: Arc<UserService>,
    /// Which store backs the services, for the health endpoint.
    pub storage: &'static str,
}

type Stores = (Arc<dyn BlogRepository>, Arc<dyn UserRepository>, &'static str);

fn in_memory() -> Stores {
    let store = Arc::new(InMemoryStore::new());
    let blogs: Arc<dyn BlogRepository> = store.clone();
    let users: Arc<dyn UserRepository> = store;
    (blogs, users, "memory")
}

impl AppState {
    /// Wire services onto explicit store handles.
    pub fn with_stores(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        ownership: OwnershipPolicy,
        storage: &'static str,
    ) -> Self {
        Self {
            blogs: Arc::new(BlogService::new(blogs, users.clone(), ownership)),
            users: Arc::new(UserService::new(users, passwords, tokens)),
            storage,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig, tokens: Arc<dyn TokenService>) -> Self {
        #[cfg(feature = "postgres")]
        let (blogs, users, storage): Stores = {
            if let Some(db_config) = &config.database {
                match database::connect(db_config).await {
                    Ok(conn) => {
                        let blogs: Arc<dyn BlogRepository> =
                            Arc::new(PostgresBlogRepository::new(conn.clone()));
                        let users: Arc<dyn UserRepository> =
                            Arc::new(PostgresUserRepository::new(conn));
                        (blogs, users, "postgres")
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        in_memory()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (blogs, users, storage): Stores = {
            tracing::info!("Running without postgres feature - using in-memory store");
            in_memory()
        };

        if config.ownership == OwnershipPolicy::Open {
            tracing::warn!("Ownership checks disabled: any caller may update or delete any blog");
        }

        tracing::info!(storage, "Application state initialized");

        Self::with_stores(
            blogs,
            users,
            Arc::new(Argon2PasswordService::new()),
            tokens,
            config.ownership,
            storage,
        )
    }
}
