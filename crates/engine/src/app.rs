//! Application state and composition.

use chrono::Duration;
use std::sync::Arc;
use warband_domain::ItemCatalog;

use crate::config::{EngineConfig, StoreBackend};
use crate::facade::GameEngine;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    document::{InMemoryDocumentStore, SqliteDocumentStore},
    ports::{ClockPort, DocumentStore, RandomPort, RepoError},
};
use crate::repositories::EntityStore;
use crate::use_cases::{
    self,
    combat::{Attack, Heal},
    items::{ListItems, PickupItem},
    session::{CreateGame, JoinGame, ListRecentGames, ListUnits, DEFAULT_RECENT_WINDOW_HOURS},
    transaction::{RetryConfig, TransactionRetry},
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub engine: Arc<GameEngine>,
}

impl App {
    pub fn new(engine: Arc<GameEngine>) -> Self {
        Self { engine }
    }

    /// Open the configured store and wire the engine on system time and
    /// randomness.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, RepoError> {
        let store: Arc<dyn DocumentStore> = match &config.store {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory document store");
                Arc::new(InMemoryDocumentStore::new())
            }
            StoreBackend::Sqlite { path } => {
                tracing::info!(path = %path, "Opening SQLite document store");
                Arc::new(SqliteDocumentStore::new(path).await?)
            }
        };

        let ports = EnginePorts {
            store,
            clock: Arc::new(SystemClock::new()),
            random: Arc::new(SystemRandom::new()),
        };
        let options = EngineOptions {
            catalog: ItemCatalog::builtin(),
            retry: RetryConfig::default().with_max_attempts(config.tx_max_attempts),
            recent_games_window: config.recent_games_window,
        };
        Ok(Self::new(Arc::new(GameEngine::new(ports, options))))
    }
}

/// The external collaborators every operation runs against.
#[derive(Clone)]
pub struct EnginePorts {
    pub store: Arc<dyn DocumentStore>,
    pub clock: Arc<dyn ClockPort>,
    pub random: Arc<dyn RandomPort>,
}

/// Tunables that are not ports.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub catalog: ItemCatalog,
    pub retry: RetryConfig,
    pub recent_games_window: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            catalog: ItemCatalog::builtin(),
            retry: RetryConfig::default(),
            recent_games_window: Duration::hours(DEFAULT_RECENT_WINDOW_HOURS),
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub session: use_cases::SessionUseCases,
    pub combat: use_cases::CombatUseCases,
    pub items: use_cases::ItemUseCases,
}

impl UseCases {
    pub fn new(ports: EnginePorts, options: EngineOptions) -> Self {
        let store = Arc::new(EntityStore::new(ports.store));
        let retry = TransactionRetry::new(options.retry);
        let catalog = Arc::new(options.catalog);

        let session = use_cases::SessionUseCases::new(
            Arc::new(CreateGame::new(store.clone(), ports.clock.clone())),
            Arc::new(JoinGame::new(
                store.clone(),
                ports.clock.clone(),
                retry.clone(),
            )),
            Arc::new(ListRecentGames::new(
                store.clone(),
                ports.clock.clone(),
                options.recent_games_window,
            )),
            Arc::new(ListUnits::new(store.clone())),
        );

        let combat = use_cases::CombatUseCases::new(
            Arc::new(Attack::new(
                store.clone(),
                ports.random.clone(),
                retry.clone(),
            )),
            Arc::new(Heal::new(store.clone(), ports.random.clone(), retry.clone())),
        );

        let items = use_cases::ItemUseCases::new(
            Arc::new(PickupItem::new(store, catalog.clone(), retry)),
            Arc::new(ListItems::new(catalog)),
        );

        Self {
            session,
            combat,
            items,
        }
    }
}
