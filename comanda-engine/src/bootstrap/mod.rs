//! Startup: menu acquisition and state replay
//!
//! ```text
//! Bootstrap::run()
//!     ├─ 1. Persisted menu (storage key `menu`)
//!     ├─ 2. Remote fetch   (MenuFetcher, when configured)
//!     ├─ 3. Bundled menu   (assets/default_menu.json)
//!     │     none of them → BootError::NoMenuSource
//!     ├─ 4. Persist the winner unless it came from storage
//!     ├─ 5. Replay orders / tables / sales → PosEngine
//!     └─ 6. Broadcast menu-loaded, flip readiness
//! ```
//!
//! No engine exists until a menu does, so nothing can operate on an empty
//! menu.

mod fetcher;

pub use fetcher::{FetchError, HttpMenuFetcher, MenuFetcher};

use crate::engine::{EVENT_CHANNEL_CAPACITY, EngineError, EngineSettings, PosEngine};
use crate::storage::{KEY_MENU, StateStorage, StorageError};
use shared::StateEvent;
use shared::error::{AppError, ErrorCode};
use shared::models::Menu;
use thiserror::Error;
use tokio::sync::{broadcast, watch};

/// Menu shipped with the binary
pub const DEFAULT_MENU_JSON: &str = include_str!("../../assets/default_menu.json");

/// Where the active menu came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    Persisted,
    Remote,
    Bundled,
}

impl std::fmt::Display for MenuOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MenuOrigin::Persisted => "persisted",
            MenuOrigin::Remote => "remote",
            MenuOrigin::Bundled => "bundled",
        })
    }
}

/// Fatal startup errors
#[derive(Debug, Error)]
pub enum BootError {
    #[error("no menu source available: nothing persisted, remote fetch failed, no usable bundled menu")]
    NoMenuSource,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl From<BootError> for AppError {
    fn from(err: BootError) -> Self {
        let message = err.to_string();
        match err {
            BootError::NoMenuSource => AppError::with_message(ErrorCode::MenuUnavailable, message),
            BootError::Storage(e) => AppError::database(e.to_string()),
            BootError::Engine(e) => e.into(),
        }
    }
}

/// Readiness signal, true once the menu is loaded and state replayed
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until ready. Returns false if bootstrap was dropped or failed
    /// before getting there.
    pub async fn wait(&mut self) -> bool {
        self.rx.wait_for(|ready| *ready).await.is_ok()
    }
}

/// One-shot startup sequence
pub struct Bootstrap {
    storage: StateStorage,
    settings: EngineSettings,
    fetcher: Option<Box<dyn MenuFetcher>>,
    bundled: Option<String>,
    ready_tx: watch::Sender<bool>,
    event_tx: broadcast::Sender<StateEvent>,
}

impl Bootstrap {
    pub fn new(storage: StateStorage, settings: EngineSettings) -> Self {
        let (ready_tx, _) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            settings,
            fetcher: None,
            bundled: None,
            ready_tx,
            event_tx,
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl MenuFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Last-resort menu document (normally [`DEFAULT_MENU_JSON`])
    pub fn with_bundled_menu(mut self, json: impl Into<String>) -> Self {
        self.bundled = Some(json.into());
        self
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            rx: self.ready_tx.subscribe(),
        }
    }

    /// Subscribe before [`run`](Self::run) to observe `menu-loaded`
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    pub async fn run(self) -> Result<(PosEngine, MenuOrigin), BootError> {
        let (menu, origin) = self.acquire_menu().await?;

        if origin != MenuOrigin::Persisted {
            self.storage.save_json(KEY_MENU, &menu)?;
        }

        tracing::info!(
            origin = %origin,
            categories = menu.categories.len(),
            items = menu.item_count(),
            "Menu loaded"
        );

        let engine = PosEngine::replay(menu, self.storage, self.settings, self.event_tx.clone())?;

        let _ = self.event_tx.send(StateEvent::MenuLoaded);
        self.ready_tx.send_replace(true);
        Ok((engine, origin))
    }

    async fn acquire_menu(&self) -> Result<(Menu, MenuOrigin), BootError> {
        if let Some(menu) = self.storage.load_json::<Menu>(KEY_MENU)? {
            return Ok((menu, MenuOrigin::Persisted));
        }

        if let Some(fetcher) = &self.fetcher {
            match fetcher.fetch().await {
                Ok(menu) => return Ok((menu, MenuOrigin::Remote)),
                Err(e) => tracing::warn!(error = %e, "Remote menu fetch failed, using bundled menu"),
            }
        }

        if let Some(json) = &self.bundled {
            match serde_json::from_str::<Menu>(json) {
                Ok(menu) => return Ok((menu, MenuOrigin::Bundled)),
                Err(e) => tracing::error!(error = %e, "Bundled menu is not valid"),
            }
        }

        tracing::error!("No menu source available");
        Err(BootError::NoMenuSource)
    }
}
