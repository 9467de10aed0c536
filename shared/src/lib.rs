//! Shared types for Comanda
//!
//! Menu, cart, order, table and sale models, change events, error codes and
//! small utilities used by the engine and by whatever renders it.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use message::StateEvent;
