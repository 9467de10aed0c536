use crate::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::models::ItemId;
use thiserror::Error;

/// Conditions the user can be told about and recover from.
///
/// Never fatal: the operation is rejected and state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Decline {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("no stock left for {name}")]
    OutOfStock { item_id: ItemId, name: String },

    #[error("only {available} units of {name} left in stock")]
    InsufficientStock {
        item_id: ItemId,
        name: String,
        available: i32,
    },

    #[error("empty cart")]
    EmptyCart,

    #[error("zero party size")]
    ZeroPartySize,

    #[error("unknown table {0}")]
    UnknownTable(u32),

    #[error("table {0} is not occupied")]
    TableNotOccupied(u32),
}

impl Decline {
    pub fn code(&self) -> ErrorCode {
        match self {
            Decline::ItemNotFound(_) => ErrorCode::ProductNotFound,
            Decline::OutOfStock { .. } => ErrorCode::ProductOutOfStock,
            Decline::InsufficientStock { .. } => ErrorCode::ProductInsufficientStock,
            Decline::EmptyCart => ErrorCode::CartEmpty,
            Decline::ZeroPartySize => ErrorCode::PartySizeRequired,
            Decline::UnknownTable(_) => ErrorCode::TableNotFound,
            Decline::TableNotOccupied(_) => ErrorCode::TableAlreadyEmpty,
        }
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Declined(#[from] Decline),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EngineError {
    pub fn is_declined(&self) -> bool {
        matches!(self, EngineError::Declined(_))
    }

    pub fn as_decline(&self) -> Option<&Decline> {
        match self {
            EngineError::Declined(d) => Some(d),
            EngineError::Storage(_) => None,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Declined(decline) => {
                let app = AppError::with_message(decline.code(), decline.to_string());
                match decline {
                    Decline::ItemNotFound(item_id)
                    | Decline::OutOfStock { item_id, .. } => app.with_detail("item_id", item_id),
                    Decline::InsufficientStock {
                        item_id, available, ..
                    } => app
                        .with_detail("item_id", item_id)
                        .with_detail("available", available),
                    Decline::UnknownTable(table_id) | Decline::TableNotOccupied(table_id) => {
                        app.with_detail("table_id", table_id)
                    }
                    Decline::EmptyCart | Decline::ZeroPartySize => app,
                }
            }
            EngineError::Storage(e) => {
                tracing::error!(error = %e, "Storage error occurred");
                AppError::database(e.to_string())
            }
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
