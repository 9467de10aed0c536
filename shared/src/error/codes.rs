//! Error codes for the Comanda engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Session errors
//! - 4xxx: Order / cart errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so the UI layer can localise them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Session ====================
    /// No active session
    NotAuthenticated = 1001,
    /// Session has no role assigned
    RoleRequired = 1002,

    // ==================== 4xxx: Order ====================
    /// Cart is empty
    CartEmpty = 4007,
    /// Party size is zero
    PartySizeRequired = 4008,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    ProductNotFound = 6001,
    /// Menu item is out of stock
    ProductOutOfStock = 6003,
    /// Cart already holds every remaining unit
    ProductInsufficientStock = 6004,
    /// No menu source available
    MenuUnavailable = 6010,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is already free
    TableAlreadyEmpty = 7003,

    // ==================== 9xxx: System ====================
    /// Storage error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",

            ErrorCode::NotAuthenticated => "No active session",
            ErrorCode::RoleRequired => "Session has no role",

            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::PartySizeRequired => "Adults and children count is required",

            ErrorCode::ProductNotFound => "Menu item not found",
            ErrorCode::ProductOutOfStock => "Menu item is out of stock",
            ErrorCode::ProductInsufficientStock => "Not enough stock left for this item",
            ErrorCode::MenuUnavailable => "No menu source available",

            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableAlreadyEmpty => "Table is already free",

            ErrorCode::DatabaseError => "Storage error",
            ErrorCode::NetworkError => "Network error",
        }
    }

    /// Whether the condition is declinable by the user (never fatal)
    pub const fn is_user_declinable(&self) -> bool {
        matches!(self.code() / 1000, 4 | 6 | 7) && !matches!(self, ErrorCode::MenuUnavailable)
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::RoleRequired),

            4007 => Ok(ErrorCode::CartEmpty),
            4008 => Ok(ErrorCode::PartySizeRequired),

            6001 => Ok(ErrorCode::ProductNotFound),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6004 => Ok(ErrorCode::ProductInsufficientStock),
            6010 => Ok(ErrorCode::MenuUnavailable),

            7001 => Ok(ErrorCode::TableNotFound),
            7003 => Ok(ErrorCode::TableAlreadyEmpty),

            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
