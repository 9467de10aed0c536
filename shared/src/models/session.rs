//! Session Model

use serde::{Deserialize, Serialize};

/// Logged-in operator record guarding the protected views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub user: String,
    #[serde(default)]
    pub role: String,
    /// Unix millis of login
    pub timestamp: i64,
}

impl SessionRecord {
    /// Having a role is all the authorisation the engine checks
    pub fn is_authorized(&self) -> bool {
        !self.role.trim().is_empty()
    }
}
