//! Operator session gate
//!
//! A session is a persisted [`SessionRecord`]; holding one with a role is all
//! the protected views require. Credential checks happen elsewhere.

use crate::storage::{KEY_SESSION, StateStorage};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::SessionRecord;

#[derive(Debug, Clone)]
pub struct SessionGate {
    storage: StateStorage,
}

impl SessionGate {
    pub fn new(storage: StateStorage) -> Self {
        Self { storage }
    }

    /// Record a login, replacing any previous session
    pub fn login(&self, user: &str, role: &str) -> AppResult<SessionRecord> {
        let user = user.trim();
        if user.is_empty() {
            return Err(AppError::validation("user is required"));
        }
        let record = SessionRecord {
            user: user.to_string(),
            role: role.trim().to_string(),
            timestamp: shared::util::now_millis(),
        };
        self.storage
            .save_json(KEY_SESSION, &record)
            .map_err(|e| AppError::database(e.to_string()))?;
        tracing::info!(target: "audit", user = %record.user, role = %record.role, "Session started");
        Ok(record)
    }

    pub fn logout(&self) -> AppResult<()> {
        let existed = self
            .storage
            .remove(KEY_SESSION)
            .map_err(|e| AppError::database(e.to_string()))?;
        if existed {
            tracing::info!(target: "audit", "Session ended");
        }
        Ok(())
    }

    pub fn current(&self) -> AppResult<Option<SessionRecord>> {
        self.storage
            .load_json(KEY_SESSION)
            .map_err(|e| AppError::database(e.to_string()))
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.current(), Ok(Some(record)) if record.is_authorized())
    }

    /// Session guarding a protected view
    pub fn require(&self) -> AppResult<SessionRecord> {
        let record = self.current()?.ok_or_else(AppError::not_authenticated)?;
        if !record.is_authorized() {
            return Err(AppError::new(ErrorCode::RoleRequired).with_detail("user", record.user));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate {
        SessionGate::new(StateStorage::open_in_memory().unwrap())
    }

    #[test]
    fn test_no_session() {
        let gate = gate();
        assert!(gate.current().unwrap().is_none());
        assert!(!gate.is_authorized());
        assert_eq!(gate.require().unwrap_err().code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_login_logout() {
        let gate = gate();
        let record = gate.login(" lucia ", "cashier").unwrap();
        assert_eq!(record.user, "lucia");
        assert!(gate.is_authorized());
        assert_eq!(gate.require().unwrap(), record);

        gate.logout().unwrap();
        assert!(!gate.is_authorized());
        gate.logout().unwrap();
    }

    #[test]
    fn test_session_without_role() {
        let gate = gate();
        gate.login("mozo", "  ").unwrap();
        assert!(!gate.is_authorized());
        assert_eq!(gate.require().unwrap_err().code, ErrorCode::RoleRequired);
    }

    #[test]
    fn test_empty_user_rejected() {
        let gate = gate();
        assert_eq!(gate.login("", "admin").unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_malformed_session_is_absent() {
        let storage = StateStorage::open_in_memory().unwrap();
        storage.put_blob(KEY_SESSION, b"\"admin\"").unwrap();
        let gate = SessionGate::new(storage);
        assert!(gate.current().unwrap().is_none());
    }
}
