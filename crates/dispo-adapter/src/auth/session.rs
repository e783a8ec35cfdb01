/*
[INPUT]:  The signed-in user's identity and role
[OUTPUT]: Current-user queries for authorization decisions
[POS]:    Auth layer - in-memory session state
[UPDATE]: When session state gains new fields
*/

use std::sync::{Arc, RwLock};

use crate::types::SessionUser;

/// Thread-safe holder for the signed-in user.
///
/// This is the identity source for the checklist authorization guard, so it
/// lives beside the token store rather than in presentation state.
#[derive(Debug, Clone)]
pub struct Session {
    data: Arc<RwLock<Option<SessionUser>>>,
}

impl Session {
    /// Create a new signed-out session
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Record the signed-in user
    pub fn set_user(&self, user: SessionUser) {
        let mut guard = self.data.write().unwrap();
        *guard = Some(user);
    }

    /// Get the signed-in user if any
    pub fn current_user(&self) -> Option<SessionUser> {
        let guard = self.data.read().unwrap();
        guard.clone()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        let guard = self.data.read().unwrap();
        guard.is_some()
    }

    /// Clear the session
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
