use std::collections::HashMap;
use system::{RoomId, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unjoined,
    Joined(RoomId),
}

/// Where every connected session currently is.
#[derive(Debug, Default)]
pub struct SessionIndex {
    sessions: HashMap<SessionId, SessionState>,
}

impl SessionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session_id: SessionId) {
        self.sessions.insert(session_id, SessionState::Unjoined);
    }

    pub fn remove(&mut self, session_id: &SessionId) -> Option<SessionState> {
        self.sessions.remove(session_id)
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn state(&self, session_id: &SessionId) -> Option<&SessionState> {
        self.sessions.get(session_id)
    }

    pub fn room_of(&self, session_id: &SessionId) -> Option<&RoomId> {
        match self.sessions.get(session_id) {
            Some(SessionState::Joined(room_id)) => Some(room_id),
            _ => None,
        }
    }

    /// Returns false if the session is unknown.
    pub fn set(&mut self, session_id: &SessionId, state: SessionState) -> bool {
        self.sessions
            .get_mut(session_id)
            .map(|s| *s = state)
            .is_some()
    }
}
