use crate::registry::{RoomRegistry, RoomStore};
use crate::session::{SessionIndex, SessionState};
use std::fmt;
use system::{RoomId, SessionId, WhiteboardData};

pub struct ServerState<S: RoomStore = RoomRegistry> {
    pub rooms: S,
    pub sessions: SessionIndex,
}

/// Failures of introspection queries answered by the broker.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerError {
    RoomNotFound(RoomId),
    BrokerUnavailable,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServerError::RoomNotFound(_) => write!(f, "room not found"),
            ServerError::BrokerUnavailable => write!(f, "broker unavailable"),
        }
    }
}

impl std::error::Error for ServerError {}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinError {
    UnknownSession,
    InAnotherRoom(RoomId),
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JoinError::UnknownSession => write!(f, "unknown session"),
            JoinError::InAnotherRoom(room_id) => write!(f, "already in room {}", room_id),
        }
    }
}

impl std::error::Error for JoinError {}

impl ServerState<RoomRegistry> {
    pub fn new() -> Self {
        Self::with_store(RoomRegistry::new())
    }
}

impl<S: RoomStore> ServerState<S> {
    pub fn with_store(rooms: S) -> Self {
        Self {
            rooms,
            sessions: SessionIndex::new(),
        }
    }

    pub fn create_session(&mut self, session_id: SessionId) {
        self.sessions.insert(session_id);
    }

    /// Puts the session into the room, creating the room if needed.
    ///
    /// The session must not be in a different room. Returns false when it
    /// already was a member.
    pub fn join_room(
        &mut self,
        session_id: &SessionId,
        room_id: &RoomId,
    ) -> Result<bool, JoinError> {
        match self.sessions.state(session_id) {
            None => return Err(JoinError::UnknownSession),
            Some(SessionState::Joined(current)) if current != room_id => {
                return Err(JoinError::InAnotherRoom(current.clone()))
            }
            Some(_) => (),
        }
        let inserted = self.rooms.ensure(room_id).members.insert(*session_id);
        self.sessions
            .set(session_id, SessionState::Joined(room_id.clone()));
        if inserted {
            log::info!("Session {} joined room {}", session_id, room_id);
        }
        Ok(inserted)
    }

    /// Takes the session out of the room and drops the room once empty.
    /// Returns false if the session wasn't a member.
    pub fn leave_room(&mut self, session_id: &SessionId, room_id: &RoomId) -> bool {
        let removed = self
            .rooms
            .get_mut(room_id)
            .map_or(false, |room| room.members.remove(session_id));
        if self.sessions.room_of(session_id) == Some(room_id) {
            self.sessions.set(session_id, SessionState::Unjoined);
        }
        if removed {
            log::info!("Session {} left room {}", session_id, room_id);
            self.rooms.remove_if_empty(room_id);
        }
        removed
    }

    /// Overwrites the snapshot of the session's room, returning that room.
    pub fn store_snapshot(
        &mut self,
        session_id: &SessionId,
        data: WhiteboardData,
    ) -> Option<RoomId> {
        let room_id = self.sessions.room_of(session_id)?.clone();
        let room = self.rooms.get_mut(&room_id)?;
        room.snapshot = Some(data);
        Some(room_id)
    }

    /// Forgets the session, returning the room it was removed from.
    pub fn disconnect(&mut self, session_id: &SessionId) -> Option<RoomId> {
        let current = self.sessions.room_of(session_id).cloned();
        let left = current.filter(|room_id| self.leave_room(session_id, room_id));
        self.sessions.remove(session_id);
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use system::new_session_id;

    fn room(id: &str) -> RoomId {
        id.to_string()
    }

    #[test]
    fn it_creates_room_on_first_join() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);

        assert_eq!(state.join_room(&session_id, &room("room1")), Ok(true));
        assert!(state
            .rooms
            .get(&room("room1"))
            .expect("")
            .members
            .contains(&session_id));
        assert_eq!(state.sessions.room_of(&session_id), Some(&room("room1")));
    }

    #[test]
    fn it_treats_rejoin_as_noop() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);

        state.join_room(&session_id, &room("room1")).expect("");
        assert_eq!(state.join_room(&session_id, &room("room1")), Ok(false));
        assert_eq!(state.rooms.get(&room("room1")).expect("").members.len(), 1);
    }

    #[test]
    fn it_refuses_second_room_and_unknown_session() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);
        state.join_room(&session_id, &room("room1")).expect("");

        assert_eq!(
            state.join_room(&session_id, &room("room2")),
            Err(JoinError::InAnotherRoom(room("room1")))
        );
        assert!(state.rooms.get(&room("room2")).is_none());
        assert_eq!(
            state.join_room(&new_session_id(), &room("room1")),
            Err(JoinError::UnknownSession)
        );
    }

    #[test]
    fn it_remove_room_when_all_sessions_leave() {
        let mut state = ServerState::new();
        let (a, b) = (new_session_id(), new_session_id());
        state.create_session(a);
        state.create_session(b);
        state.join_room(&a, &room("room1")).expect("");
        state.join_room(&b, &room("room1")).expect("");

        assert!(state.leave_room(&a, &room("room1")));
        assert!(state.rooms.get(&room("room1")).is_some());
        assert!(state.leave_room(&b, &room("room1")));
        assert!(state.rooms.get(&room("room1")).is_none());
        assert_eq!(state.sessions.state(&b), Some(&SessionState::Unjoined));
    }

    #[test]
    fn it_ignores_leave_without_join() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);

        assert!(!state.leave_room(&session_id, &room("room1")));
        assert!(state.rooms.get(&room("room1")).is_none());
    }

    #[test]
    fn it_drops_snapshot_from_unjoined_session() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);

        let data = WhiteboardData::new("1", vec![], "white");
        assert_eq!(state.store_snapshot(&session_id, data), None);
    }

    #[test]
    fn it_keeps_only_last_snapshot() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);
        state.join_room(&session_id, &room("room1")).expect("");

        let first = WhiteboardData::new("1", vec![], "white");
        let second = WhiteboardData::new("2", vec![], "black");
        state.store_snapshot(&session_id, first);
        state.store_snapshot(&session_id, second.clone());

        let stored = state.rooms.get(&room("room1")).expect("").snapshot.clone();
        assert_eq!(stored, Some(second));
    }

    #[test]
    fn it_forgets_session_on_disconnect() {
        let mut state = ServerState::new();
        let session_id = new_session_id();
        state.create_session(session_id);
        state.join_room(&session_id, &room("room1")).expect("");

        assert_eq!(state.disconnect(&session_id), Some(room("room1")));
        assert!(state.rooms.get(&room("room1")).is_none());
        assert!(!state.sessions.contains(&session_id));
        assert_eq!(state.disconnect(&session_id), None);
    }
}
