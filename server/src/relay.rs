use crate::room::Room;
use std::collections::HashMap;
use system::{ServerMessage, SessionId};
use tokio::sync::mpsc::UnboundedSender;

pub type ConnectionTx = UnboundedSender<ServerMessage>;

/// Outbound queues of every live connection.
pub struct Relay {
    connection_txs: HashMap<SessionId, ConnectionTx>,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, session_id: SessionId, tx: ConnectionTx) {
        self.connection_txs.insert(session_id, tx);
    }

    pub fn remove(&mut self, session_id: &SessionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(session_id)
    }

    pub fn send(&self, to: &SessionId, message: ServerMessage) -> bool {
        if let Some(tx) = self.connection_txs.get(to) {
            if tx.send(message).is_ok() {
                return true;
            }
            log::warn!("Connection {} is closed, message dropped", to);
        } else {
            log::warn!("No connection for session {}", to);
        }
        false
    }

    /// Delivers `message` to every member of `room` except `without`.
    /// Returns how many deliveries succeeded.
    pub fn broadcast(
        &self,
        room: &Room,
        message: &ServerMessage,
        without: Option<&SessionId>,
    ) -> usize {
        room.members
            .iter()
            .filter(|member| without.map_or(true, |w| w != *member))
            .filter(|member| self.send(member, message.clone()))
            .count()
    }
}
