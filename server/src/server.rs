use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use system::{ClientMessage, RoomId, ServerMessage, SessionId, WhiteboardData};

use crate::admin::{AdminCommand, RoomDescription};
use crate::registry::RoomStore;
pub use crate::relay::ConnectionTx;
use crate::relay::Relay;
use crate::server_state::ServerState;
pub use crate::server_state::ServerError;

pub type ServerTx = UnboundedSender<ServerCommand>;

#[derive(Debug)]
pub enum ServerCommand {
    Connect {
        session_id: SessionId,
        tx: ConnectionTx,
    },
    Disconnect {
        from: SessionId,
    },
    ClientMessage {
        from: SessionId,
        message: ClientMessage,
    },
    AdminCommand(AdminCommand),
}

/// Owns every room and session. Commands are handled one at a time and
/// each runs to completion, so no locking is involved.
pub struct Server {
    server_state: ServerState,
    relay: Relay,
}

impl Server {
    pub fn new() -> Self {
        Self {
            server_state: ServerState::new(),
            relay: Relay::new(),
        }
    }

    pub fn handle_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connect { session_id, tx } => {
                log::info!("Session {} connected", session_id);
                self.server_state.create_session(session_id);
                self.relay.insert(session_id, tx);
                self.relay
                    .send(&session_id, ServerMessage::Connected(session_id));
            }
            ServerCommand::Disconnect { from } => self.disconnect(&from),
            ServerCommand::ClientMessage { from, message } => {
                if !self.server_state.sessions.contains(&from) {
                    log::warn!("Message from unknown session {} dropped", from);
                    return;
                }
                match message {
                    ClientMessage::JoinRoom(room_id) => self.join_room(&from, &room_id),
                    ClientMessage::LeaveRoom(room_id) => self.leave_room(&from, &room_id),
                    ClientMessage::WhiteboardChange(data) => self.change_whiteboard(&from, data),
                }
            }
            ServerCommand::AdminCommand(command) => self.handle_admin_command(command),
        }
    }

    fn join_room(&mut self, from: &SessionId, room_id: &RoomId) {
        if let Some(current) = self.server_state.sessions.room_of(from).cloned() {
            if &current != room_id {
                self.leave_room(from, &current);
            }
        }

        if let Err(err) = self.server_state.join_room(from, room_id) {
            log::warn!("Session {} cannot join room {}: {}", from, room_id, err);
            return;
        }

        if let Some(room) = self.server_state.rooms.get(room_id) {
            if let Some(snapshot) = &room.snapshot {
                self.relay
                    .send(from, ServerMessage::WhiteboardState(snapshot.clone()));
            }
            self.relay
                .broadcast(room, &ServerMessage::UserJoined(*from), Some(from));
        }
    }

    fn leave_room(&mut self, from: &SessionId, room_id: &RoomId) {
        if self.server_state.leave_room(from, room_id) {
            self.broadcast(room_id, ServerMessage::UserLeft(*from), Some(from));
        } else {
            log::debug!("Session {} is not in room {}", from, room_id);
        }
    }

    fn change_whiteboard(&mut self, from: &SessionId, data: WhiteboardData) {
        let message = ServerMessage::WhiteboardChange(data.clone());
        match self.server_state.store_snapshot(from, data) {
            Some(room_id) => {
                let delivered = self.broadcast(&room_id, message, Some(from));
                log::debug!(
                    "Whiteboard of room {} replaced by {}, relayed to {}",
                    room_id,
                    from,
                    delivered
                );
            }
            None => log::debug!("Session {} is not in any room, change dropped", from),
        }
    }

    fn disconnect(&mut self, from: &SessionId) {
        if self.relay.remove(from).is_none() {
            return;
        }
        log::info!("Session {} disconnected", from);
        if let Some(room_id) = self.server_state.disconnect(from) {
            self.broadcast(&room_id, ServerMessage::UserLeft(*from), Some(from));
        }
    }

    fn broadcast(
        &self,
        room_id: &RoomId,
        message: ServerMessage,
        without: Option<&SessionId>,
    ) -> usize {
        self.server_state
            .rooms
            .get(room_id)
            .map_or(0, |room| self.relay.broadcast(room, &message, without))
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        let rooms = &self.server_state.rooms;
        match command {
            AdminCommand::ListRooms { tx } => {
                let descriptions = rooms
                    .room_ids()
                    .iter()
                    .filter_map(|id| rooms.get(id).map(|room| RoomDescription::new(id, room)))
                    .collect();
                let _ = tx.send(descriptions);
            }
            AdminCommand::DescribeRoom { room_id, tx } => {
                let result = rooms
                    .get(&room_id)
                    .map(|room| RoomDescription::new(&room_id, room))
                    .ok_or_else(|| ServerError::RoomNotFound(room_id.clone()));
                let _ = tx.send(result);
            }
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = unbounded_channel::<ServerCommand>();

    tokio::spawn(async move {
        let mut server = Box::new(Server::new());

        while let Some(command) = srv_rx.recv().await {
            server.handle_command(command);
        }
        log::info!("Server terminated");
    });

    srv_tx
}
