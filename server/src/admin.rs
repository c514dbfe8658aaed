use crate::room::Room;
use crate::server_state::ServerError;
use serde::Serialize;
use system::{RoomId, SessionId};
use tokio::sync::oneshot::Sender;

#[derive(Debug)]
pub enum AdminCommand {
    ListRooms {
        tx: Sender<Vec<RoomDescription>>,
    },
    DescribeRoom {
        room_id: RoomId,
        tx: Sender<Result<RoomDescription, ServerError>>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDescription {
    pub room_id: RoomId,
    pub members: Vec<SessionId>,
    pub has_snapshot: bool,
}

impl RoomDescription {
    pub fn new(room_id: &RoomId, room: &Room) -> Self {
        let mut members: Vec<SessionId> = room.members.iter().cloned().collect();
        members.sort();
        Self {
            room_id: room_id.clone(),
            members,
            has_snapshot: room.snapshot.is_some(),
        }
    }
}
