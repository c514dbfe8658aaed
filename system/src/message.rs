use crate::{RoomId, SessionId, WhiteboardData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Messages a participant sends to the broker.
///
/// On the wire every message is a JSON object `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom(RoomId),
    LeaveRoom(RoomId),
    WhiteboardChange(WhiteboardData),
}

/// Messages the broker sends to a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Identity assigned to the receiving connection.
    Connected(SessionId),
    /// Someone else in the room replaced the whiteboard.
    WhiteboardChange(WhiteboardData),
    /// Stored whiteboard of the room just joined. Only sent to the joiner.
    WhiteboardState(WhiteboardData),
    UserJoined(SessionId),
    UserLeft(SessionId),
}

#[derive(Debug)]
pub struct CodecError(serde_json::Error);

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed message: {}", self.0)
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text).map_err(CodecError)
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError)
    }
}

impl ServerMessage {
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text).map_err(CodecError)
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError)
    }
}
