use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type SessionId = uuid::Uuid;
pub type RoomId = String;

pub fn new_session_id() -> SessionId {
    uuid::Uuid::new_v4()
}

/// Full state of a shared whiteboard as produced by the drawing client.
///
/// The broker never looks inside: `objects` are kept as raw JSON values and
/// any top-level field besides the three known ones survives in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardData {
    pub version: String,
    pub objects: Vec<Value>,
    pub background: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WhiteboardData {
    pub fn new(version: &str, objects: Vec<Value>, background: &str) -> Self {
        Self {
            version: version.to_owned(),
            objects,
            background: background.to_owned(),
            extra: Map::new(),
        }
    }
}
