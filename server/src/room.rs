use std::collections::HashSet;
use system::{SessionId, WhiteboardData};

#[derive(Debug, Default)]
pub struct Room {
    pub members: HashSet<SessionId>,
    pub snapshot: Option<WhiteboardData>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
