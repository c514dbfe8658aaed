use crate::room::Room;
use std::collections::HashMap;
use system::RoomId;

/// Storage for rooms keyed by their identifier.
///
/// A room exists only while somebody is in it: callers create rooms through
/// `ensure` and must call `remove_if_empty` after taking a member out.
pub trait RoomStore {
    fn ensure(&mut self, room_id: &RoomId) -> &mut Room;
    fn get(&self, room_id: &RoomId) -> Option<&Room>;
    fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room>;
    /// Returns true if the room was deleted.
    fn remove_if_empty(&mut self, room_id: &RoomId) -> bool;
    fn room_ids(&self) -> Vec<RoomId>;
}

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomStore for RoomRegistry {
    fn ensure(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            log::info!("Room {} created", room_id);
            Room::new()
        })
    }

    fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    fn remove_if_empty(&mut self, room_id: &RoomId) -> bool {
        if self.rooms.get(room_id).map_or(false, |r| r.is_empty()) {
            self.rooms.remove(room_id);
            log::info!("Room {} removed", room_id);
            true
        } else {
            false
        }
    }

    fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.keys().cloned().collect();
        ids.sort();
        ids
    }
}
