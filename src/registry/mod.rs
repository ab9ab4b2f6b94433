mod conflict;
mod error;
mod mutations;
mod queries;

pub use error::RegistryError;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::catalog::RoomCatalog;
use crate::model::{RoomId, RoomState};

pub type SharedRoomState = Arc<RwLock<RoomState>>;

/// Owns one `RoomState` per catalog room. The room set is fixed at
/// construction; every admission goes through that room's write lock, so
/// writers on different rooms never contend.
pub struct Registry {
    rooms: DashMap<RoomId, SharedRoomState>,
}

impl Registry {
    /// Build the registry from an already-validated catalog, one room per
    /// catalog entry.
    pub fn new(catalog: &RoomCatalog) -> Self {
        let rooms = DashMap::new();
        for id in catalog.rooms() {
            rooms.insert(id.clone(), Arc::new(RwLock::new(RoomState::new(id))));
        }
        Self { rooms }
    }

    fn get_room(&self, id: &RoomId) -> Option<SharedRoomState> {
        self.rooms.get(id).map(|e| e.value().clone())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
