use ulid::Ulid;

use crate::model::{Ms, RoomId};

#[derive(Debug)]
pub enum RegistryError {
    InvalidInput(&'static str),
    UnknownRoom(RoomId),
    InvalidInterval { start: Ms, end: Ms },
    RoomUnavailable(Ulid),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            RegistryError::UnknownRoom(id) => write!(f, "unknown room: {id}"),
            RegistryError::InvalidInterval { start, end } => {
                write!(f, "invalid interval: end {end} is not after start {start}")
            }
            RegistryError::RoomUnavailable(id) => {
                write!(f, "room unavailable: conflicts with booking {id}")
            }
            RegistryError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}
