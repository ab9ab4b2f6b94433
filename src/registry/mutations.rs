use ulid::Ulid;

use crate::limits::*;
use crate::model::{Booking, Ms, RoomId, Span};

use super::conflict::{check_no_conflict, validate_span};
use super::{Registry, RegistryError};

impl Registry {
    /// Admit a booking iff the requested span conflicts with nothing already
    /// admitted for that room. The conflict check and the append run under
    /// the room's write lock — two overlapping requests can never both win,
    /// no matter how they interleave.
    pub async fn request_booking(
        &self,
        building: &str,
        number: &str,
        requester: &str,
        start: Ms,
        end: Ms,
    ) -> Result<Booking, RegistryError> {
        let requester = requester.trim();
        if requester.is_empty() {
            return Err(RegistryError::InvalidInput("requester must not be blank"));
        }
        if requester.len() > MAX_REQUESTER_LEN {
            return Err(RegistryError::LimitExceeded("requester name too long"));
        }

        let room_id = RoomId::new(building, number);
        let room = self
            .get_room(&room_id)
            .ok_or(RegistryError::UnknownRoom(room_id))?;

        if end <= start {
            return Err(RegistryError::InvalidInterval { start, end });
        }
        let span = Span::new(start, end);
        validate_span(&span)?;

        let mut guard = room.write().await;
        if guard.bookings.len() >= MAX_BOOKINGS_PER_ROOM {
            return Err(RegistryError::LimitExceeded("too many bookings in room"));
        }
        check_no_conflict(&guard, &span)?;

        let booking = Booking {
            id: Ulid::new(),
            requester: requester.to_string(),
            span,
        };
        guard.insert_booking(booking.clone());
        Ok(booking)
    }
}
