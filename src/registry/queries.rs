use crate::model::{Booking, Ms, RoomId, Span};

use super::conflict::{check_no_conflict, validate_span};
use super::{Registry, RegistryError};

impl Registry {
    /// Read-only snapshot of a room's bookings, ordered by start time
    /// ascending. Sees either the pre- or post-state of any in-flight
    /// admission, never a torn read.
    pub async fn get_bookings(
        &self,
        building: &str,
        number: &str,
    ) -> Result<Vec<Booking>, RegistryError> {
        let room_id = RoomId::new(building, number);
        let room = self
            .get_room(&room_id)
            .ok_or(RegistryError::UnknownRoom(room_id))?;
        let guard = room.read().await;
        Ok(guard.bookings.clone())
    }

    /// True iff the span would be admitted right now. Pure query — the
    /// answer can be stale by the time a booking is attempted; only
    /// `request_booking` decides admission.
    pub async fn is_available(
        &self,
        building: &str,
        number: &str,
        start: Ms,
        end: Ms,
    ) -> Result<bool, RegistryError> {
        let room_id = RoomId::new(building, number);
        let room = self
            .get_room(&room_id)
            .ok_or(RegistryError::UnknownRoom(room_id))?;

        if end <= start {
            return Err(RegistryError::InvalidInterval { start, end });
        }
        let span = Span::new(start, end);
        validate_span(&span)?;

        let guard = room.read().await;
        Ok(check_no_conflict(&guard, &span).is_ok())
    }
}
