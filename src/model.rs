use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A room is addressed by building code plus room number, e.g. `GZB 301`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId {
    pub building: String,
    pub number: String,
}

impl RoomId {
    pub fn new(building: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            building: building.into(),
            number: number.into(),
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.building, self.number)
    }
}

/// An admitted reservation. Immutable once created; never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub requester: String,
    pub span: Span,
}

#[derive(Debug)]
pub struct RoomState {
    pub id: RoomId,
    /// All admitted bookings, sorted by `span.start`, pairwise non-overlapping.
    pub bookings: Vec<Booking>,
}

impl RoomState {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            bookings: Vec::new(),
        }
    }

    /// Insert booking maintaining sort order by span.start.
    pub fn insert_booking(&mut self, booking: Booking) {
        let pos = self
            .bookings
            .binary_search_by_key(&booking.span.start, |b| b.span.start)
            .unwrap_or_else(|e| e);
        self.bookings.insert(pos, booking);
    }

    /// Return only bookings whose span overlaps the query window.
    /// Uses binary search to skip bookings starting at or after `query.end`.
    pub fn overlapping(&self, query: &Span) -> impl Iterator<Item = &Booking> {
        // Everything at index >= right_bound starts at or after query.end → can't overlap.
        let right_bound = self
            .bookings
            .partition_point(|b| b.span.start < query.end);
        self.bookings[..right_bound]
            .iter()
            .filter(move |b| b.span.end > query.start)
    }
}

// ── Wire row types ───────────────────────────────────────────────

/// Flat booking row as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub id: Ulid,
    pub building: String,
    pub room: String,
    pub requester: String,
    pub start: Ms,
    pub end: Ms,
}

impl BookingInfo {
    pub fn new(room: &RoomId, booking: &Booking) -> Self {
        Self {
            id: booking.id,
            building: room.building.clone(),
            room: room.number.clone(),
            requester: booking.requester.clone(),
            start: booking.span.start,
            end: booking.span.end,
        }
    }
}
