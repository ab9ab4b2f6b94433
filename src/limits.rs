//! Hard limits bounding every request. Exceeding any of these is a
//! `LimitExceeded` rejection, not a panic.

use crate::model::Ms;

/// Earliest timestamp a span may carry (Unix epoch).
pub const MIN_VALID_TIMESTAMP_MS: Ms = 0;

/// Latest timestamp a span may carry (2100-01-01T00:00:00Z).
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

/// Widest single booking (365 days).
pub const MAX_SPAN_DURATION_MS: Ms = 31_536_000_000;

pub const MAX_REQUESTER_LEN: usize = 256;

pub const MAX_BOOKINGS_PER_ROOM: usize = 100_000;

/// Longest request line the wire layer will frame.
pub const MAX_WIRE_LINE_LEN: usize = 64 * 1024;

/// Cap on catalog size, checked at load time.
pub const MAX_CATALOG_ROOMS: usize = 10_000;
