use crate::limits::*;
use crate::model::{RoomState, Span};

use super::RegistryError;

pub(crate) fn validate_span(span: &Span) -> Result<(), RegistryError> {
    if span.start < MIN_VALID_TIMESTAMP_MS || span.end > MAX_VALID_TIMESTAMP_MS {
        return Err(RegistryError::LimitExceeded("timestamp out of range"));
    }
    if span.duration_ms() > MAX_SPAN_DURATION_MS {
        return Err(RegistryError::LimitExceeded("span too wide"));
    }
    Ok(())
}

/// A request conflicts iff an existing booking overlaps it under the
/// half-open rule. Back-to-back spans (one ending exactly where the other
/// starts) are not conflicts.
pub(crate) fn check_no_conflict(room: &RoomState, span: &Span) -> Result<(), RegistryError> {
    if let Some(existing) = room.overlapping(span).next() {
        return Err(RegistryError::RoomUnavailable(existing.id));
    }
    Ok(())
}
