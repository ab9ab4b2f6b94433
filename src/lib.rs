//! atrium — an in-memory room reservation service.
//!
//! A fixed catalog of rooms, conflict-free admission of half-open time
//! intervals under per-room locking, and a line-delimited JSON TCP surface.

pub mod catalog;
pub mod limits;
pub mod model;
pub mod observability;
pub mod proto;
pub mod registry;
pub mod wire;
