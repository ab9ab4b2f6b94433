use serde::{Deserialize, Serialize};

use crate::model::{BookingInfo, Ms};

/// One request line from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Ask for a new booking.
    Book {
        building: String,
        room: String,
        requester: String,
        start: Ms,
        end: Ms,
    },
    /// List a room's bookings, start-ascending.
    Bookings { building: String, room: String },
}

/// One response line to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        booking: Option<BookingInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bookings: Option<Vec<BookingInfo>>,
    },
    Error { code: ErrorCode, message: String },
}

impl Response {
    pub fn booked(booking: BookingInfo) -> Self {
        Response::Ok {
            booking: Some(booking),
            bookings: None,
        }
    }

    pub fn listing(bookings: Vec<BookingInfo>) -> Self {
        Response::Ok {
            booking: None,
            bookings: Some(bookings),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Error {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    UnknownRoom,
    InvalidInterval,
    RoomUnavailable,
    LimitExceeded,
    BadRequest,
}

#[derive(Debug)]
pub enum ProtoError {
    Parse(String),
}

impl std::fmt::Display for ProtoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtoError::Parse(e) => write!(f, "bad request: {e}"),
        }
    }
}

impl std::error::Error for ProtoError {}

pub fn parse_request(line: &str) -> Result<Request, ProtoError> {
    serde_json::from_str(line.trim()).map_err(|e| ProtoError::Parse(e.to_string()))
}

pub fn encode_response(response: &Response) -> String {
    // No non-string map keys or non-finite floats anywhere in Response.
    serde_json::to_string(response).expect("Response serializes to JSON")
}
