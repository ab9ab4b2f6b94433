use std::sync::Arc;
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};

use crate::limits::MAX_WIRE_LINE_LEN;
use crate::model::{BookingInfo, RoomId};
use crate::observability;
use crate::proto::{self, ErrorCode, Request, Response};
use crate::registry::{Registry, RegistryError};

/// Serve one client connection: one JSON request line in, one JSON response
/// line out, until the peer hangs up. A malformed line gets an error
/// response; the connection stays open for the next request.
pub async fn process_connection(
    socket: TcpStream,
    registry: Arc<Registry>,
) -> Result<(), LinesCodecError> {
    let mut framed = Framed::new(socket, LinesCodec::new_with_max_length(MAX_WIRE_LINE_LEN));

    while let Some(line) = framed.next().await {
        let line = match line {
            Ok(line) => line,
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                // Can't resync mid-line; answer and close.
                let response =
                    Response::error(ErrorCode::BadRequest, "request line too long");
                framed.send(proto::encode_response(&response)).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match proto::parse_request(&line) {
            Ok(request) => execute(&registry, request).await,
            Err(e) => Response::error(ErrorCode::BadRequest, e.to_string()),
        };
        framed.send(proto::encode_response(&response)).await?;
    }
    Ok(())
}

async fn execute(registry: &Registry, request: Request) -> Response {
    let op = observability::op_label(&request);
    let started = Instant::now();

    let response = match request {
        Request::Book {
            building,
            room,
            requester,
            start,
            end,
        } => {
            match registry
                .request_booking(&building, &room, &requester, start, end)
                .await
            {
                Ok(booking) => {
                    metrics::counter!(observability::BOOKINGS_ADMITTED_TOTAL).increment(1);
                    tracing::debug!("admitted booking {} in {building} {room}", booking.id);
                    let room_id = RoomId::new(building, room);
                    Response::booked(BookingInfo::new(&room_id, &booking))
                }
                Err(e) => {
                    if matches!(e, RegistryError::RoomUnavailable(_)) {
                        metrics::counter!(observability::BOOKINGS_REJECTED_TOTAL).increment(1);
                    }
                    registry_err(e)
                }
            }
        }
        Request::Bookings { building, room } => {
            match registry.get_bookings(&building, &room).await {
                Ok(bookings) => {
                    let room_id = RoomId::new(building, room);
                    Response::listing(
                        bookings
                            .iter()
                            .map(|b| BookingInfo::new(&room_id, b))
                            .collect(),
                    )
                }
                Err(e) => registry_err(e),
            }
        }
    };

    let status = match &response {
        Response::Ok { .. } => "ok",
        Response::Error { .. } => "error",
    };
    metrics::counter!(observability::REQUESTS_TOTAL, "op" => op, "status" => status)
        .increment(1);
    metrics::histogram!(observability::REQUEST_DURATION_SECONDS, "op" => op)
        .record(started.elapsed().as_secs_f64());

    response
}

fn registry_err(e: RegistryError) -> Response {
    let code = match &e {
        RegistryError::InvalidInput(_) => ErrorCode::InvalidInput,
        RegistryError::UnknownRoom(_) => ErrorCode::UnknownRoom,
        RegistryError::InvalidInterval { .. } => ErrorCode::InvalidInterval,
        RegistryError::RoomUnavailable(_) => ErrorCode::RoomUnavailable,
        RegistryError::LimitExceeded(_) => ErrorCode::LimitExceeded,
    };
    Response::error(code, e.to_string())
}
