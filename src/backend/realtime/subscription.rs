/**
 * Stream Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/stream` endpoint.
 *
 * # Server-Sent Events (SSE)
 *
 * Each new chat message becomes one SSE event:
 *
 * ```text
 * id: 42
 * data: {"author":"Alice","content":"hi","timestampMillis":1700000000000,"kind":"text","sequence":42}
 * ```
 *
 * The `id:` line carries the message sequence, so a browser `EventSource`
 * sends it back as `Last-Event-ID` when it reconnects. Idle connections get
 * a `: keep-alive` comment every poll interval.
 *
 * # Start Position
 *
 * - `Last-Event-ID` header - resume after that sequence
 * - `?replay=false` - live messages only
 * - Default - full retained history first, then live
 *
 * # Connection Management
 *
 * A spawned `Subscriber` worker pushes frames into a bounded channel and the
 * response body drains it. A client that stops reading leaves the worker
 * waiting on a full channel. When the client goes away the body (and the
 * receiver) is dropped, the worker's next push fails and the task ends.
 */

use std::convert::Infallible;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{
        sse::{Event, Sse},
        IntoResponse,
    },
};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use crate::backend::realtime::broadcast::{Frame, StartPosition, Subscriber, STREAM_BUFFER};
use crate::backend::server::state::AppState;

/// Header set by `EventSource` on reconnect
pub const LAST_EVENT_ID: &str = "last-event-id";

#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    pub replay: Option<String>,
}

/// Pick the start position from the request
///
/// A parsable `Last-Event-ID` wins over the `replay` flag, which browsers
/// repeat on every reconnect.
pub fn start_position(headers: &HeaderMap, query: &StreamQuery) -> StartPosition {
    let resume = headers
        .get(LAST_EVENT_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    if let Some(sequence) = resume {
        return StartPosition::Resume(sequence);
    }

    let replay = query
        .replay
        .as_deref()
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(true);
    if replay {
        StartPosition::History
    } else {
        StartPosition::Live
    }
}

fn frame_to_event(frame: Frame) -> Event {
    match frame {
        Frame::Message(message) => {
            let id = message.sequence.to_string();
            match Event::default().id(id).json_data(&message) {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("[Stream] Failed to serialize message {}: {}", message.sequence, e);
                    Event::default().comment("skipped")
                }
            }
        }
        Frame::KeepAlive => Event::default().comment("keep-alive"),
    }
}

/// Turn a frame receiver into an SSE event stream
pub fn event_stream(
    rx: mpsc::Receiver<Frame>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    ReceiverStream::new(rx).map(|frame| Ok(frame_to_event(frame)))
}

/// Handle stream subscription (GET /stream)
///
/// # Returns
///
/// `text/event-stream` response that stays open until the client leaves
///
/// # Example Request
///
/// ```http
/// GET /stream?replay=false HTTP/1.1
/// Last-Event-ID: 41
/// ```
pub async fn handle_stream(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StreamQuery>,
) -> impl IntoResponse {
    let start = start_position(&headers, &query);
    tracing::info!("[Stream] New subscriber starting at {:?}", start);

    let (tx, rx) = mpsc::channel::<Frame>(STREAM_BUFFER);
    let subscriber = Subscriber::new(app_state.log.clone(), start, app_state.config.stream_poll);

    tokio::spawn(async move {
        let delivered = subscriber.run(tx).await;
        tracing::info!("[Stream] Subscriber disconnected after {} messages", delivered);
    });

    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (HeaderName::from_static("x-accel-buffering"), HeaderValue::from_static("no")),
        ],
        Sse::new(event_stream(rx)),
    )
}
