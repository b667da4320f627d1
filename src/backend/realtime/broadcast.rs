/**
 * Broadcast Coordinator
 *
 * Turns appends to the `MessageLog` into live pushes, one worker per
 * connected client.
 *
 * # Worker Loop
 *
 * Each `Subscriber` owns a cursor into the log. It repeatedly waits for
 * messages newer than the cursor, pushes them in sequence order, and moves
 * the cursor forward. An idle wait ends with a keep-alive frame so proxies
 * keep the connection open.
 *
 * The first failed push ends the loop. That failure is the only
 * cancellation signal: a closed client drops its receiving half, and the
 * next push (data or keep-alive) notices. No other subscriber and nothing in
 * the log is affected.
 *
 * # Sinks
 *
 * The push side is the `FrameSink` trait. Production wires it to a bounded
 * channel of `STREAM_BUFFER` frames feeding the SSE response; tests plug in
 * a recording sink.
 *
 * A push into a full channel waits. A client that stops reading therefore
 * parks its own worker, its cursor falls behind, and once the log evicts
 * past it the usual lag handling applies. Memory per stalled client stays at
 * `STREAM_BUFFER` frames.
 */

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use crate::backend::chat::log::MessageLog;
use crate::shared::Message;

/// Frames queued per subscriber before pushes start waiting
pub const STREAM_BUFFER: usize = 64;

/// Where a new subscriber starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// Replay every retained message, then follow live
    History,
    /// Only messages appended after connecting
    Live,
    /// Continue after the given sequence (the last one the client saw)
    Resume(u64),
}

/// One unit pushed to a subscriber
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Message(Message),
    KeepAlive,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("subscriber disconnected")]
    Closed,
}

/// Destination for frames of one subscriber
pub trait FrameSink: Send {
    /// Deliver one frame, waiting while the client is behind
    fn push(&mut self, frame: Frame) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl FrameSink for mpsc::Sender<Frame> {
    async fn push(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.send(frame).await.map_err(|_| TransportError::Closed)
    }
}

/// Per-connection cursor over the message log
#[derive(Debug)]
pub struct Subscriber {
    log: Arc<MessageLog>,
    cursor: u64,
    poll: Duration,
    backlog: Vec<Message>,
}

impl Subscriber {
    pub fn new(log: Arc<MessageLog>, start: StartPosition, poll: Duration) -> Self {
        let (backlog, cursor) = match start {
            StartPosition::History => log.snapshot_with_tail(),
            StartPosition::Live => (Vec::new(), log.tail_sequence()),
            StartPosition::Resume(sequence) => (Vec::new(), sequence),
        };
        Self {
            log,
            cursor,
            poll,
            backlog,
        }
    }

    /// Sequence of the last message handed to the sink
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Drive `sink` until a push fails
    ///
    /// Returns the number of messages delivered.
    pub async fn run<S: FrameSink>(mut self, mut sink: S) -> usize {
        let mut delivered = 0;

        let backlog = std::mem::take(&mut self.backlog);
        if !backlog.is_empty() {
            tracing::debug!("[Stream] Replaying {} messages", backlog.len());
        }
        if self.push_all(&mut sink, backlog, &mut delivered).await.is_err() {
            return delivered;
        }

        loop {
            let (messages, cursor) = self.log.wait_for_new_since(self.cursor, self.poll).await;

            if messages.is_empty() {
                self.cursor = cursor;
                if sink.push(Frame::KeepAlive).await.is_err() {
                    tracing::debug!("[Stream] Subscriber gone during keep-alive at cursor {}", self.cursor);
                    break;
                }
                continue;
            }

            if self.push_all(&mut sink, messages, &mut delivered).await.is_err() {
                break;
            }
            self.cursor = self.cursor.max(cursor);
        }

        delivered
    }

    async fn push_all<S: FrameSink>(
        &mut self,
        sink: &mut S,
        messages: Vec<Message>,
        delivered: &mut usize,
    ) -> Result<(), TransportError> {
        for message in messages {
            let sequence = message.sequence;
            if let Err(e) = sink.push(Frame::Message(message)).await {
                tracing::debug!("[Stream] Push of message {} failed: {}", sequence, e);
                return Err(e);
            }
            self.cursor = sequence;
            *delivered += 1;
        }
        Ok(())
    }
}
