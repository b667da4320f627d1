/**
 * Message Log
 *
 * The bounded, ordered, append-only buffer every chat entry goes through.
 *
 * # Concurrency
 *
 * One `std::sync::Mutex` guards the buffer and the sequence counter; both
 * `append` and `snapshot` hold it only for a few pointer moves. Waiting
 * subscribers never park on the mutex. They watch a `tokio::sync::watch`
 * channel carrying the tail sequence, and every append publishes its new
 * sequence there, so all waiters wake at once.
 *
 * # Retention
 *
 * The log keeps at most `capacity` entries. Older ones are evicted FIFO. A
 * subscriber whose cursor falls behind the oldest retained entry resumes
 * from that entry and the gap is logged. Delivery is best-effort,
 * not at-least-once.
 */
use crate::shared::message::now_millis;
use crate::shared::Message;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug)]
struct LogInner {
    entries: VecDeque<Message>,
    last_sequence: u64,
}

/// Bounded shared chat log with broadcast wake-up
#[derive(Debug)]
pub struct MessageLog {
    inner: Mutex<LogInner>,
    tail: watch::Sender<u64>,
    capacity: usize,
}

impl MessageLog {
    /// Create an empty log retaining at most `capacity` entries
    ///
    /// A capacity of zero is raised to one so the newest entry is always
    /// retained.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tail, _) = watch::channel(0);
        Self {
            inner: Mutex::new(LogInner {
                entries: VecDeque::with_capacity(capacity),
                last_sequence: 0,
            }),
            tail,
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a message and wake every waiting subscriber
    ///
    /// Stamps the next sequence number and the current time onto the
    /// message. Never fails; callers validate before appending.
    pub fn append(&self, mut message: Message) -> u64 {
        let mut inner = self.lock();
        inner.last_sequence += 1;
        let sequence = inner.last_sequence;

        message.sequence = sequence;
        message.timestamp_millis = now_millis();
        inner.entries.push_back(message);
        while inner.entries.len() > self.capacity {
            inner.entries.pop_front();
        }

        // Published under the lock so waiters observe tails in order
        self.tail.send_replace(sequence);
        tracing::debug!("[Log] Appended message {} ({} retained)", sequence, inner.entries.len());
        sequence
    }

    /// All retained messages, oldest first
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Retained messages plus the tail sequence, read under one lock
    ///
    /// Using the returned tail as a cursor continues exactly after the
    /// snapshot with nothing skipped or repeated.
    pub fn snapshot_with_tail(&self) -> (Vec<Message>, u64) {
        let inner = self.lock();
        (inner.entries.iter().cloned().collect(), inner.last_sequence)
    }

    /// Sequence number of the newest message, 0 when nothing was appended
    pub fn tail_sequence(&self) -> u64 {
        self.lock().last_sequence
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wait until messages newer than `cursor` exist or `timeout` elapses
    ///
    /// Returns every retained message with a sequence above `cursor`,
    /// oldest first, together with the new cursor (the tail sequence). On
    /// timeout the list is empty and the cursor is unchanged, except that a
    /// cursor ahead of the tail is pulled back to it.
    ///
    /// If `cursor` predates the oldest retained entry, delivery resumes at
    /// the oldest retained entry.
    pub async fn wait_for_new_since(&self, cursor: u64, timeout: Duration) -> (Vec<Message>, u64) {
        // Subscribe before looking so an append in between still wakes us
        let mut tail_rx = self.tail.subscribe();
        let deadline = tokio::time::Instant::now() + timeout;
        let mut cursor = cursor;

        loop {
            let (messages, new_cursor) = self.collect_since(cursor);
            if !messages.is_empty() {
                return (messages, new_cursor);
            }
            cursor = new_cursor;

            match tokio::time::timeout_at(deadline, tail_rx.changed()).await {
                Ok(Ok(())) => continue,
                // Sender lives as long as the log, treat closure like a timeout
                Ok(Err(_)) | Err(_) => return (Vec::new(), cursor),
            }
        }
    }

    fn collect_since(&self, cursor: u64) -> (Vec<Message>, u64) {
        let inner = self.lock();
        let tail = inner.last_sequence;
        if cursor >= tail {
            return (Vec::new(), tail.min(cursor));
        }

        if let Some(oldest) = inner.entries.front() {
            if oldest.sequence > cursor + 1 {
                tracing::warn!(
                    "[Log] Subscriber lagged: cursor {} is behind oldest retained {}, {} messages lost",
                    cursor,
                    oldest.sequence,
                    oldest.sequence - cursor - 1
                );
            }
        }

        // Entries are contiguous, so the first newer one is found by offset
        let skip = inner
            .entries
            .front()
            .map(|oldest| cursor.saturating_sub(oldest.sequence - 1) as usize)
            .unwrap_or(0);
        let messages = inner.entries.iter().skip(skip).cloned().collect();
        (messages, tail)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(crate::shared::config::DEFAULT_MAX_MESSAGES)
    }
}
