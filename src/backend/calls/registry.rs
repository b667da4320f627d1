/**
 * Call Session Registry
 *
 * In-memory map of announced, in-progress voice and video calls.
 *
 * # Consistency with the log
 *
 * Every mutation appends a system message to the `MessageLog`. The registry
 * lock stays held while that message is appended. Lock order is always
 * registry first, log second. A subscriber that sees a call announcement
 * and then asks for `status()` waits for the mutation to finish, so it can
 * never observe the message without the matching session state.
 */
use crate::backend::chat::log::MessageLog;
use crate::shared::message::now_millis;
use crate::shared::{Message, SharedError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    #[default]
    Voice,
    Video,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voice" => Ok(Self::Voice),
            "video" => Ok(Self::Video),
            other => Err(SharedError::validation(
                "callType",
                format!("unknown call type '{}', expected voice or video", other),
            )),
        }
    }
}

/// One in-progress call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    pub id: String,
    pub participants: Vec<String>,
    pub kind: CallKind,
    pub start_time_millis: i64,
}

#[derive(Debug)]
pub struct CallSessionRegistry {
    sessions: Mutex<HashMap<String, CallSession>>,
    log: Arc<MessageLog>,
}

impl CallSessionRegistry {
    /// Create an empty registry announcing into `log`
    pub fn new(log: Arc<MessageLog>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            log,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CallSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start (or restart) a call and announce it
    ///
    /// A missing or blank `id` is replaced by the current epoch millis.
    /// Starting an id that is already active replaces its record.
    pub fn start(&self, id: Option<String>, initiator: &str, kind: CallKind) -> String {
        let id = id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| now_millis().to_string());

        let mut sessions = self.lock();
        let session = CallSession {
            id: id.clone(),
            participants: vec![initiator.to_string()],
            kind,
            start_time_millis: now_millis(),
        };
        if sessions.insert(id.clone(), session).is_some() {
            tracing::info!("[Calls] Call {} restarted by {}", id, initiator);
        } else {
            tracing::info!("[Calls] {} started {} call {}", initiator, kind, id);
        }

        self.log.append(Message::system(
            format!("📞 {} started a {} call", initiator, kind),
            Some(id.clone()),
        ));
        id
    }

    /// End a call and announce its duration
    ///
    /// Returns the duration in whole seconds, or `None` when no such call
    /// is active. Ending an unknown call appends nothing.
    pub fn end(&self, id: &str, requester: &str) -> Option<u64> {
        let mut sessions = self.lock();
        let Some(session) = sessions.remove(id) else {
            tracing::debug!("[Calls] End requested for unknown call {} by {}", id, requester);
            return None;
        };

        let elapsed = (now_millis() - session.start_time_millis).max(0);
        let duration_secs = (elapsed / 1000) as u64;
        tracing::info!("[Calls] Call {} ended by {} after {}s", id, requester, duration_secs);

        self.log.append(Message::system(
            format!("📞 Call ended by {} (duration: {}s)", requester, duration_secs),
            Some(id.to_string()),
        ));
        Some(duration_secs)
    }

    /// Point-in-time copy of every active call
    pub fn status(&self) -> HashMap<String, CallSession> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
