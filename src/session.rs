//! Per-load session identity.
//!
//! The id correlates every request sent during one page load. It is not a
//! credential and is never persisted; a reload starts a new session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const SUFFIX_LEN: usize = 9;

static CURRENT: OnceLock<SessionId> = OnceLock::new();

/// Opaque correlation token: `session_<unix millis>_<random suffix>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id from the current time and a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format_session_id(millis, &random[..SUFFIX_LEN]))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The session id for this load, generated on first access.
pub fn current() -> &'static SessionId {
    CURRENT.get_or_init(|| {
        let id = SessionId::generate();
        log::debug!("session started: {id}");
        id
    })
}

fn format_session_id(millis: i128, suffix: &str) -> String {
    format!("session_{millis}_{suffix}")
}
