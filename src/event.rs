//! Host lifecycle events.
//!
//! The host's event bus delivers stream and voice-channel notifications. The
//! session consumes them from a channel (see
//! [`ScreenshareAudioBuilder::events`]); hosts without a channel can feed them
//! to [`SessionController::handle_event`] directly.
//!
//! [`ScreenshareAudioBuilder::events`]: crate::ScreenshareAudioBuilder::events
//! [`SessionController::handle_event`]: crate::SessionController::handle_event

use std::fmt;

/// Opaque identifier of an active share session.
///
/// The final colon-delimited segment encodes the owning user's id, e.g.
/// `"guild:channel:user42"` is owned by `"user42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamKey(String);

impl StreamKey {
    /// Creates a stream key from its string form.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owning user's id, the final colon-delimited segment.
    ///
    /// A key without colons is treated as a bare owner id.
    pub fn owner_id(&self) -> &str {
        match self.0.rfind(':') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StreamKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StreamKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Lifecycle notifications delivered by the host's event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// An active stream closed. May belong to any participant, not just the
    /// local user.
    StreamClose {
        /// Key of the stream that closed.
        stream_key: StreamKey,
    },

    /// The user moved between voice channels.
    VoiceChannelSelect {
        /// The channel joined, or `None` when the user left voice entirely.
        channel_id: Option<String>,
    },
}
