//! Error types for screenshare-audio.
//!
//! Errors are split into two categories:
//! - **Fatal errors** ([`ScreenshareAudioError`]): Prevent the session from starting
//! - **Settings errors** ([`SettingsError`]): Load/save failures; a corrupted
//!   blob is recovered by resetting the store, not by repair

use std::path::PathBuf;

/// Fatal errors that prevent a screenshare-audio session from starting.
///
/// These errors are returned from [`ScreenshareAudioBuilder::start()`] and
/// indicate that the session cannot be created. Native helper call failures at
/// runtime are the helper's own failure domain and are never surfaced here.
///
/// [`ScreenshareAudioBuilder::start()`]: crate::ScreenshareAudioBuilder::start
#[derive(Debug, thiserror::Error)]
pub enum ScreenshareAudioError {
    /// No native audio-routing helper was provided.
    ///
    /// The helper is a hard dependency: without it there is nothing to drive,
    /// so the session refuses to start rather than running inert.
    #[error("native audio helper unavailable - provide one with helper() before calling start()")]
    HelperUnavailable,

    /// No settings store was configured.
    #[error("no settings store configured - add one with settings_store() before calling start()")]
    NoSettingsStore,

    /// The local user id was not configured.
    ///
    /// The id is needed to tell the local user's stream-close events apart
    /// from other participants' streams.
    #[error("no local user configured - add one with local_user() before calling start()")]
    NoLocalUser,

    /// Settings could not be loaded or saved.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors from the settings store.
///
/// A [`Corrupted`](SettingsError::Corrupted) blob is recoverable: the store is
/// reset and defaults are used (see [`Settings::load_or_reset`]). I/O errors
/// are fatal.
///
/// [`Settings::load_or_reset`]: crate::Settings::load_or_reset
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The persisted blob exists but does not parse as settings JSON.
    #[error("settings blob corrupted: {reason}")]
    Corrupted {
        /// Description of the parse failure.
        reason: String,
    },

    /// Reading or writing the settings blob failed.
    #[error("settings i/o error: {path}: {source}")]
    Io {
        /// Path to the settings blob.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Creates a corruption error with the given reason.
    pub fn corrupted(reason: impl Into<String>) -> Self {
        Self::Corrupted {
            reason: reason.into(),
        }
    }

    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
