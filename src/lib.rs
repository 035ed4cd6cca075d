//! # screenshare-audio
//!
//! Audio-source selection for screenshare streams.
//!
//! `screenshare-audio` owns the state machine that decides which system audio
//! sources get mixed into a screenshare's virtual microphone. It drives a
//! native audio-routing helper through the [`AudioHelper`] trait and reacts
//! to host lifecycle events ([`LifecycleEvent`]) delivered on a channel.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use screenshare_audio::{JsonFileStore, LifecycleEvent, ScreenshareAudio};
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! let (events_tx, events_rx) = mpsc::channel::<LifecycleEvent>(16);
//!
//! let session = ScreenshareAudio::builder()
//!     .helper(Arc::new(native_helper))
//!     .settings_store(Arc::new(JsonFileStore::new("screenshare-audio.config.json")))
//!     .local_user("user7")
//!     .events(events_rx)
//!     .start()?;
//!
//! // Host UI callbacks drive the shared controller...
//! let controller = session.controller();
//! let options = controller.lock().selectable_options();
//!
//! // ...while lifecycle events flow through the channel in the background.
//! session.stop().await?;
//! ```
//!
//! ## Architecture
//!
//! Everything foreign sits behind an explicit boundary:
//!
//! - **[`AudioHelper`]**: the native audio-routing library that enumerates
//!   live sources and owns the virtual microphone
//! - **[`SettingsStore`]**: the host's keyed settings persistence
//! - **[`LifecycleEvent`] channel**: the host's event bus
//!
//! The [`SessionController`] in the middle is a small, synchronous state
//! machine: it never blocks, never retries, and treats every helper call as
//! fire-and-forget. All mutation is serialized behind one mutex, matching the
//! single UI thread the state was designed for.

#![warn(missing_docs)]
// unwrap/expect are fine in tests
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]

mod builder;
mod controller;
mod error;
mod event;
mod helper;
mod selection;
mod session;
mod settings;
mod source;

pub use builder::{ScreenshareAudio, ScreenshareAudioBuilder};
pub use controller::{SessionController, StepId, AUDIO_STEP};
pub use error::{ScreenshareAudioError, SettingsError};
pub use event::{LifecycleEvent, StreamKey};
pub use helper::{AudioHelper, HelperCall, MockHelper};
pub use selection::SelectionState;
pub use session::Session;
pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore};
pub use source::{
    selectable_options, AudioSource, SourceDescriptor, SourceFilter, SourceOption,
    HOST_PROCESS_BINARY,
};
