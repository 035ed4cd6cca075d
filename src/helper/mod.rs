//! Native audio helper boundary.
//!
//! The helper is the platform's audio-routing library: it enumerates live
//! audio sources and owns the virtual microphone that mixes the selected
//! streams for the screenshare pipeline. This crate only drives it;
//! [`MockHelper`] stands in for tests.

mod mock;

pub use mock::{HelperCall, MockHelper};

use crate::source::{SourceDescriptor, SourceFilter};

/// Boundary to the native audio-routing helper.
///
/// Calls are synchronous and fire-and-forget: failures inside the helper are
/// its own failure domain and are not surfaced through this trait. There is
/// no retry or fallback at this layer.
pub trait AudioHelper: Send + Sync {
    /// Lists the currently active audio sources.
    fn list_active_sources(&self) -> Vec<SourceDescriptor>;

    /// Starts virtual-microphone mixing of streams matching any filter.
    fn start_capture(&self, filters: &[SourceFilter]);

    /// Starts virtual-microphone mixing of all system audio.
    fn start_capture_whole_system(&self);

    /// Stops any active virtual-microphone mixing.
    ///
    /// Idempotent: stopping an inactive capture is a no-op.
    fn stop_capture(&self);

    /// Returns the process id to treat as the audio source owner.
    ///
    /// Used to point the host's per-user volume and mute controls at the
    /// virtual mic's voice engine instead of the real client process.
    fn voice_engine_pid(&self) -> u32;
}
