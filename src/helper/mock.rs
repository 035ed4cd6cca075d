//! Mock audio helper for testing without the native routing library.

use parking_lot::Mutex;

use super::AudioHelper;
use crate::source::{SourceDescriptor, SourceFilter};

/// Default voice-engine pid served by [`MockHelper`].
const MOCK_VOICE_ENGINE_PID: u32 = 4242;

/// A call recorded by [`MockHelper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperCall {
    /// `start_capture` with the given filter list.
    StartCapture(Vec<SourceFilter>),
    /// `start_capture_whole_system`.
    StartWholeSystem,
    /// `stop_capture`.
    StopCapture,
}

/// Mock helper that records every call and serves canned data.
///
/// # Example
///
/// ```
/// use screenshare_audio::{AudioHelper, HelperCall, MockHelper};
///
/// let helper = MockHelper::new();
/// helper.start_capture_whole_system();
/// assert_eq!(helper.calls(), vec![HelperCall::StartWholeSystem]);
/// ```
pub struct MockHelper {
    sources: Mutex<Vec<SourceDescriptor>>,
    pid: Mutex<u32>,
    calls: Mutex<Vec<HelperCall>>,
}

impl Default for MockHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHelper {
    /// Creates a mock helper with no live sources.
    pub fn new() -> Self {
        Self {
            sources: Mutex::new(Vec::new()),
            pid: Mutex::new(MOCK_VOICE_ENGINE_PID),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock helper serving the given live sources.
    pub fn with_sources(sources: Vec<SourceDescriptor>) -> Self {
        let helper = Self::new();
        *helper.sources.lock() = sources;
        helper
    }

    /// Replaces the served live sources.
    pub fn set_sources(&self, sources: Vec<SourceDescriptor>) {
        *self.sources.lock() = sources;
    }

    /// Sets the voice-engine pid returned by [`AudioHelper::voice_engine_pid`].
    pub fn set_voice_engine_pid(&self, pid: u32) {
        *self.pid.lock() = pid;
    }

    /// Returns a copy of the recorded calls, in order.
    pub fn calls(&self) -> Vec<HelperCall> {
        self.calls.lock().clone()
    }

    /// Takes the recorded calls, clearing the log.
    pub fn take_calls(&self) -> Vec<HelperCall> {
        std::mem::take(&mut self.calls.lock())
    }
}

impl AudioHelper for MockHelper {
    fn list_active_sources(&self) -> Vec<SourceDescriptor> {
        self.sources.lock().clone()
    }

    fn start_capture(&self, filters: &[SourceFilter]) {
        self.calls
            .lock()
            .push(HelperCall::StartCapture(filters.to_vec()));
    }

    fn start_capture_whole_system(&self) {
        self.calls.lock().push(HelperCall::StartWholeSystem);
    }

    fn stop_capture(&self) {
        self.calls.lock().push(HelperCall::StopCapture);
    }

    fn voice_engine_pid(&self) -> u32 {
        *self.pid.lock()
    }
}
