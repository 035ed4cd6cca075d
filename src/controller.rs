//! The audio-source selection state machine.

use std::sync::Arc;

use crate::error::SettingsError;
use crate::event::{LifecycleEvent, StreamKey};
use crate::helper::AudioHelper;
use crate::selection::SelectionState;
use crate::settings::{Settings, SettingsStore};
use crate::source::{selectable_options, AudioSource, SourceOption};

/// Identifier of a step in the host's stream-configuration UI.
pub type StepId = u32;

/// Step index of the audio-source step in the host's go-live modal.
pub const AUDIO_STEP: StepId = 3;

/// Translates user intent and stream lifecycle events into calls against the
/// native audio-routing helper.
///
/// The controller owns the selected source set and the persisted settings,
/// and keeps them consistent across UI re-renders and stream lifecycle
/// events. All state transitions are synchronous and non-blocking; helper
/// calls are fire-and-forget.
///
/// Mutation must be serialized by the caller. [`Session`](crate::Session)
/// wraps the controller in a mutex and shares it between host UI callbacks
/// and the event-dispatch task.
pub struct SessionController {
    helper: Arc<dyn AudioHelper>,
    store: Arc<dyn SettingsStore>,
    settings: Settings,
    selection: SelectionState,
    local_user_id: String,
    active_step: Option<StepId>,
    last_step: Option<StepId>,
}

impl SessionController {
    pub(crate) fn new(
        helper: Arc<dyn AudioHelper>,
        store: Arc<dyn SettingsStore>,
        settings: Settings,
        local_user_id: String,
    ) -> Self {
        Self {
            helper,
            store,
            settings,
            selection: SelectionState::new(),
            local_user_id,
            active_step: None,
            last_step: None,
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Returns true when the source selector should be disabled in the UI.
    ///
    /// The selector is disabled while the host's built-in soundshare path is
    /// enabled, since the virtual mic is bypassed entirely then.
    pub fn selector_disabled(&self) -> bool {
        self.settings.use_built_in_soundshare
    }

    /// Records that the configuration UI moved to the given step.
    ///
    /// Entering the audio-source step from a different step resets the
    /// selection to the default; repeated calls with the same step leave it
    /// untouched, so UI re-renders don't wipe the user's picks.
    pub fn on_step_change(&mut self, step: StepId) {
        self.last_step = self.active_step.replace(step);
        if step == AUDIO_STEP && self.last_step != Some(AUDIO_STEP) {
            self.selection.reset();
        }
    }

    /// Builds the dropdown options from the helper's live source list.
    ///
    /// Queried fresh on every call, so reopening the dropdown reflects
    /// sources that appeared or vanished meanwhile. Sources owned by the host
    /// client are excluded; see [`selectable_options`] for the full shape.
    pub fn selectable_options(&self) -> Vec<SourceOption> {
        selectable_options(&self.helper.list_active_sources())
    }

    /// Applies a dropdown change and returns the resulting selection.
    ///
    /// See [`SelectionState::apply_change`] for the collapse/strip rules.
    pub fn on_selection_change(
        &mut self,
        value: &AudioSource,
        new_set: Vec<AudioSource>,
    ) -> &SelectionState {
        self.selection.apply_change(value, new_set);
        &self.selection
    }

    /// Toggles the built-in soundshare setting and persists it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings store fails to save.
    pub fn set_built_in_soundshare(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.use_built_in_soundshare = enabled;
        self.store.save(&self.settings)
    }

    /// Starts the virtual-microphone capture for a confirmed stream.
    ///
    /// With built-in soundshare enabled this does nothing; the host's native
    /// path handles audio. Otherwise the default selection maps to
    /// whole-system capture and anything else to a filtered capture.
    pub fn on_stream_submit(&self) {
        if self.settings.use_built_in_soundshare {
            return;
        }

        if self.selection.is_entire_system() {
            tracing::debug!("starting whole-system virtual mic capture");
            self.helper.start_capture_whole_system();
        } else {
            let filters = self.selection.inclusion_filters();
            tracing::debug!(?filters, "starting filtered virtual mic capture");
            self.helper.start_capture(&filters);
        }
    }

    /// Handles a stream-close event.
    ///
    /// Stops the capture only when the key's owner is the local user; other
    /// participants' streams closing is not our concern.
    pub fn on_stream_close(&self, stream_key: &StreamKey) {
        if stream_key.owner_id() != self.local_user_id {
            return;
        }

        tracing::debug!(stream_key = %stream_key, "local stream closed, stopping virtual mic");
        self.helper.stop_capture();
    }

    /// Handles a voice-channel-select event.
    ///
    /// `None` means the user left voice entirely, which stops the capture.
    /// Switching channels while streaming (`Some`) is ignored.
    pub fn on_voice_channel_select(&self, channel_id: Option<&str>) {
        if channel_id.is_some() {
            return;
        }

        tracing::debug!("left voice, stopping virtual mic");
        self.helper.stop_capture();
    }

    /// Dispatches one host lifecycle event.
    pub fn handle_event(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::StreamClose { stream_key } => self.on_stream_close(stream_key),
            LifecycleEvent::VoiceChannelSelect { channel_id } => {
                self.on_voice_channel_select(channel_id.as_deref());
            }
        }
    }

    /// Resolves the process id the host should address audio controls to.
    ///
    /// With built-in soundshare disabled, per-user volume and mute must hit
    /// the virtual mic's voice engine rather than the real client process.
    pub fn resolve_audio_pid(&self, default_pid: u32) -> u32 {
        if self.settings.use_built_in_soundshare {
            default_pid
        } else {
            self.helper.voice_engine_pid()
        }
    }

    pub(crate) fn save_settings(&self) -> Result<(), SettingsError> {
        self.store.save(&self.settings)
    }
}
