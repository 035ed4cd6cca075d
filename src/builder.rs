//! Builder pattern for `ScreenshareAudio`.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use crate::controller::SessionController;
use crate::error::ScreenshareAudioError;
use crate::event::LifecycleEvent;
use crate::helper::AudioHelper;
use crate::session::{spawn_dispatch, Session};
use crate::settings::{Settings, SettingsStore};

/// Builder for configuring and starting a screenshare-audio session.
///
/// Use [`ScreenshareAudio::builder()`] to create a new builder.
///
/// # Example
///
/// ```rust,ignore
/// use screenshare_audio::{JsonFileStore, LifecycleEvent, ScreenshareAudio};
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
///
/// let (events_tx, events_rx) = mpsc::channel::<LifecycleEvent>(16);
///
/// let session = ScreenshareAudio::builder()
///     .helper(Arc::new(native_helper))
///     .settings_store(Arc::new(JsonFileStore::new("screenshare-audio.config.json")))
///     .local_user("user7")
///     .events(events_rx)
///     .start()?;
/// ```
///
/// [`ScreenshareAudio::builder()`]: ScreenshareAudio::builder
#[must_use]
#[derive(Default)]
pub struct ScreenshareAudioBuilder {
    helper: Option<Arc<dyn AudioHelper>>,
    store: Option<Arc<dyn SettingsStore>>,
    local_user_id: Option<String>,
    events: Option<mpsc::Receiver<LifecycleEvent>>,
}

impl ScreenshareAudioBuilder {
    /// Creates a new builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the native audio-routing helper. Required.
    pub fn helper(mut self, helper: Arc<dyn AudioHelper>) -> Self {
        self.helper = Some(helper);
        self
    }

    /// Sets the settings store. Required.
    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the local user's id. Required.
    ///
    /// Used to tell the local user's stream-close events apart from other
    /// participants' streams.
    pub fn local_user(mut self, id: impl Into<String>) -> Self {
        self.local_user_id = Some(id.into());
        self
    }

    /// Receives host lifecycle events on this channel. Optional.
    ///
    /// Without a channel, no dispatch task is spawned and the host must feed
    /// events to [`SessionController::handle_event`] itself.
    ///
    /// [`SessionController::handle_event`]: SessionController::handle_event
    pub fn events(mut self, events: mpsc::Receiver<LifecycleEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Starts the session.
    ///
    /// Loads the persisted settings (a corrupted blob is reset to defaults)
    /// and, when an event channel was configured, spawns the dispatch task.
    /// Must be called within a Tokio runtime in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No helper, settings store, or local user is configured
    /// - Loading the settings fails with an I/O error
    pub fn start(self) -> Result<Session, ScreenshareAudioError> {
        let helper = self.helper.ok_or(ScreenshareAudioError::HelperUnavailable)?;
        let store = self.store.ok_or(ScreenshareAudioError::NoSettingsStore)?;
        let local_user_id = self
            .local_user_id
            .ok_or(ScreenshareAudioError::NoLocalUser)?;

        let settings = Settings::load_or_reset(store.as_ref())?;
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            "screenshare audio session starting"
        );

        let controller = Arc::new(Mutex::new(SessionController::new(
            helper,
            store,
            settings,
            local_user_id,
        )));

        let (shutdown_tx, dispatch_handle) = match self.events {
            Some(events) => {
                let (shutdown_tx, shutdown_rx) = oneshot::channel();
                let handle = spawn_dispatch(Arc::clone(&controller), events, shutdown_rx);
                (Some(shutdown_tx), Some(handle))
            }
            None => (None, None),
        };

        Ok(Session::new(controller, shutdown_tx, dispatch_handle))
    }
}

/// Main entry point for screenshare-audio.
///
/// Use [`ScreenshareAudio::builder()`] to configure and start a session.
pub struct ScreenshareAudio;

impl ScreenshareAudio {
    /// Creates a new builder for configuring a session.
    pub fn builder() -> ScreenshareAudioBuilder {
        ScreenshareAudioBuilder::new()
    }
}
