//! Session lifecycle and event dispatch.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::controller::SessionController;
use crate::error::ScreenshareAudioError;
use crate::event::LifecycleEvent;

/// Handle to a running screenshare-audio session.
///
/// Returned by [`ScreenshareAudioBuilder::start()`]. Host UI callbacks drive
/// the shared [`SessionController`]; lifecycle events from the host bus are
/// consumed by a background dispatch task when an event channel was
/// configured.
///
/// # Lifecycle
///
/// 1. Created by [`ScreenshareAudioBuilder::start()`]
/// 2. Event dispatch runs in the background
/// 3. Call [`stop()`](Session::stop) for graceful shutdown (saves settings)
/// 4. Dropping the `Session` also tears the dispatch task down, which is the
///    guaranteed deregistration from the host's event bus
///
/// [`ScreenshareAudioBuilder::start()`]: crate::ScreenshareAudioBuilder::start
pub struct Session {
    controller: Arc<Mutex<SessionController>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    dispatch_handle: Option<JoinHandle<()>>,
}

impl Session {
    pub(crate) fn new(
        controller: Arc<Mutex<SessionController>>,
        shutdown_tx: Option<oneshot::Sender<()>>,
        dispatch_handle: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            controller,
            shutdown_tx,
            dispatch_handle,
        }
    }

    /// Returns a handle to the shared controller.
    ///
    /// Lock it to drive UI callbacks (selection changes, submit, toggle).
    pub fn controller(&self) -> Arc<Mutex<SessionController>> {
        Arc::clone(&self.controller)
    }

    /// Stops the session gracefully.
    ///
    /// Drains pending lifecycle events, shuts the dispatch task down, and
    /// saves the settings one final time.
    ///
    /// # Errors
    ///
    /// Returns an error when the final settings save fails.
    pub async fn stop(mut self) -> Result<(), ScreenshareAudioError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Dispatch may already have exited because the host dropped its
            // sender; a dead receiver is fine.
            let _ = tx.send(());
        }
        if let Some(handle) = self.dispatch_handle.take() {
            let _ = handle.await;
        }

        let result = self.controller.lock().save_settings();
        tracing::info!("screenshare audio session stopped");
        result.map_err(Into::into)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self.dispatch_handle.take() {
            handle.abort();
        }
    }
}

/// Spawns the task that feeds host lifecycle events to the controller.
pub(crate) fn spawn_dispatch(
    controller: Arc<Mutex<SessionController>>,
    mut events: mpsc::Receiver<LifecycleEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                // Drain pending events before honoring shutdown.
                biased;

                event = events.recv() => match event {
                    Some(event) => controller.lock().handle_event(&event),
                    // Host bus dropped its sender.
                    None => break,
                },
                _ = &mut shutdown_rx => break,
            }
        }
    })
}
