//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! state transitions stay pure and every host call happens in one place in the
//! plugin shim.

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Asks the host for the permissions the plugin needs.
    ///
    /// Emitted when a reload is requested after the operator denied web access.
    RequestPermissions,

    /// Issues the one-shot `GET` for the user list.
    FetchUsers {
        /// Endpoint to fetch.
        url: String,
    },

    /// Schedules a host timer that fires a `Timer` event after the delay.
    ScheduleTimer(Duration),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
