// src/messages.rs
//
// Notifications emitted by the modal controller.
//

/// What ended a dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    Backdrop,
    /// `deactivate()` called by code, including the panel's close affordance.
    Programmatic,
}

/// Emitted once per session, after teardown has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogClosed {
    pub reason: CloseReason,
}
