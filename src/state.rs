//! Process-wide dialog slot.
//!
//! The body class, the backdrop and the document keydown listener are
//! page-level singletons, so at most one dialog session may hold them.  The
//! slot makes that explicit: a controller must `acquire` it before touching
//! any of them and the returned token releases it on drop.

use std::cell::Cell;

use crate::errors::ModalError;

/// Identifies the controller that owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub u64);

thread_local! {
    static ACTIVE_DIALOG: Cell<Option<OwnerId>> = const { Cell::new(None) };
    static NEXT_OWNER: Cell<u64> = const { Cell::new(1) };
}

/// Hand out a fresh owner id for a new controller.
pub fn next_owner_id() -> OwnerId {
    NEXT_OWNER.with(|next| {
        let id = next.get();
        next.set(id + 1);
        OwnerId(id)
    })
}

/// Proof of holding the slot.  Dropping it releases the slot.
#[derive(Debug)]
pub struct SessionToken {
    owner: OwnerId,
}

impl SessionToken {
    pub fn owner(&self) -> OwnerId {
        self.owner
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        ACTIVE_DIALOG.with(|slot| {
            if slot.get() == Some(self.owner) {
                slot.set(None);
            }
        });
    }
}

pub fn acquire(owner: OwnerId) -> Result<SessionToken, ModalError> {
    ACTIVE_DIALOG.with(|slot| match slot.get() {
        Some(holder) if holder == owner => Err(ModalError::InvariantViolation(
            "activate() called while this dialog is already active".into(),
        )),
        Some(holder) => Err(ModalError::InvariantViolation(format!(
            "activate() called while dialog #{} is active; only one dialog may be open",
            holder.0
        ))),
        None => {
            slot.set(Some(owner));
            Ok(SessionToken { owner })
        }
    })
}

/// Explicit release; equivalent to dropping the token.
pub fn release(token: SessionToken) {
    drop(token);
}

/// Current holder of the slot, if any.
pub fn active_owner() -> Option<OwnerId> {
    ACTIVE_DIALOG.with(|slot| slot.get())
}
