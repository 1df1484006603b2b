//! Accessible modal dialog controller.
//!
//! Turns an existing element into a transient dialog: backdrop, ARIA
//! attributes, body scroll lock, a document-level keyboard listener and a
//! focus trap.  Every effect applied by [`ModalController::activate`] is
//! undone by [`ModalController::deactivate`], which is a no-op when no
//! session is open.
//!
//! Only one dialog may be open per page; the slot in [`crate::state`]
//! enforces it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::constants::{
    ATTR_ARIA_LABELLEDBY, ATTR_ARIA_MODAL, ATTR_ROLE, ATTR_TABINDEX, BACKDROP_CLASS,
    BODY_OPEN_CLASS, DIALOG_ROLE, TEMPORARY_TABINDEX,
};
use crate::dom::{DomHost, KeyOutcome, KeyPress, ListenerId};
use crate::dom_utils;
use crate::errors::ModalError;
use crate::messages::{CloseReason, DialogClosed};
use crate::state::{self, OwnerId, SessionToken};
use crate::{debug_log, warn_log};

pub type CloseObserver = Box<dyn FnMut(&DialogClosed)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Inactive,
    Active,
}

/// An attribute written during activation together with its prior value.
struct AttributeWrite<E> {
    element: E,
    name: &'static str,
    previous: Option<String>,
}

/// Live only while the dialog is open.
struct DialogSession<H: DomHost> {
    token: SessionToken,
    invoker: Option<H::Element>,
    backdrop: Option<H::Element>,
    backdrop_listener: Option<ListenerId>,
    key_listener: Option<ListenerId>,
    writes: Vec<AttributeWrite<H::Element>>,
}

struct Inner<H: DomHost> {
    host: H,
    target: H::Element,
    owner: OwnerId,
    session: RefCell<Option<DialogSession<H>>>,
    observer: RefCell<Option<CloseObserver>>,
}

pub struct ModalController<H: DomHost> {
    inner: Rc<Inner<H>>,
}

impl<H: DomHost> Clone for ModalController<H> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Non-owning handle, for listeners that must not keep the controller alive.
pub struct WeakModal<H: DomHost> {
    inner: Weak<Inner<H>>,
}

impl<H: DomHost> Clone for WeakModal<H> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<H: DomHost> WeakModal<H> {
    pub fn upgrade(&self) -> Option<ModalController<H>> {
        self.inner.upgrade().map(|inner| ModalController { inner })
    }
}

impl<H: DomHost> ModalController<H> {
    /// Fails with [`ModalError::Configuration`] when `target` is missing or
    /// not attached to the document.
    pub fn new(host: H, target: Option<H::Element>) -> Result<Self, ModalError> {
        let target = target.ok_or_else(|| {
            ModalError::Configuration("ModalController requires a dialog element".into())
        })?;
        if !host.is_connected(&target) {
            return Err(ModalError::Configuration(
                "ModalController dialog element is not attached to the document".into(),
            ));
        }

        Ok(Self {
            inner: Rc::new(Inner {
                host,
                target,
                owner: state::next_owner_id(),
                session: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        })
    }

    pub fn for_selector(host: H, selector: &str) -> Result<Self, ModalError> {
        let target = host.query(selector);
        if target.is_none() {
            return Err(ModalError::Configuration(format!(
                "no dialog element matches '{}'",
                selector
            )));
        }
        Self::new(host, target)
    }

    pub fn target(&self) -> &H::Element {
        &self.inner.target
    }

    pub fn state(&self) -> ModalState {
        if self.inner.session.borrow().is_some() {
            ModalState::Active
        } else {
            ModalState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == ModalState::Active
    }

    /// Register the single close observer, replacing any previous one.
    pub fn on_close(&self, observer: CloseObserver) {
        *self.inner.observer.borrow_mut() = Some(observer);
    }

    pub fn downgrade(&self) -> WeakModal<H> {
        WeakModal { inner: Rc::downgrade(&self.inner) }
    }

    /// Open a dialog session.  `invoker` is where focus returns on close;
    /// defaults to the currently focused element.
    ///
    /// Returns [`ModalError::InvariantViolation`] without side effects if any
    /// dialog session is already open.
    pub fn activate(&self, invoker: Option<&H::Element>) -> Result<(), ModalError> {
        let token = state::acquire(self.inner.owner)?;
        let session = self.inner.open(token, invoker.cloned());
        *self.inner.session.borrow_mut() = Some(session);
        Ok(())
    }

    /// Close the current session.  Returns `false` (and does nothing) when
    /// the dialog is not active.
    pub fn deactivate(&self) -> bool {
        Inner::close(&self.inner, CloseReason::Programmatic)
    }
}

impl<H: DomHost> Inner<H> {
    fn open(self: &Rc<Self>, token: SessionToken, invoker: Option<H::Element>) -> DialogSession<H> {
        let host = &self.host;

        // 1. Focus restoration target
        let invoker = invoker.or_else(|| host.active_element());

        let mut session = DialogSession {
            token,
            invoker,
            backdrop: None,
            backdrop_listener: None,
            key_listener: None,
            writes: Vec::new(),
        };

        // 2. Backdrop
        match host.append_overlay(BACKDROP_CLASS) {
            Ok(backdrop) => {
                let weak = Rc::downgrade(self);
                let listener = host.listen_click(
                    &backdrop,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            Inner::close(&inner, CloseReason::Backdrop);
                        }
                    }),
                );
                match listener {
                    Ok(id) => session.backdrop_listener = Some(id),
                    Err(e) => warn_log!("Backdrop click listener not registered: {}", e),
                }
                session.backdrop = Some(backdrop);
            }
            Err(e) => warn_log!("Modal backdrop could not be created: {}", e),
        }

        // 3. Dialog semantics
        self.write_attribute(&mut session, &self.target, ATTR_ROLE, DIALOG_ROLE);
        self.write_attribute(&mut session, &self.target, ATTR_ARIA_MODAL, "true");
        if host.attribute(&self.target, ATTR_ARIA_LABELLEDBY).is_none() {
            if let Some(heading) = dom_utils::first_visible_heading(host, &self.target) {
                let heading_id = match host.attribute(&heading, "id") {
                    Some(id) if !id.is_empty() => id,
                    _ => {
                        let id = format!("modal-heading-{}", self.owner.0);
                        self.write_attribute(&mut session, &heading, "id", &id);
                        id
                    }
                };
                self.write_attribute(&mut session, &self.target, ATTR_ARIA_LABELLEDBY, &heading_id);
            }
        }

        // 4. Scroll lock
        host.add_body_class(BODY_OPEN_CLASS);

        // 5. Keyboard
        let weak = Rc::downgrade(self);
        let listener = host.listen_keydown(Box::new(move |press: &KeyPress| match weak.upgrade() {
            Some(inner) => Inner::handle_key(&inner, press),
            None => KeyOutcome::PassThrough,
        }));
        match listener {
            Ok(id) => session.key_listener = Some(id),
            Err(e) => warn_log!("Modal keyboard listener not registered: {}", e),
        }

        // 6. Initial focus
        if !dom_utils::focus_first_interactive(host, &self.target) {
            warn_log!("Dialog has no focusable content; focusing the dialog container");
            if host.attribute(&self.target, ATTR_TABINDEX).is_none() {
                self.write_attribute(&mut session, &self.target, ATTR_TABINDEX, TEMPORARY_TABINDEX);
            }
            host.focus(&self.target);
        }

        debug_log!("Dialog #{} activated", self.owner.0);
        session
    }

    fn write_attribute(
        &self,
        session: &mut DialogSession<H>,
        element: &H::Element,
        name: &'static str,
        value: &str,
    ) {
        let previous = self.host.attribute(element, name);
        self.host.set_attribute(element, name, value);
        session.writes.push(AttributeWrite { element: element.clone(), name, previous });
    }

    fn handle_key(this: &Rc<Self>, press: &KeyPress) -> KeyOutcome {
        if this.session.borrow().is_none() {
            return KeyOutcome::PassThrough;
        }
        match press.key.as_str() {
            "Escape" => {
                Inner::close(this, CloseReason::Escape);
                KeyOutcome::Handled
            }
            "Tab" => this.trap_tab(press.shift),
            _ => KeyOutcome::PassThrough,
        }
    }

    fn trap_tab(&self, backwards: bool) -> KeyOutcome {
        let focusable = dom_utils::focusable_elements(&self.host, &self.target);
        let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
            return KeyOutcome::PassThrough;
        };

        let current = self.host.active_element();
        if backwards && current.as_ref() == Some(first) {
            self.host.focus(last);
            KeyOutcome::Handled
        } else if !backwards && current.as_ref() == Some(last) {
            self.host.focus(first);
            KeyOutcome::Handled
        } else {
            KeyOutcome::PassThrough
        }
    }

    fn close(this: &Rc<Self>, reason: CloseReason) -> bool {
        let Some(session) = this.session.borrow_mut().take() else {
            return false;
        };
        this.teardown(session);
        debug_log!("Dialog #{} closed ({:?})", this.owner.0, reason);

        // The observer runs with no borrow held so it may re-enter.
        let observer = this.observer.borrow_mut().take();
        if let Some(mut observer) = observer {
            observer(&DialogClosed { reason });
            let mut slot = this.observer.borrow_mut();
            if slot.is_none() {
                *slot = Some(observer);
            }
        }
        true
    }

    fn teardown(&self, session: DialogSession<H>) {
        let host = &self.host;
        let DialogSession { token, invoker, backdrop, backdrop_listener, key_listener, writes } =
            session;

        if let Some(id) = key_listener {
            host.unlisten(id);
        }
        if let Some(id) = backdrop_listener {
            host.unlisten(id);
        }
        if let Some(backdrop) = backdrop {
            host.remove_element(&backdrop);
        }

        for write in writes.into_iter().rev() {
            match write.previous {
                Some(value) => host.set_attribute(&write.element, write.name, &value),
                None => host.remove_attribute(&write.element, write.name),
            }
        }

        host.remove_body_class(BODY_OPEN_CLASS);

        if let Some(invoker) = invoker {
            if dom_utils::can_receive_focus(host, &invoker) {
                host.focus(&invoker);
            }
        }

        state::release(token);
    }
}

impl<H: DomHost> Drop for Inner<H> {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            self.teardown(session);
        }
    }
}
