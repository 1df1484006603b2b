//! Element-level DOM surface used by the modal controller and the views.
//!
//! Production code runs against [`BrowserDom`]; unit tests substitute an
//! in-memory implementation so the dialog state machine can be exercised on
//! the host target.

pub mod browser;

pub use browser::BrowserDom;

/// A single `keydown` as seen by a document-level listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string(), shift: false }
    }

    pub fn with_shift(key: &str) -> Self {
        Self { key: key.to_string(), shift: true }
    }
}

/// Whether a keyboard handler consumed the event.  `Handled` suppresses the
/// browser default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    PassThrough,
}

/// Opaque handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type KeyHandler = Box<dyn FnMut(&KeyPress) -> KeyOutcome>;
pub type ClickHandler = Box<dyn FnMut()>;
/// Receives the element that matched the delegation class.
pub type DelegatedHandler<E> = Box<dyn FnMut(&E)>;

pub trait DomHost: Clone + 'static {
    type Element: Clone + PartialEq + 'static;

    // Lookup ---------------------------------------------------------------
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// All element descendants of `root` in document order.
    fn descendants(&self, root: &Self::Element) -> Vec<Self::Element>;
    fn active_element(&self) -> Option<Self::Element>;
    fn contains(&self, root: &Self::Element, el: &Self::Element) -> bool;

    // Element facts --------------------------------------------------------
    /// Lower-case tag name.
    fn tag_name(&self, el: &Self::Element) -> String;
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn is_connected(&self, el: &Self::Element) -> bool;
    /// Attached and occupying layout space.
    fn is_rendered(&self, el: &Self::Element) -> bool;

    // Mutation -------------------------------------------------------------
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&self, el: &Self::Element, name: &str);
    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    fn set_inner_html(&self, el: &Self::Element, html: &str);
    fn inner_html(&self, el: &Self::Element) -> String;
    fn set_text(&self, el: &Self::Element, text: &str);
    fn set_displayed(&self, el: &Self::Element, displayed: bool);
    /// Returns `false` when the element did not accept focus.
    fn focus(&self, el: &Self::Element) -> bool;

    // Document body --------------------------------------------------------
    fn add_body_class(&self, class: &str);
    fn remove_body_class(&self, class: &str);
    fn body_has_class(&self, class: &str) -> bool;
    /// Create a `<div class="{class}">` and append it to the body.
    fn append_overlay(&self, class: &str) -> Result<Self::Element, String>;
    fn remove_element(&self, el: &Self::Element);

    // Listeners ------------------------------------------------------------
    fn listen_keydown(&self, handler: KeyHandler) -> Result<ListenerId, String>;
    fn listen_click(&self, el: &Self::Element, handler: ClickHandler) -> Result<ListenerId, String>;
    /// Click listener on `root` that fires for clicks landing on (or inside)
    /// a descendant carrying `class`.
    fn listen_delegated_click(
        &self,
        root: &Self::Element,
        class: &str,
        handler: DelegatedHandler<Self::Element>,
    ) -> Result<ListenerId, String>;
    /// Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);
}
