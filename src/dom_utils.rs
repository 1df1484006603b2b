//! dom_utils.rs – focus management helpers shared by the modal controller.
//!
//! The focusable-element definition lives here and only here: initial focus
//! placement and the Tab trap both call [`focusable_elements`], so the two
//! can never disagree about what "first" and "last" mean.

use crate::constants::ATTR_TABINDEX;
use crate::dom::DomHost;

const NATIVE_CONTROLS: [&str; 4] = ["button", "input", "textarea", "select"];

/// Parsed `tabindex`, ignoring values that are not integers.
fn tab_index(attr: &dyn Fn(&str) -> Option<String>) -> Option<i32> {
    attr(ATTR_TABINDEX).and_then(|v| v.trim().parse::<i32>().ok())
}

/// Pure predicate: is an element with this tag and these attributes part of
/// the keyboard tab sequence?  Visibility is checked separately.
pub fn is_tabbable(tag: &str, attr: &dyn Fn(&str) -> Option<String>) -> bool {
    if NATIVE_CONTROLS.contains(&tag) && attr("disabled").is_some() {
        return false;
    }
    match tab_index(attr) {
        Some(idx) if idx < 0 => return false,
        Some(_) => return true,
        None => {}
    }

    match tag {
        "a" => attr("href").is_some(),
        "input" if attr("type").map(|t| t.eq_ignore_ascii_case("hidden")).unwrap_or(false) => false,
        t => NATIVE_CONTROLS.contains(&t),
    }
}

/// Visible, tabbable descendants of `root` in document order.  Recomputed
/// on every call; content can change while a dialog is open.
pub fn focusable_elements<H: DomHost>(host: &H, root: &H::Element) -> Vec<H::Element> {
    host.descendants(root)
        .into_iter()
        .filter(|el| {
            let tag = host.tag_name(el);
            is_tabbable(&tag, &|name| host.attribute(el, name)) && host.is_rendered(el)
        })
        .collect()
}

/// Focus the first focusable descendant.  Returns `false` if there is none.
pub fn focus_first_interactive<H: DomHost>(host: &H, container: &H::Element) -> bool {
    match focusable_elements(host, container).first() {
        Some(first) => host.focus(first),
        None => false,
    }
}

/// Whether focus can be handed back to `el` (focus restoration target).
pub fn can_receive_focus<H: DomHost>(host: &H, el: &H::Element) -> bool {
    host.is_connected(el) && host.is_rendered(el) && host.attribute(el, "disabled").is_none()
}

/// First rendered `h1`–`h6` inside `container`.
pub fn first_visible_heading<H: DomHost>(host: &H, container: &H::Element) -> Option<H::Element> {
    host.descendants(container).into_iter().find(|el| {
        let tag = host.tag_name(el);
        matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") && host.is_rendered(el)
    })
}
