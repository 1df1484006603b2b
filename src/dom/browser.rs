//! `DomHost` over the live browser document (web-sys).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use super::{ClickHandler, DelegatedHandler, DomHost, KeyHandler, KeyOutcome, KeyPress, ListenerId};

struct Registration {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Owns every closure handed to `addEventListener`.  A closure removed while
/// one of ours is still running (Escape tearing down its own keydown
/// listener) is parked in `retired` and dropped once dispatch has unwound.
#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    active: HashMap<u64, Registration>,
    retired: Vec<Closure<dyn FnMut(Event)>>,
}

#[derive(Clone)]
pub struct BrowserDom {
    document: Document,
    listeners: Rc<RefCell<ListenerRegistry>>,
    dispatch_depth: Rc<Cell<u32>>,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
            dispatch_depth: Rc::new(Cell::new(0)),
        }
    }

    /// Host bound to `window.document`, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }

    fn register(
        &self,
        target: EventTarget,
        event: &'static str,
        mut callback: Box<dyn FnMut(Event)>,
    ) -> Result<ListenerId, String> {
        let depth = self.dispatch_depth.clone();
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            depth.set(depth.get() + 1);
            callback(evt);
            depth.set(depth.get() - 1);
        }) as Box<dyn FnMut(Event)>);

        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| format!("addEventListener({}) failed: {:?}", event, e))?;

        let mut registry = self.listeners.borrow_mut();
        if self.dispatch_depth.get() == 0 {
            registry.retired.clear();
        }
        registry.next_id += 1;
        let id = registry.next_id;
        registry.active.insert(id, Registration { target, event, closure });
        Ok(ListenerId(id))
    }

    fn html_element(el: &Element) -> Option<&HtmlElement> {
        el.dyn_ref::<HtmlElement>()
    }

    /// Computed `visibility` is `hidden` or `collapse`.  Such elements keep
    /// their box but the browser will not focus them.
    fn is_visibility_hidden(&self, el: &Element) -> bool {
        let Some(window) = self.document.default_view() else {
            return false;
        };
        match window.get_computed_style(el) {
            Ok(Some(style)) => matches!(
                style.get_property_value("visibility").as_deref(),
                Ok("hidden") | Ok("collapse")
            ),
            _ => false,
        }
    }
}

impl DomHost for BrowserDom {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn descendants(&self, root: &Element) -> Vec<Element> {
        let Ok(list) = root.query_selector_all("*") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn contains(&self, root: &Element, el: &Element) -> bool {
        root.contains(Some(el.as_ref()))
    }

    fn tag_name(&self, el: &Element) -> String {
        el.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn is_connected(&self, el: &Element) -> bool {
        el.is_connected()
    }

    fn is_rendered(&self, el: &Element) -> bool {
        if !el.is_connected() || self.is_visibility_hidden(el) {
            return false;
        }
        match Self::html_element(el) {
            Some(html) => {
                html.offset_width() > 0
                    || html.offset_height() > 0
                    || el.get_client_rects().length() > 0
            }
            None => el.get_client_rects().length() > 0,
        }
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn remove_attribute(&self, el: &Element, name: &str) {
        let _ = el.remove_attribute(name);
    }

    fn add_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().remove_1(class);
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn set_inner_html(&self, el: &Element, html: &str) {
        el.set_inner_html(html);
    }

    fn inner_html(&self, el: &Element) -> String {
        el.inner_html()
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_displayed(&self, el: &Element, displayed: bool) {
        if let Some(html) = Self::html_element(el) {
            let style = html.style();
            if displayed {
                let _ = style.remove_property("display");
            } else {
                let _ = style.set_property("display", "none");
            }
        }
    }

    fn focus(&self, el: &Element) -> bool {
        match Self::html_element(el) {
            Some(html) => {
                let _ = html.focus();
                self.document.active_element().as_ref() == Some(el)
            }
            None => false,
        }
    }

    fn add_body_class(&self, class: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.class_list().add_1(class);
        }
    }

    fn remove_body_class(&self, class: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.class_list().remove_1(class);
        }
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.document
            .body()
            .map(|body| body.class_list().contains(class))
            .unwrap_or(false)
    }

    fn append_overlay(&self, class: &str) -> Result<Element, String> {
        let body = self.document.body().ok_or("document has no body")?;
        let el = self
            .document
            .create_element("div")
            .map_err(|e| format!("createElement failed: {:?}", e))?;
        el.set_class_name(class);
        body.append_child(&el)
            .map_err(|e| format!("appendChild failed: {:?}", e))?;
        Ok(el)
    }

    fn remove_element(&self, el: &Element) {
        el.remove();
    }

    fn listen_keydown(&self, mut handler: KeyHandler) -> Result<ListenerId, String> {
        let target: EventTarget = self.document.clone().into();
        self.register(
            target,
            "keydown",
            Box::new(move |evt: Event| {
                let Some(kev) = evt.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let press = KeyPress { key: kev.key(), shift: kev.shift_key() };
                if handler(&press) == KeyOutcome::Handled {
                    evt.prevent_default();
                }
            }),
        )
    }

    fn listen_click(&self, el: &Element, mut handler: ClickHandler) -> Result<ListenerId, String> {
        let target: EventTarget = el.clone().into();
        self.register(target, "click", Box::new(move |_evt: Event| handler()))
    }

    fn listen_delegated_click(
        &self,
        root: &Element,
        class: &str,
        mut handler: DelegatedHandler<Element>,
    ) -> Result<ListenerId, String> {
        let selector = format!(".{}", class);
        let root_clone = root.clone();
        let target: EventTarget = root.clone().into();
        self.register(
            target,
            "click",
            Box::new(move |evt: Event| {
                let Some(origin) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                if let Ok(Some(matched)) = origin.closest(&selector) {
                    if root_clone.contains(Some(matched.as_ref())) {
                        handler(&matched);
                    }
                }
            }),
        )
    }

    fn unlisten(&self, id: ListenerId) {
        let mut registry = self.listeners.borrow_mut();
        if let Some(reg) = registry.active.remove(&id.0) {
            let _ = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.closure.as_ref().unchecked_ref());
            registry.retired.push(reg.closure);
        }
    }
}
