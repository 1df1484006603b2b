//! In-memory `DomHost` for host-target tests.
//!
//! Models just enough of a document for the dialog code: an element tree
//! built from markup, attributes/classes, layout visibility, browser-like
//! focus rules (elements that are not focusable ignore `focus()`), and
//! synthetic keydown / click dispatch honouring listener removal mid-dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{ClickHandler, DelegatedHandler, DomHost, KeyHandler, KeyOutcome, KeyPress, ListenerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const TEXT_TAG: &str = "#text";
const VOID_TAGS: [&str; 6] = ["input", "br", "img", "hr", "meta", "link"];

struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    displayed: bool,
    zero_size: bool,
}

impl Node {
    fn element(tag: &str, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.to_string(),
            attrs,
            text: String::new(),
            children: Vec::new(),
            parent: None,
            displayed: true,
            zero_size: false,
        }
    }

    fn text(text: &str) -> Self {
        let mut node = Self::element(TEXT_TAG, Vec::new());
        node.text = text.to_string();
        node
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn classes(&self) -> Vec<&str> {
        self.attr("class").map(|c| c.split_whitespace().collect()).unwrap_or_default()
    }
}

enum Listener {
    Keydown(Rc<RefCell<KeyHandler>>),
    Click(NodeId, Rc<RefCell<ClickHandler>>),
    Delegated(NodeId, String, Rc<RefCell<DelegatedHandler<NodeId>>>),
}

struct Tree {
    nodes: Vec<Node>,
    body: NodeId,
    active: Option<NodeId>,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
    fail_overlays: bool,
}

impl Tree {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != child);
        }
    }

    fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut cur = id;
        while let Some(parent) = self.node(cur).parent {
            path.push(parent);
            cur = parent;
        }
        path
    }

    fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors_inclusive(id).last() == Some(&self.body)
    }

    fn is_rendered(&self, id: NodeId) -> bool {
        self.is_connected(id)
            && self
                .ancestors_inclusive(id)
                .iter()
                .all(|n| self.node(*n).displayed && !self.node(*n).zero_size)
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.node(id).tag == TEXT_TAG {
                continue;
            }
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let node = self.node_mut(id);
        match node.attrs.iter().position(|(k, _)| k == name) {
            Some(pos) => node.attrs[pos].1 = value.to_string(),
            None => node.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).attrs.retain(|(k, _)| k != name);
    }

    fn add_class(&mut self, id: NodeId, class: &str) {
        let mut classes: Vec<String> = self.node(id).classes().iter().map(|c| c.to_string()).collect();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.set_attr(id, "class", &classes.join(" "));
    }

    fn remove_class(&mut self, id: NodeId, class: &str) {
        let classes: Vec<String> = self
            .node(id)
            .classes()
            .into_iter()
            .filter(|c| *c != class)
            .map(|c| c.to_string())
            .collect();
        self.set_attr(id, "class", &classes.join(" "));
    }

    /// Browser rule of thumb: natively focusable controls and anything with
    /// a tabindex, when rendered and enabled.
    fn accepts_focus(&self, id: NodeId) -> bool {
        let node = self.node(id);
        if !self.is_rendered(id) || node.attr("disabled").is_some() {
            return false;
        }
        if node.attr("tabindex").map(|v| v.trim().parse::<i32>().is_ok()).unwrap_or(false) {
            return true;
        }
        match node.tag.as_str() {
            "a" => node.attr("href").is_some(),
            "button" | "input" | "textarea" | "select" => true,
            _ => false,
        }
    }

    fn build(&mut self, parent: NodeId, parsed: Vec<Parsed>) {
        for item in parsed {
            match item {
                Parsed::Text(text) => {
                    let id = self.push(Node::text(&text));
                    self.append(parent, id);
                }
                Parsed::Element { tag, attrs, children } => {
                    let id = self.push(Node::element(&tag, attrs));
                    self.append(parent, id);
                    self.build(id, children);
                }
            }
        }
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        if node.tag == TEXT_TAG {
            out.push_str(&node.text);
            return;
        }
        out.push('<');
        out.push_str(&node.tag);
        for (k, v) in &node.attrs {
            out.push_str(&format!(" {}=\"{}\"", k, v));
        }
        out.push('>');
        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }
        for child in &node.children {
            self.serialize(*child, out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }

    fn register(&mut self, listener: Listener) -> ListenerId {
        self.next_listener += 1;
        self.listeners.push((self.next_listener, listener));
        ListenerId(self.next_listener)
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.iter().any(|(l, _)| *l == id)
    }
}

#[derive(Clone)]
pub struct FakeDom {
    tree: Rc<RefCell<Tree>>,
}

impl FakeDom {
    /// Empty document; `body_html` becomes the body content.
    pub fn new(body_html: &str) -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            body: NodeId(0),
            active: None,
            listeners: Vec::new(),
            next_listener: 0,
            fail_overlays: false,
        };
        let body = tree.push(Node::element("body", Vec::new()));
        tree.body = body;
        tree.build(body, parse_fragment(body_html));
        Self { tree: Rc::new(RefCell::new(tree)) }
    }

    pub fn body(&self) -> NodeId {
        self.tree.borrow().body
    }

    pub fn by_id(&self, id: &str) -> NodeId {
        self.query(&format!("#{}", id)).unwrap_or_else(|| panic!("no element #{}", id))
    }

    /// An element that was never attached to the document.
    pub fn detached(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().push(Node::element(tag, Vec::new()))
    }

    pub fn append_html(&self, parent: NodeId, html: &str) {
        self.tree.borrow_mut().build(parent, parse_fragment(html));
    }

    pub fn detach(&self, el: NodeId) {
        self.tree.borrow_mut().detach(el);
    }

    pub fn set_zero_size(&self, el: NodeId, zero: bool) {
        self.tree.borrow_mut().node_mut(el).zero_size = zero;
    }

    pub fn fail_overlays(&self) {
        self.tree.borrow_mut().fail_overlays = true;
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active_element()
    }

    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    pub fn keydown_listener_count(&self) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| matches!(l, Listener::Keydown(_)))
            .count()
    }

    /// Connected elements carrying `class`.
    pub fn count_class(&self, class: &str) -> usize {
        let tree = self.tree.borrow();
        let body = tree.body;
        tree.descendants(body)
            .into_iter()
            .filter(|id| tree.node(*id).classes().contains(&class))
            .count()
    }

    pub fn first_with_class(&self, class: &str) -> Option<NodeId> {
        self.query(&format!(".{}", class))
    }

    pub fn text_of(&self, el: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        let mut stack = vec![el];
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            if node.tag == TEXT_TAG {
                out.push_str(&node.text);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Dispatch a document keydown.  `Handled` if any listener suppressed
    /// the default.
    pub fn press(&self, press: KeyPress) -> KeyOutcome {
        let handlers: Vec<(u64, Rc<RefCell<KeyHandler>>)> = self
            .tree
            .borrow()
            .listeners
            .iter()
            .filter_map(|(id, l)| match l {
                Listener::Keydown(h) => Some((*id, h.clone())),
                _ => None,
            })
            .collect();

        let mut outcome = KeyOutcome::PassThrough;
        for (id, handler) in handlers {
            if !self.tree.borrow().is_registered(id) {
                continue;
            }
            if (&mut *handler.borrow_mut())(&press) == KeyOutcome::Handled {
                outcome = KeyOutcome::Handled;
            }
        }
        outcome
    }

    pub fn press_key(&self, key: &str) -> KeyOutcome {
        self.press(KeyPress::new(key))
    }

    pub fn press_shift_tab(&self) -> KeyOutcome {
        self.press(KeyPress::with_shift("Tab"))
    }

    /// Dispatch a click on `el`, reaching direct listeners and delegated
    /// listeners on its ancestors.
    pub fn click(&self, el: NodeId) {
        enum Call {
            Direct(Rc<RefCell<ClickHandler>>),
            Delegated(NodeId, Rc<RefCell<DelegatedHandler<NodeId>>>),
        }

        let calls: Vec<(u64, Call)> = {
            let tree = self.tree.borrow();
            let path = tree.ancestors_inclusive(el);
            let mut calls = Vec::new();
            for (id, listener) in &tree.listeners {
                match listener {
                    Listener::Click(target, h) if *target == el => {
                        calls.push((*id, Call::Direct(h.clone())));
                    }
                    Listener::Delegated(root, class, h) => {
                        let Some(root_pos) = path.iter().position(|n| n == root) else {
                            continue;
                        };
                        let matched = path[..=root_pos]
                            .iter()
                            .find(|n| tree.node(**n).classes().contains(&class.as_str()));
                        if let Some(matched) = matched {
                            calls.push((*id, Call::Delegated(*matched, h.clone())));
                        }
                    }
                    _ => {}
                }
            }
            calls
        };

        for (id, call) in calls {
            if !self.tree.borrow().is_registered(id) {
                continue;
            }
            match call {
                Call::Direct(h) => (&mut *h.borrow_mut())(),
                Call::Delegated(matched, h) => (&mut *h.borrow_mut())(&matched),
            }
        }
    }
}

impl DomHost for FakeDom {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let body = tree.body;
        let matches = |id: &NodeId| {
            let node = tree.node(*id);
            if let Some(id_sel) = selector.strip_prefix('#') {
                node.attr("id") == Some(id_sel)
            } else if let Some(class) = selector.strip_prefix('.') {
                node.classes().contains(&class)
            } else {
                node.tag == selector
            }
        };
        if matches(&body) {
            return Some(body);
        }
        tree.descendants(body).into_iter().find(|id| matches(id))
    }

    fn descendants(&self, root: &NodeId) -> Vec<NodeId> {
        self.tree.borrow().descendants(*root)
    }

    fn active_element(&self) -> Option<NodeId> {
        let tree = self.tree.borrow();
        match tree.active {
            Some(id) if tree.is_connected(id) => Some(id),
            _ => Some(tree.body),
        }
    }

    fn contains(&self, root: &NodeId, el: &NodeId) -> bool {
        self.tree.borrow().ancestors_inclusive(*el).contains(root)
    }

    fn tag_name(&self, el: &NodeId) -> String {
        self.tree.borrow().node(*el).tag.clone()
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(*el).attr(name).map(str::to_string)
    }

    fn is_connected(&self, el: &NodeId) -> bool {
        self.tree.borrow().is_connected(*el)
    }

    fn is_rendered(&self, el: &NodeId) -> bool {
        self.tree.borrow().is_rendered(*el)
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.tree.borrow_mut().set_attr(*el, name, value);
    }

    fn remove_attribute(&self, el: &NodeId, name: &str) {
        self.tree.borrow_mut().remove_attr(*el, name);
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        self.tree.borrow_mut().add_class(*el, class);
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        self.tree.borrow_mut().remove_class(*el, class);
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.tree.borrow().node(*el).classes().contains(&class)
    }

    fn set_inner_html(&self, el: &NodeId, html: &str) {
        let mut tree = self.tree.borrow_mut();
        let children = tree.node(*el).children.clone();
        for child in children {
            tree.detach(child);
        }
        tree.build(*el, parse_fragment(html));
    }

    fn inner_html(&self, el: &NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        for child in &tree.node(*el).children {
            tree.serialize(*child, &mut out);
        }
        out
    }

    fn set_text(&self, el: &NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        let children = tree.node(*el).children.clone();
        for child in children {
            tree.detach(child);
        }
        let id = tree.push(Node::text(text));
        tree.append(*el, id);
    }

    fn set_displayed(&self, el: &NodeId, displayed: bool) {
        self.tree.borrow_mut().node_mut(*el).displayed = displayed;
    }

    fn focus(&self, el: &NodeId) -> bool {
        let mut tree = self.tree.borrow_mut();
        if tree.accepts_focus(*el) {
            tree.active = Some(*el);
            true
        } else {
            false
        }
    }

    fn add_body_class(&self, class: &str) {
        let body = self.body();
        self.tree.borrow_mut().add_class(body, class);
    }

    fn remove_body_class(&self, class: &str) {
        let body = self.body();
        self.tree.borrow_mut().remove_class(body, class);
    }

    fn body_has_class(&self, class: &str) -> bool {
        let body = self.body();
        self.has_class(&body, class)
    }

    fn append_overlay(&self, class: &str) -> Result<NodeId, String> {
        let mut tree = self.tree.borrow_mut();
        if tree.fail_overlays {
            return Err("overlay creation disabled".into());
        }
        let id = tree.push(Node::element("div", vec![("class".into(), class.to_string())]));
        let body = tree.body;
        tree.append(body, id);
        Ok(id)
    }

    fn remove_element(&self, el: &NodeId) {
        self.tree.borrow_mut().detach(*el);
    }

    fn listen_keydown(&self, handler: KeyHandler) -> Result<ListenerId, String> {
        Ok(self.tree.borrow_mut().register(Listener::Keydown(Rc::new(RefCell::new(handler)))))
    }

    fn listen_click(&self, el: &NodeId, handler: ClickHandler) -> Result<ListenerId, String> {
        Ok(self
            .tree
            .borrow_mut()
            .register(Listener::Click(*el, Rc::new(RefCell::new(handler)))))
    }

    fn listen_delegated_click(
        &self,
        root: &NodeId,
        class: &str,
        handler: DelegatedHandler<NodeId>,
    ) -> Result<ListenerId, String> {
        Ok(self.tree.borrow_mut().register(Listener::Delegated(
            *root,
            class.to_string(),
            Rc::new(RefCell::new(handler)),
        )))
    }

    fn unlisten(&self, id: ListenerId) {
        self.tree.borrow_mut().listeners.retain(|(l, _)| *l != id.0);
    }
}

// ---------------------------------------------------------------------------
// Markup parsing (enough for templates and test fixtures)
// ---------------------------------------------------------------------------

enum Parsed {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Parsed>,
    },
    Text(String),
}

fn parse_attrs(src: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut rest = src.trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let mut value = String::new();
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'');
            match quote {
                Some(q) => {
                    let body = &after_eq[1..];
                    let end = body.find(q).unwrap_or(body.len());
                    value = body[..end].to_string();
                    rest = body.get(end + 1..).unwrap_or("");
                }
                None => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    value = after_eq[..end].to_string();
                    rest = &after_eq[end..];
                }
            }
        }
        if !name.is_empty() {
            attrs.push((name, value));
        }
        rest = rest.trim_start();
    }
    attrs
}

/// Index of the `>` closing the tag that starts at `src[0] == '<'`,
/// ignoring `>` inside quoted attribute values.
fn tag_end(src: &str) -> usize {
    let mut quote: Option<char> = None;
    for (i, c) in src.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return i,
            _ => {}
        }
    }
    src.len()
}

fn close_into_parent(stack: &mut Vec<(String, Vec<(String, String)>, Vec<Parsed>)>) {
    let (tag, attrs, children) = stack.pop().expect("open element");
    stack
        .last_mut()
        .expect("fragment root")
        .2
        .push(Parsed::Element { tag, attrs, children });
}

fn parse_fragment(html: &str) -> Vec<Parsed> {
    let mut stack: Vec<(String, Vec<(String, String)>, Vec<Parsed>)> =
        vec![(String::new(), Vec::new(), Vec::new())];
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map(|i| &comment[i + 3..]).unwrap_or("");
        } else if let Some(after) = rest.strip_prefix("</") {
            let end = after.find('>').unwrap_or(after.len());
            let name = after[..end].trim().to_ascii_lowercase();
            rest = after.get(end + 1..).unwrap_or("");
            if stack.iter().skip(1).any(|(tag, _, _)| *tag == name) {
                loop {
                    let done = stack.last().map(|(tag, _, _)| *tag == name).unwrap_or(true);
                    close_into_parent(&mut stack);
                    if done {
                        break;
                    }
                }
            }
        } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            let end = tag_end(rest);
            let inner = &rest[1..end];
            rest = rest.get(end + 1..).unwrap_or("");

            let self_closing = inner.trim_end().ends_with('/');
            let inner = inner.trim_end().trim_end_matches('/');
            let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
            let tag = inner[..name_end].to_ascii_lowercase();
            let attrs = parse_attrs(&inner[name_end..]);

            if self_closing || VOID_TAGS.contains(&tag.as_str()) {
                stack
                    .last_mut()
                    .expect("fragment root")
                    .2
                    .push(Parsed::Element { tag, attrs, children: Vec::new() });
            } else {
                stack.push((tag, attrs, Vec::new()));
            }
        } else {
            let end = rest
                .char_indices()
                .skip(1)
                .find(|(_, c)| *c == '<')
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            stack
                .last_mut()
                .expect("fragment root")
                .2
                .push(Parsed::Text(rest[..end].to_string()));
            rest = &rest[end..];
        }
    }

    while stack.len() > 1 {
        close_into_parent(&mut stack);
    }
    stack.pop().map(|(_, _, children)| children).unwrap_or_default()
}

#[test]
fn parses_nested_markup_and_round_trips() {
    let dom = FakeDom::new(r#"<div id="p"><button class="a b" id="x">Go</button><input type="text"><p>hi</p></div>"#);
    let p = dom.by_id("p");
    assert_eq!(dom.descendants(&p).len(), 3);
    assert!(dom.has_class(&dom.by_id("x"), "b"));
    assert_eq!(
        dom.inner_html(&p),
        r#"<button class="a b" id="x">Go</button><input type="text"><p>hi</p>"#
    );
}
