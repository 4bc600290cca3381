//! In-memory element tree implementing [`FocusHost`].

use slotmap::{SlotMap, new_key_type};

use super::FocusHost;

new_key_type! {
    /// Identifier of an element in an [`ElementTree`].
    pub struct ElementId;
}

/// What kind of element a node is, as far as focusability goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `<a>`; only focusable with an `href`.
    Anchor { href: Option<String> },
    Button,
    Input,
    TextArea,
    Select,
    /// Anything else (`div`, `section`, dialogs, ...).
    Generic,
}

#[derive(Debug)]
struct ElementData {
    kind: ElementKind,
    disabled: bool,
    tab_index: Option<i32>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl ElementData {
    fn is_focusable(&self) -> bool {
        if let Some(tab_index) = self.tab_index
            && tab_index != -1
        {
            return true;
        }
        match &self.kind {
            ElementKind::Anchor { href } => href.is_some(),
            ElementKind::Button
            | ElementKind::Input
            | ElementKind::TextArea
            | ElementKind::Select => !self.disabled,
            ElementKind::Generic => false,
        }
    }
}

/// A document-like arena of elements with a single active element.
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: SlotMap<ElementId, ElementData>,
    active: Option<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root-level element.
    pub fn add_root(&mut self, kind: ElementKind) -> ElementId {
        self.elements.insert(ElementData {
            kind,
            disabled: false,
            tab_index: None,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Append a child to `parent`. Returns `None` if `parent` is gone.
    pub fn add_child(&mut self, parent: ElementId, kind: ElementKind) -> Option<ElementId> {
        if !self.elements.contains_key(parent) {
            return None;
        }
        let id = self.elements.insert(ElementData {
            kind,
            disabled: false,
            tab_index: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.elements[parent].children.push(id);
        Some(id)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.disabled = disabled;
        }
    }

    pub fn set_tab_index(&mut self, id: ElementId, tab_index: Option<i32>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.tab_index = tab_index;
        }
    }

    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.elements.get(id).map(|e| &e.kind)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }

    pub fn is_focusable(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(ElementData::is_focusable)
    }

    /// Remove an element and its whole subtree.
    ///
    /// If the active element was inside the subtree, nothing is focused
    /// afterwards.
    pub fn remove(&mut self, id: ElementId) {
        let Some(parent) = self.elements.get(id).map(|e| e.parent) else {
            return;
        };
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.elements.remove(current) {
                if self.active == Some(current) {
                    self.active = None;
                }
                stack.extend(data.children);
            }
        }
    }

    /// Drop focus from whatever has it.
    pub fn blur(&mut self) {
        self.active = None;
    }

    fn collect_focusable(&self, id: ElementId, order: &mut Vec<ElementId>) {
        let Some(element) = self.elements.get(id) else {
            return;
        };
        if element.is_focusable() {
            order.push(id);
        }
        for &child in &element.children {
            self.collect_focusable(child, order);
        }
    }
}

impl FocusHost for ElementTree {
    type Element = ElementId;

    fn focusable_descendants(&self, container: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        for &child in self.children(container) {
            self.collect_focusable(child, &mut order);
        }
        order
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, element: ElementId) {
        if self.elements.contains_key(element) {
            self.active = Some(element);
        }
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }
}
