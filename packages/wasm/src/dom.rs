//! # DOM Bindings
//!
//! [`DomTree`] is the browser implementation of [`RenderTree`]: element ids
//! resolve through `document.getElementById` and rendered [`VNode`]s are
//! parsed through a `<template>` element.
//!
//! [`EventListener`] owns a registered callback and unregisters it on drop.

use std::cell::RefCell;

use recipebook_editor::{to_html, HtmlOptions, RenderTree, VNode};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlTemplateElement, Node};

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to a concrete element type
pub fn element_as<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_display(element: &Element, display: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("display", display);
    }
}

/// Live document viewed as a [`RenderTree`]
#[derive(Debug, Clone)]
pub struct DomTree {
    document: Document,
}

impl DomTree {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self, JsValue> {
        Ok(Self::new(document()?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Parse a rendered node into a detached DOM node
    pub fn build(&self, node: &VNode) -> Result<Node, JsValue> {
        let template: HtmlTemplateElement = self
            .document
            .create_element("template")?
            .dyn_into()
            .map_err(JsValue::from)?;
        template.set_inner_html(&to_html(node, &HtmlOptions::compact()));
        template
            .content()
            .first_child()
            .ok_or_else(|| JsValue::from_str("rendered node is empty"))
    }

    fn build_logged(&self, node: &VNode) -> Option<Node> {
        match self.build(node) {
            Ok(built) => Some(built),
            Err(err) => {
                warn!(error = ?err, "Failed to build element");
                None
            }
        }
    }
}

impl RenderTree for DomTree {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn append_child(&mut self, parent_id: &str, node: &VNode) -> bool {
        let Some(parent) = self.element(parent_id) else {
            return false;
        };
        let Some(built) = self.build_logged(node) else {
            return false;
        };
        parent.append_child(&built).is_ok()
    }

    fn insert_before(&mut self, parent_id: &str, id: &str, reference_id: Option<&str>) -> bool {
        let (Some(parent), Some(element)) = (self.element(parent_id), self.element(id)) else {
            return false;
        };
        let reference: Option<Node> = match reference_id {
            Some(reference_id) => match self.element(reference_id) {
                Some(reference) => Some(reference.into()),
                None => return false,
            },
            None => None,
        };
        parent.insert_before(&element, reference.as_ref()).is_ok()
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.element(id) {
            Some(element) => {
                element.remove();
                true
            }
            None => false,
        }
    }

    fn child_ids(&self, parent_id: &str) -> Vec<String> {
        let Some(parent) = self.element(parent_id) else {
            return Vec::new();
        };
        let children = parent.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(|child| child.id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn replace_children(&mut self, id: &str, node: &VNode) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        let Some(built) = self.build_logged(node) else {
            return false;
        };
        element.set_inner_html("");
        element.append_child(&built).is_ok()
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().add_1(class).is_ok())
            .unwrap_or(false)
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().remove_1(class).is_ok())
            .unwrap_or(false)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }
}

/// A registered DOM event callback, removed again on drop
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

thread_local! {
    static PAGE_LISTENERS: RefCell<Vec<EventListener>> = const { RefCell::new(Vec::new()) };
}

/// Keep a listener registered for the rest of the page's life
pub fn retain(listener: EventListener) {
    PAGE_LISTENERS.with(|listeners| listeners.borrow_mut().push(listener));
}
