//! Toast messages rendered into the page
//!
//! One [`MessageCenter`] per page. Close buttons are handled by a single
//! delegated listener on the messages container.

use std::cell::RefCell;

use recipebook_widgets::messages::{
    container_markup, message_element_id, take_stored_messages, SHOW_CLASS,
};
use recipebook_widgets::{MessageCenter, MessageConfig, MessageKind, ShownMessage};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::{self, DomTree, EventListener};
use crate::storage::LocalStorage;

thread_local! {
    static CENTER: RefCell<MessageCenter> = RefCell::new(MessageCenter::new(MessageConfig::default()));
    static CLOSE_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Show a toast; `kind` is `success`, `error`, `warning` or `info`
#[wasm_bindgen(js_name = showMessage)]
pub fn show_message_js(text: &str, kind: Option<String>, duration_ms: Option<u32>) -> Result<(), JsValue> {
    let kind = kind
        .as_deref()
        .and_then(MessageKind::from_name)
        .unwrap_or_default();
    let shown = CENTER.with(|center| {
        let mut center = center.borrow_mut();
        let duration = duration_ms.unwrap_or(center.config().duration_ms);
        center.show_for(text, kind, duration)
    });
    present(shown)
}

pub fn show_message(text: &str, kind: MessageKind) {
    let shown = CENTER.with(|center| center.borrow_mut().show(text, kind));
    if let Err(err) = present(shown) {
        warn!(error = ?err, "Failed to show message");
    }
}

/// Show the messages queued by the previous page
#[wasm_bindgen(js_name = showStoredMessages)]
pub fn show_stored_messages() -> Result<(), JsValue> {
    let store = LocalStorage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let stored = take_stored_messages(&store).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let shown = CENTER.with(|center| center.borrow_mut().show_stored(&stored));
    for message in shown {
        present(message)?;
    }
    Ok(())
}

fn container() -> Result<Element, JsValue> {
    let tree = DomTree::from_window()?;
    let container_id = CENTER.with(|center| center.borrow().config().container_id.clone());

    let container = match tree.element(&container_id) {
        Some(container) => container,
        None => {
            let body = tree
                .document()
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?;
            let built = tree.build(&container_markup(&container_id))?;
            body.append_child(&built)?;
            built.dyn_into::<Element>().map_err(JsValue::from)?
        }
    };

    let bound = CLOSE_LISTENER.with(|slot| slot.borrow().is_some());
    if !bound {
        let listener = EventListener::new(&container, "click", |event| {
            let id = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".messages__close").ok().flatten())
                .and_then(|button| button.get_attribute("data-message"))
                .and_then(|id| id.parse::<u32>().ok());
            if let Some(id) = id {
                hide(id);
            }
        })?;
        CLOSE_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    }
    Ok(container)
}

fn present(shown: ShownMessage) -> Result<(), JsValue> {
    let container = container()?;
    let tree = DomTree::from_window()?;
    let element = tree.build(&shown.markup)?;
    container.append_child(&element)?;

    let window = dom::window()?;
    let element_id = message_element_id(shown.id);
    let reveal = Closure::once_into_js(move || {
        if let Ok(tree) = DomTree::from_window() {
            if let Some(el) = tree.element(&element_id) {
                let _ = el.class_list().add_1(SHOW_CLASS);
            }
        }
    });
    window.request_animation_frame(reveal.unchecked_ref())?;

    if let Some(delay) = shown.hide_after_ms {
        let id = shown.id;
        let hide_later = Closure::once_into_js(move || hide(id));
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide_later.unchecked_ref(),
            delay as i32,
        )?;
    }
    Ok(())
}

fn hide(id: u32) {
    let Some(delay) = CENTER.with(|center| center.borrow_mut().hide(id)) else {
        return;
    };
    let Ok(tree) = DomTree::from_window() else {
        return;
    };
    let element_id = message_element_id(id);
    if let Some(el) = tree.element(&element_id) {
        let _ = el.class_list().remove_1(SHOW_CLASS);
    }

    let remove_later = Closure::once_into_js(move || {
        if let Ok(tree) = DomTree::from_window() {
            if let Some(el) = tree.element(&element_id) {
                el.remove();
            }
        }
        CENTER.with(|center| center.borrow_mut().remove(id));
    });
    let scheduled = dom::window().and_then(|window| {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove_later.unchecked_ref(),
            delay as i32,
        )
    });
    if let Err(err) = scheduled {
        warn!(message = id, error = ?err, "Failed to schedule message removal");
    }
}
