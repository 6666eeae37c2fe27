//! Tag input and password form bindings

use std::cell::RefCell;
use std::rc::Rc;

use recipebook_widgets::password::{check_password, confirm_error, Visibility};
use recipebook_widgets::tags::{tag_markup, TAG_CLASS, TAG_REMOVE_CLASS};
use recipebook_widgets::{KeyOutcome, TagInput, WidgetError};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::dom::{self, element_as, set_display, DomTree, EventListener};

const FIELD_CLASS: &str = ".form__field";
const FIELD_ERROR_CLASS: &str = "form__field--error";

/// Tag entry bound to an input and the container holding its chips
pub struct TagInputBinding {
    _listeners: Vec<EventListener>,
}

impl TagInputBinding {
    pub fn mount(document: &Document, input_id: &str, container_id: &str) -> Result<Self, WidgetError> {
        let input: HtmlInputElement = element_as(document, input_id)
            .ok_or_else(|| WidgetError::MissingElement(input_id.to_string()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| WidgetError::MissingElement(container_id.to_string()))?;

        let tags = Rc::new(RefCell::new(TagInput::new(input_id, container_id)));
        let tree = DomTree::new(document.clone());
        let mut listeners = Vec::with_capacity(2);

        {
            let tags = tags.clone();
            let container = container.clone();
            let field = input.clone();
            listeners.push(listen(&input, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                let outcome = tags.borrow_mut().key_down(&key, &field.value());
                if outcome.prevent_default() {
                    event.prevent_default();
                }
                if let KeyOutcome::Committed(tag) = outcome {
                    match tree.build(&tag_markup(&tag)) {
                        Ok(chip) => {
                            let anchor: &web_sys::Node = &field;
                            let _ = container.insert_before(&chip, Some(anchor));
                            field.set_value("");
                        }
                        Err(err) => warn!(error = ?err, "Failed to render tag"),
                    }
                }
            })?);
        }

        {
            let container_el = container.clone();
            listeners.push(listen(&container, "click", move |event| {
                let Some(chip) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&format!(".{}", TAG_REMOVE_CLASS)).ok().flatten())
                    .and_then(|remove| remove.closest(&format!(".{}", TAG_CLASS)).ok().flatten())
                else {
                    return;
                };
                if let Some(index) = chip_index(&container_el, &chip) {
                    tags.borrow_mut().remove(index);
                }
                chip.remove();
            })?);
        }

        debug!(input = %input_id, container = %container_id, "Tag input mounted");
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn listen(
    target: &web_sys::EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<EventListener, WidgetError> {
    EventListener::new(target, event, handler)
        .map_err(|err| WidgetError::Binding(format!("{}: {:?}", event, err)))
}

fn chip_index(container: &Element, chip: &Element) -> Option<usize> {
    let chips = container.query_selector_all(&format!(".{}", TAG_CLASS)).ok()?;
    (0..chips.length())
        .filter_map(|i| chips.item(i))
        .position(|node| {
            let chip: &web_sys::Node = chip;
            node.is_same_node(Some(chip))
        })
}

/// Elements of a password form
#[derive(Debug, Clone)]
struct PasswordFields {
    password: HtmlInputElement,
    confirm: Option<HtmlInputElement>,
    strength_bar: Option<HtmlElement>,
    strength_text: Option<HtmlElement>,
    success: Option<Element>,
    confirm_error: Option<Element>,
}

impl PasswordFields {
    fn validate_password(&self) {
        let check = check_password(&self.password.value());
        let visual = check.visual_level();

        if let Some(bar) = &self.strength_bar {
            let _ = bar.style().set_property("width", &format!("{}%", check.percent()));
            bar.set_class_name(&format!("password-strength__fill password-strength__fill--{}", visual));
        }
        if let Some(text) = &self.strength_text {
            text.set_class_name(&format!("password-strength__text password-strength__text--{}", visual));
            match check.hints.first() {
                Some(hint) => {
                    set_display(text, "block");
                    text.set_text_content(Some(*hint));
                }
                None => set_display(text, "none"),
            }
        }
        if let Some(success) = &self.success {
            match check.success_message() {
                Some(message) => {
                    success.set_text_content(Some(message));
                    set_display(success, "block");
                }
                None => set_display(success, "none"),
            }
        }
        toggle_field_error(&self.password, !check.is_strictly_valid);
    }

    fn validate_match(&self) {
        let Some(confirm) = &self.confirm else {
            return;
        };
        let error = confirm_error(&self.password.value(), &confirm.value());
        if let Some(div) = &self.confirm_error {
            match error {
                Some(message) => {
                    div.set_text_content(Some(message));
                    set_display(div, "block");
                }
                None => set_display(div, "none"),
            }
        }
        toggle_field_error(confirm, error.is_some());
    }
}

fn toggle_field_error(input: &HtmlInputElement, has_error: bool) {
    if let Ok(Some(field)) = input.closest(FIELD_CLASS) {
        let _ = field
            .class_list()
            .toggle_with_force(FIELD_ERROR_CLASS, has_error);
    }
}

/// Live strength meter, confirmation check and show/hide toggles
#[wasm_bindgen]
pub struct PasswordValidator {
    _listeners: Vec<EventListener>,
}

/// Bind the password reset form; ids default to the stock template
#[wasm_bindgen(js_name = mountPasswordValidator)]
pub fn mount_password_validator(
    password_id: Option<String>,
    confirm_id: Option<String>,
) -> Result<PasswordValidator, JsValue> {
    let document = dom::document()?;
    let password_id = password_id.unwrap_or_else(|| "new_password".to_string());
    let confirm_id = confirm_id.unwrap_or_else(|| "confirm_new_password".to_string());

    let password: HtmlInputElement = element_as(&document, &password_id)
        .ok_or_else(|| JsValue::from_str(&format!("Element not found: {}", password_id)))?;
    let fields = Rc::new(PasswordFields {
        password: password.clone(),
        confirm: element_as(&document, &confirm_id),
        strength_bar: query_as(&document, ".password-strength__fill"),
        strength_text: query_as(&document, ".password-strength__text"),
        success: document.get_element_by_id(&format!("{}_success", password_id)),
        confirm_error: document.get_element_by_id(&format!("{}_error", confirm_id)),
    });

    let mut listeners = Vec::new();
    {
        let fields = fields.clone();
        listeners.push(EventListener::new(&password, "input", move |_| fields.validate_password())?);
    }
    if let Some(confirm) = fields.confirm.clone() {
        let fields = fields.clone();
        listeners.push(EventListener::new(&confirm, "input", move |_| fields.validate_match())?);
    }
    listeners.extend(bind_visibility_toggles(&document)?);

    Ok(PasswordValidator {
        _listeners: listeners,
    })
}

fn query_as<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// `.form__icon[data-toggle]` buttons flip their input between password
/// and text
fn bind_visibility_toggles(document: &Document) -> Result<Vec<EventListener>, JsValue> {
    let buttons = document.query_selector_all(".form__icon")?;
    let mut listeners = Vec::new();

    for button in (0..buttons.length())
        .filter_map(|i| buttons.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
    {
        let Some(input) = button
            .get_attribute("data-toggle")
            .and_then(|id| element_as::<HtmlInputElement>(document, &id))
        else {
            continue;
        };
        let toggle = button.clone();
        listeners.push(EventListener::new(&button, "click", move |_| {
            let next = Visibility::from_input_type(&input.type_()).toggled();
            input.set_type(next.input_type());
            let _ = toggle.set_attribute("aria-expanded", next.aria_expanded());

            if let Ok(Some(icon)) = toggle.query_selector("span") {
                let classes = icon.class_list();
                let _ = classes.remove_2(
                    Visibility::Shown.icon_class(),
                    Visibility::Hidden.icon_class(),
                );
                let _ = classes.add_1(next.icon_class());
            }
        })?);
    }
    Ok(listeners)
}
