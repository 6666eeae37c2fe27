//! Page-level bindings: auth forms, auth tabs, the header user menu and the
//! coming-soon countdown
//!
//! These live for the whole page, so their listeners are retained rather
//! than handed back to JS.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::Utc;
use recipebook_api::{
    ApiConfig, AuthClient, AuthFlow, AuthOutcome, LoginRequest, LogoutOutcome, RegisterRequest,
    LOGOUT_NETWORK_ERROR, REDIRECT_DELAY_MS,
};
use recipebook_widgets::countdown::UNIT_IDS;
use recipebook_widgets::tabs::{PANEL_HIDDEN_CLASS, TAB_ACTIVE_CLASS};
use recipebook_widgets::{AuthTabs, Countdown, MessageKind, TabSwitch};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlButtonElement, HtmlFormElement,
    HtmlInputElement,
};

use crate::dom::{self, element_as, retain, set_display, EventListener};
use crate::storage::LocalStorage;
use crate::toasts::show_message;

type Client = Rc<AuthClient<LocalStorage>>;

fn client(api_config_json: Option<String>) -> Result<Client, JsValue> {
    let config = match api_config_json {
        Some(json) => ApiConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => ApiConfig::default(),
    };
    let store = LocalStorage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(Rc::new(AuthClient::new(&config, store)))
}

fn input_value(document: &Document, id: &str) -> String {
    element_as::<HtmlInputElement>(document, id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn query_input(document: &Document, selector: &str) -> Option<HtmlInputElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
}

fn csrf_token(document: &Document) -> String {
    query_input(document, "[name=csrfmiddlewaretoken]")
        .map(|input| input.value())
        .unwrap_or_default()
}

fn redirect_later(url: String) {
    let go = Closure::once_into_js(move || {
        if let Ok(window) = dom::window() {
            let _ = window.location().set_href(&url);
        }
    });
    let scheduled = dom::window().and_then(|window| {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            go.unchecked_ref(),
            REDIRECT_DELAY_MS as i32,
        )
    });
    if let Err(err) = scheduled {
        warn!(error = ?err, "Failed to schedule redirect");
    }
}

/// Disable the submit button for the duration of a request
struct Submitting {
    button: HtmlButtonElement,
    flow: AuthFlow,
}

impl Submitting {
    fn start(button: HtmlButtonElement, flow: AuthFlow) -> Self {
        button.set_disabled(true);
        button.set_text_content(Some(flow.pending_label()));
        Self { button, flow }
    }
}

impl Drop for Submitting {
    fn drop(&mut self) {
        self.button.set_disabled(false);
        self.button.set_text_content(Some(self.flow.idle_label()));
    }
}

fn report(flow: AuthFlow, result: Result<AuthOutcome, recipebook_api::ApiError>, form: Option<&HtmlFormElement>) {
    match result {
        Ok(AuthOutcome::Success { redirect }) => {
            if let Some(form) = form {
                form.reset();
            }
            redirect_later(redirect);
        }
        Ok(AuthOutcome::Rejected { message }) => show_message(&message, MessageKind::Error),
        Err(err) => {
            warn!(flow = ?flow, error = %err, "Auth request failed");
            show_message(flow.network_error(), MessageKind::Error);
        }
    }
}

/// Bind the signup and login forms on the auth page
#[wasm_bindgen(js_name = mountAuthForms)]
pub fn mount_auth_forms(api_config_json: Option<String>) -> Result<(), JsValue> {
    let document = dom::document()?;
    let client = client(api_config_json)?;

    let signup_form: Option<HtmlFormElement> = element_as(&document, "signup-form");
    let signup_button: Option<HtmlButtonElement> = element_as(&document, "signup-button");
    if let (Some(form), Some(button)) = (signup_form, signup_button) {
        let client = client.clone();
        let document = document.clone();
        let submitted = form.clone();
        retain(EventListener::new(&form, "submit", move |event| {
            event.prevent_default();
            let request = RegisterRequest {
                email: input_value(&document, "signup-email"),
                username: input_value(&document, "signup-username"),
                password: input_value(&document, "signup-password"),
                remember: query_input(&document, "input[name=\"remember\"]")
                    .map(|input| input.checked())
                    .unwrap_or(false),
            };
            let csrf = csrf_token(&document);
            let busy = Submitting::start(button.clone(), AuthFlow::Register);
            let client = client.clone();
            let form = submitted.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.register(&request, &csrf).await;
                drop(busy);
                report(AuthFlow::Register, result, Some(&form));
            });
        })?);
    }

    let login_form: Option<HtmlFormElement> = element_as(&document, "login-form");
    let login_button: Option<HtmlButtonElement> = document
        .query_selector("#login-form button[type='submit']")?
        .and_then(|el| el.dyn_into().ok());
    if let (Some(form), Some(button)) = (login_form, login_button) {
        let document = document.clone();
        retain(EventListener::new(&form, "submit", move |event| {
            event.prevent_default();
            let request = LoginRequest {
                email_or_username: input_value(&document, "login-email"),
                password: input_value(&document, "login-password"),
            };
            let csrf = csrf_token(&document);
            let busy = Submitting::start(button.clone(), AuthFlow::Login);
            let client = client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.login(&request, &csrf).await;
                drop(busy);
                report(AuthFlow::Login, result, None);
            });
        })?);
    }

    Ok(())
}

/// Show the signed-in user in the header and wire the logout button
#[wasm_bindgen(js_name = mountUserMenu)]
pub fn mount_user_menu(api_config_json: Option<String>) -> Result<(), JsValue> {
    let client = client(api_config_json)?;

    wasm_bindgen_futures::spawn_local(async move {
        let user = match client.me().await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "Failed to load user info");
                return;
            }
        };
        let Ok(document) = dom::document() else {
            return;
        };
        let (Some(info), Some(name), Some(logout)) = (
            document.get_element_by_id("user-info"),
            document.get_element_by_id("username"),
            document.get_element_by_id("logout-btn"),
        ) else {
            return;
        };

        name.set_text_content(Some(&user.username));
        set_display(&info, "inline-block");

        let listener = EventListener::new(&logout, "click", move |_| {
            let client = client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let alert = match client.logout().await {
                    Ok(LogoutOutcome::LoggedOut { redirect }) => {
                        if let Ok(window) = dom::window() {
                            let _ = window.location().set_href(&redirect);
                        }
                        return;
                    }
                    Ok(LogoutOutcome::Failed { message }) => message,
                    Err(err) => {
                        warn!(error = %err, "Logout error");
                        LOGOUT_NETWORK_ERROR.to_string()
                    }
                };
                if let Ok(window) = dom::window() {
                    let _ = window.alert_with_message(&alert);
                }
            });
        });
        match listener {
            Ok(listener) => retain(listener),
            Err(err) => warn!(error = ?err, "Failed to bind logout"),
        }
    });
    Ok(())
}

fn apply_tab_switches(document: &Document, tabs: &[Element], changes: Vec<TabSwitch>) {
    let mut hide: Option<Element> = None;
    let mut show: Option<Element> = None;

    for change in changes {
        match change {
            TabSwitch::SelectTab { tab, selected } => {
                if let Some(button) = tabs.get(tab) {
                    let classes = button.class_list();
                    let _ = if selected {
                        classes.add_1(TAB_ACTIVE_CLASS)
                    } else {
                        classes.remove_1(TAB_ACTIVE_CLASS)
                    };
                    let _ = button.set_attribute("aria-selected", if selected { "true" } else { "false" });
                }
            }
            TabSwitch::HidePanel { panel_id } => hide = document.get_element_by_id(&panel_id),
            TabSwitch::ShowPanel { panel_id } => show = document.get_element_by_id(&panel_id),
        }
    }

    let Some(show) = show else {
        return;
    };
    let Some(hide) = hide else {
        show_panel(show);
        return;
    };

    let _ = hide.class_list().add_1(PANEL_HIDDEN_CLASS);
    let outgoing = hide.clone();
    let after = Closure::once_into_js(move || {
        set_display(&outgoing, "none");
        show_panel(show);
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(err) = hide.add_event_listener_with_callback_and_add_event_listener_options(
        "transitionend",
        after.unchecked_ref(),
        &options,
    ) {
        warn!(error = ?err, "Failed to wait for panel transition");
    }
}

fn show_panel(panel: Element) {
    set_display(&panel, "block");
    let reveal = Closure::once_into_js(move || {
        let _ = panel.class_list().remove_1(PANEL_HIDDEN_CLASS);
    });
    if let Ok(window) = dom::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(reveal.unchecked_ref(), 20);
    }
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Bind the login/signup tabs
#[wasm_bindgen(js_name = mountAuthTabs)]
pub fn mount_auth_tabs() -> Result<(), JsValue> {
    let document = dom::document()?;
    let buttons = elements(&document, ".auth__tab")?;
    let visible = document
        .query_selector(&format!(".auth__form-panel:not(.{})", PANEL_HIDDEN_CLASS))?
        .map(|panel| panel.id())
        .filter(|id| !id.is_empty());

    let controls = buttons
        .iter()
        .map(|button| button.get_attribute("aria-controls"))
        .collect();
    let tabs = Rc::new(RefCell::new(AuthTabs::new(controls, visible)));
    let buttons = Rc::new(buttons);

    for (index, button) in buttons.iter().enumerate() {
        let tabs = tabs.clone();
        let all = buttons.clone();
        let document = document.clone();
        retain(EventListener::new(button, "click", move |_| {
            let changes = tabs
                .borrow_mut()
                .activate(index, |id| document.get_element_by_id(id).is_some());
            apply_tab_switches(&document, &all, changes);
        })?);
    }
    debug!(tabs = buttons.len(), "Auth tabs mounted");
    Ok(())
}

/// Start the coming-soon countdown from `#countdown[data-future-time]`
#[wasm_bindgen(js_name = startCountdown)]
pub fn start_countdown() -> Result<(), JsValue> {
    let document = dom::document()?;
    let Some(value) = document
        .get_element_by_id("countdown")
        .and_then(|el| el.get_attribute("data-future-time"))
    else {
        return Ok(());
    };
    let countdown = Countdown::parse(&value).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let update = move || -> bool {
        let tick = countdown.tick(Utc::now());
        let targets: Vec<Element> = UNIT_IDS
            .iter()
            .filter_map(|id| document.get_element_by_id(id))
            .collect();
        if targets.len() == UNIT_IDS.len() {
            for (el, text) in targets.iter().zip(tick.texts()) {
                el.set_text_content(Some(&text));
            }
        }
        tick.is_finished()
    };

    if update() {
        return Ok(());
    }

    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let interval = {
        let handle = handle.clone();
        Closure::<dyn FnMut()>::new(move || {
            if update() {
                if let (Some(id), Ok(window)) = (handle.take(), dom::window()) {
                    window.clear_interval_with_handle(id);
                }
            }
        })
    };
    let id = dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        interval.as_ref().unchecked_ref(),
        1000,
    )?;
    handle.set(Some(id));
    // Cleared from inside once the target passes
    interval.forget();

    info!(target_time = %countdown.target(), "Countdown started");
    Ok(())
}
