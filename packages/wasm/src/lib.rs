//! # Recipebook WASM
//!
//! Browser entry points for the recipebook pages. Each page script calls
//! the mount functions it needs after `init` has run:
//!
//! | page | entry points |
//! |---|---|
//! | recipe create/edit | `mountRecipeEditor` |
//! | auth | `mountAuthForms`, `mountAuthTabs`, `showStoredMessages` |
//! | password reset | `mountPasswordValidator` |
//! | coming soon | `startCountdown` |
//! | every page | `mountUserMenu`, `showStoredMessages` |

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod editor;
pub mod forms;
mod logging;
pub mod pages;
pub mod storage;
pub mod toasts;

pub use dom::{DomTree, EventListener};
pub use editor::{mount_recipe_editor, BrowserFile, RecipeEditor};
pub use forms::{mount_password_validator, PasswordValidator, TagInputBinding};
pub use pages::{mount_auth_forms, mount_auth_tabs, mount_user_menu, start_countdown};
pub use storage::LocalStorage;
pub use toasts::{show_message, show_message_js, show_stored_messages};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
}
