//! # Recipebook Widgets
//!
//! Page widgets that sit around the block editor. Each module is the
//! behavior of one widget, kept free of DOM types so it can be tested
//! natively; the wasm bindings apply the results to the page.
//!
//! - [`password`]: strength meter and confirmation check
//! - [`tags`]: comma/Enter separated tag entry
//! - [`messages`]: toast messages and the cross-page message queue
//! - [`countdown`]: days/hours/minutes/seconds to a launch date
//! - [`tabs`]: login/signup tab switching

pub mod countdown;
mod errors;
pub mod messages;
pub mod password;
pub mod tabs;
pub mod tags;

pub use countdown::{Countdown, Remaining, Tick};
pub use errors::WidgetError;
pub use messages::{MessageCenter, MessageConfig, MessageKind, ShownMessage, StoredMessage};
pub use password::{check_password, confirm_error, PasswordCheck, StrengthLevel, Visibility};
pub use tabs::{AuthTabs, TabSwitch};
pub use tags::{KeyOutcome, TagInput};
