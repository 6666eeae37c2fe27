//! # Messages
//!
//! Toast notifications plus a small queue in the key-value store that
//! carries messages across a page navigation (e.g. "Account created"
//! shown on the page the user is redirected to).
//!
//! The [`MessageCenter`] only decides *what* happens and *when*; the wasm
//! bindings own the timers and the actual elements.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use recipebook_common::{KeyValueStore, VNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::WidgetError;

pub const MESSAGES_KEY: &str = "messages";
pub const SHOW_CLASS: &str = "messages__item--show";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(MessageKind::Success),
            "error" => Some(MessageKind::Error),
            "warning" => Some(MessageKind::Warning),
            "info" => Some(MessageKind::Info),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message waiting in the store for the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageConfig {
    /// Auto-hide delay in milliseconds; 0 keeps the message until closed
    pub duration_ms: u32,
    pub animation_ms: u32,
    pub container_id: String,
    /// Duration used for messages carried over from the previous page
    pub stored_duration_ms: u32,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            animation_ms: 300,
            container_id: MESSAGES_KEY.to_string(),
            stored_duration_ms: 4000,
        }
    }
}

/// Append a message to the cross-page queue
pub fn store_message<S: KeyValueStore + ?Sized>(
    store: &S,
    message: &str,
    kind: MessageKind,
    now: DateTime<Utc>,
) -> Result<(), WidgetError> {
    let mut queued = read_queue(store)?;
    queued.push(StoredMessage {
        message: message.to_string(),
        kind,
        timestamp: now.timestamp_millis(),
    });
    store.set_item(MESSAGES_KEY, &serde_json::to_string(&queued)?)?;
    Ok(())
}

/// Drain the cross-page queue
pub fn take_stored_messages<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Vec<StoredMessage>, WidgetError> {
    let queued = read_queue(store)?;
    store.remove_item(MESSAGES_KEY)?;
    Ok(queued)
}

fn read_queue<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<StoredMessage>, WidgetError> {
    let Some(raw) = store.get_item(MESSAGES_KEY)? else {
        return Ok(Vec::new());
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "Discarding unreadable stored messages");
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(message) => Some(message),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable stored message");
                None
            }
        })
        .collect())
}

/// Element for one toast; `id` ties the close button back to the message
pub fn message_markup(id: u32, text: &str, kind: MessageKind) -> VNode {
    VNode::element("div")
        .with_id(message_element_id(id))
        .with_class("messages__item")
        .with_class(format!("messages__item--{}", kind.as_str()))
        .with_child(
            VNode::element("div")
                .with_class("messages__text")
                .with_child(VNode::text(text)),
        )
        .with_child(
            VNode::element("button")
                .with_class("messages__close")
                .with_attr("data-message", id.to_string())
                .with_child(VNode::text("\u{00d7}")),
        )
}

pub fn message_element_id(id: u32) -> String {
    format!("message_{}", id)
}

/// Container created when the page has none
pub fn container_markup(container_id: &str) -> VNode {
    VNode::element("div")
        .with_id(container_id)
        .with_class("messages")
}

/// A toast that was just shown
#[derive(Debug, Clone, PartialEq)]
pub struct ShownMessage {
    pub id: u32,
    pub markup: VNode,
    /// Delay before [`MessageCenter::hide`] should run
    pub hide_after_ms: Option<u32>,
}

/// Bookkeeping for visible toasts
#[derive(Debug, Clone, Default)]
pub struct MessageCenter {
    config: MessageConfig,
    next_id: u32,
    visible: BTreeSet<u32>,
    hiding: BTreeSet<u32>,
}

impl MessageCenter {
    pub fn new(config: MessageConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    /// Show with the configured default duration
    pub fn show(&mut self, text: &str, kind: MessageKind) -> ShownMessage {
        self.show_for(text, kind, self.config.duration_ms)
    }

    /// Show for `duration_ms`; 0 means until closed
    pub fn show_for(&mut self, text: &str, kind: MessageKind, duration_ms: u32) -> ShownMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.visible.insert(id);

        debug!(message = id, kind = kind.as_str(), "Message shown");
        ShownMessage {
            id,
            markup: message_markup(id, text, kind),
            hide_after_ms: (duration_ms > 0).then_some(duration_ms),
        }
    }

    /// Show everything queued by the previous page
    pub fn show_stored(&mut self, stored: &[StoredMessage]) -> Vec<ShownMessage> {
        let duration = self.config.stored_duration_ms;
        stored
            .iter()
            .map(|m| self.show_for(&m.message, m.kind, duration))
            .collect()
    }

    /// Start hiding; returns the delay before the element should be
    /// removed, or `None` when it is already hiding or gone
    pub fn hide(&mut self, id: u32) -> Option<u32> {
        if !self.visible.remove(&id) {
            return None;
        }
        self.hiding.insert(id);
        Some(self.config.animation_ms)
    }

    /// The hide animation finished
    pub fn remove(&mut self, id: u32) -> bool {
        self.hiding.remove(&id)
    }

    pub fn is_visible(&self, id: u32) -> bool {
        self.visible.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.visible.len() + self.hiding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use recipebook_common::MemoryStore;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_store_and_take() {
        let store = MemoryStore::new();
        store_message(&store, "Account created successfully!", MessageKind::Success, at(1_000)).unwrap();
        store_message(&store, "Heads up", MessageKind::Warning, at(2_000)).unwrap();

        let raw = store.get_item(MESSAGES_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""type":"success""#));

        let taken = take_stored_messages(&store).unwrap();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].message, "Account created successfully!");
        assert_eq!(taken[1].timestamp, 2_000);
        assert!(take_stored_messages(&store).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unreadable_queue_is_empty() {
        let store = MemoryStore::new();
        store.set_item(MESSAGES_KEY, "{not json").unwrap();

        assert!(take_stored_messages(&store).unwrap().is_empty());

        store.set_item(MESSAGES_KEY, "{not json").unwrap();
        store_message(&store, "fresh", MessageKind::Info, at(5)).unwrap();
        assert_eq!(take_stored_messages(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_bad_entry_keeps_the_rest() {
        let store = MemoryStore::new();
        store
            .set_item(
                MESSAGES_KEY,
                r#"[{"message":"Account created successfully!","type":"success","timestamp":1},
                    {"message":"Odd","type":"danger","timestamp":2},
                    {"message":"Later","type":"info","timestamp":3}]"#,
            )
            .unwrap();

        let taken = take_stored_messages(&store).unwrap();
        let texts: Vec<&str> = taken.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["Account created successfully!", "Later"]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_show_and_hide_timings() {
        let mut center = MessageCenter::new(MessageConfig::default());

        let shown = center.show("Saved", MessageKind::Success);
        assert_eq!(shown.hide_after_ms, Some(5000));
        assert!(center.is_visible(shown.id));

        let sticky = center.show_for("Read me", MessageKind::Info, 0);
        assert_eq!(sticky.hide_after_ms, None);

        assert_eq!(center.hide(shown.id), Some(300));
        assert_eq!(center.hide(shown.id), None);
        assert_eq!(center.active_count(), 2);
        assert!(center.remove(shown.id));
        assert_eq!(center.active_count(), 1);
    }

    #[test]
    fn test_stored_messages_use_stored_duration() {
        let mut center = MessageCenter::new(MessageConfig::default());
        let stored = vec![StoredMessage {
            message: "Welcome".to_string(),
            kind: MessageKind::Success,
            timestamp: 0,
        }];
        let shown = center.show_stored(&stored);
        assert_eq!(shown[0].hide_after_ms, Some(4000));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(MessageKind::from_name("warning"), Some(MessageKind::Warning));
        assert_eq!(MessageKind::from_name("fatal"), None);
        assert_eq!(MessageKind::default(), MessageKind::Info);
    }

    #[test]
    fn test_markup() {
        let node = message_markup(3, "<b>hi</b>", MessageKind::Error);
        assert_eq!(node.id(), Some("message_3"));
        assert_eq!(node.classes(), vec!["messages__item", "messages__item--error"]);
        assert_eq!(node.children()[0].text_content(), "<b>hi</b>");
        assert_eq!(node.children()[1].attribute("data-message"), Some("3"));
    }
}
