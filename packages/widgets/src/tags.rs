//! Tag entry for the recipe form
//!
//! Typing `,` or pressing Enter turns the input's current value into a tag
//! chip inserted just before the input.

use recipebook_common::VNode;
use tracing::debug;

pub const TAG_CLASS: &str = "tag";
pub const TAG_REMOVE_CLASS: &str = "tag__remove";

/// What the keydown handler should do with one key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a commit key: let the browser handle it
    Ignored,
    /// Commit key with nothing to commit; still suppress the default
    Suppressed,
    /// Commit key with a tag; suppress the default, insert the tag, clear
    /// the input
    Committed(String),
}

impl KeyOutcome {
    pub fn prevent_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Tags committed from one input, in insertion order
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    input_id: String,
    container_id: String,
    tags: Vec<String>,
}

impl TagInput {
    pub fn new(input_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            input_id: input_id.into(),
            container_id: container_id.into(),
            tags: Vec::new(),
        }
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Handle a keydown carrying `key` while the input holds `value`
    pub fn key_down(&mut self, key: &str, value: &str) -> KeyOutcome {
        if key != "," && key != "Enter" {
            return KeyOutcome::Ignored;
        }

        match normalize_tag(value) {
            Some(tag) => {
                debug!(tag = %tag, "Tag committed");
                self.tags.push(tag.clone());
                KeyOutcome::Committed(tag)
            }
            None => KeyOutcome::Suppressed,
        }
    }

    /// Remove the tag at `index`, returning its text
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    /// Remove the first tag equal to `text`
    pub fn remove_text(&mut self, text: &str) -> bool {
        match self.tags.iter().position(|t| t == text) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Trim, drop one trailing comma, reject empty
pub fn normalize_tag(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Chip markup for one tag, remove control included
pub fn tag_markup(text: &str) -> VNode {
    VNode::element("span")
        .with_class(TAG_CLASS)
        .with_child(VNode::text(text))
        .with_child(
            VNode::element("svg")
                .with_attr("viewBox", "0 0 16 16")
                .with_attr("width", "12")
                .with_attr("height", "12")
                .with_class(TAG_REMOVE_CLASS)
                .with_child(
                    VNode::element("path")
                        .with_attr("d", "M4 4 L12 12 M12 4 L4 12")
                        .with_attr("stroke", "black")
                        .with_attr("stroke-width", "2")
                        .with_attr("stroke-linecap", "round"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_keys() {
        let mut input = TagInput::new("recipe_tags", "tag_container");

        assert_eq!(input.key_down("a", "pas"), KeyOutcome::Ignored);
        assert_eq!(
            input.key_down("Enter", "  pasta  "),
            KeyOutcome::Committed("pasta".to_string())
        );
        assert_eq!(
            input.key_down(",", "quick,"),
            KeyOutcome::Committed("quick".to_string())
        );
        assert_eq!(input.tags(), &["pasta".to_string(), "quick".to_string()]);
    }

    #[test]
    fn test_empty_values_are_suppressed() {
        let mut input = TagInput::new("recipe_tags", "tag_container");

        let outcome = input.key_down(",", "  , ");
        assert_eq!(outcome, KeyOutcome::Suppressed);
        assert!(outcome.prevent_default());
        assert!(!KeyOutcome::Ignored.prevent_default());
        assert!(input.tags().is_empty());
    }

    #[test]
    fn test_only_one_trailing_comma_stripped() {
        assert_eq!(normalize_tag("soup,,"), Some("soup,".to_string()));
        assert_eq!(normalize_tag(","), None);
    }

    #[test]
    fn test_remove() {
        let mut input = TagInput::new("recipe_tags", "tag_container");
        input.key_down("Enter", "a");
        input.key_down("Enter", "b");

        assert_eq!(input.remove(0), Some("a".to_string()));
        assert_eq!(input.remove(4), None);
        assert!(input.remove_text("b"));
        assert!(!input.remove_text("b"));
        assert!(input.tags().is_empty());
    }

    #[test]
    fn test_tag_markup() {
        let chip = tag_markup("vegan");
        assert_eq!(chip.tag(), Some("span"));
        assert!(chip.has_class(TAG_CLASS));
        assert_eq!(chip.text_content(), "vegan");
        assert!(chip.children()[1].has_class(TAG_REMOVE_CLASS));
    }
}
