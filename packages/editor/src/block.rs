//! Block identity, kinds and the actions a block's button cluster can fire

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Class carried by every block action button
pub const ACTION_CLASS: &str = "block-action";

/// Class on an upload region that has no image yet
pub const EMPTY_UPLOAD_CLASS: &str = "image-upload--empty";

/// Identifier of a block, unique within a page session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(BlockId)
            .map_err(|_| EditorError::InvalidBlockId(s.to_string()))
    }
}

/// Content type of a block, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

impl BlockKind {
    /// Value of the `data-block-type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
        }
    }

    /// Heading shown in the block header
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Text => "Text Block",
            BlockKind::Image => "Image Block",
        }
    }
}

/// Action fired by one of a block's header buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockAction {
    MoveUp,
    MoveDown,
    Delete,
}

impl BlockAction {
    pub const ALL: [BlockAction; 3] = [BlockAction::MoveUp, BlockAction::MoveDown, BlockAction::Delete];

    /// Value of the `data-action` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockAction::MoveUp => "up",
            BlockAction::MoveDown => "down",
            BlockAction::Delete => "delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BlockAction::MoveUp => "Move up",
            BlockAction::MoveDown => "Move down",
            BlockAction::Delete => "Delete",
        }
    }
}

impl FromStr for BlockAction {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(BlockAction::MoveUp),
            "down" => Ok(BlockAction::MoveDown),
            "delete" => Ok(BlockAction::Delete),
            other => Err(EditorError::UnknownAction(other.to_string())),
        }
    }
}

/// An action addressed to one block, decoded from a clicked button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCommand {
    pub action: BlockAction,
    pub id: BlockId,
}

impl BlockCommand {
    /// Decode the `data-action` / `data-id` pair of a clicked action button
    pub fn decode(action: Option<&str>, id: Option<&str>) -> Result<Self, EditorError> {
        let action = action.ok_or(EditorError::MissingAttribute("data-action"))?;
        let id = id.ok_or(EditorError::MissingAttribute("data-id"))?;

        Ok(Self {
            action: action.parse()?,
            id: id.parse()?,
        })
    }
}

/// Element ids generated for each block
///
/// These are a contract with the page template and its stylesheet.
pub mod dom_ids {
    use super::BlockId;

    pub const CONTENT_BLOCK_PREFIX: &str = "content_block_";

    pub fn content_block(id: BlockId) -> String {
        format!("{}{}", CONTENT_BLOCK_PREFIX, id)
    }

    pub fn block_actions(id: BlockId) -> String {
        format!("block_actions_{}", id)
    }

    pub fn text_block(id: BlockId) -> String {
        format!("text_block_{}", id)
    }

    pub fn image_input(id: BlockId) -> String {
        format!("image_{}", id)
    }

    pub fn image_content(id: BlockId) -> String {
        format!("image_content_{}", id)
    }

    pub fn image_container(id: BlockId) -> String {
        format!("image_container_{}", id)
    }

    pub fn image_caption(id: BlockId) -> String {
        format!("image_caption_{}", id)
    }

    /// Recover the block id from a `content_block_<id>` element id
    pub fn parse_content_block(element_id: &str) -> Option<BlockId> {
        element_id
            .strip_prefix(CONTENT_BLOCK_PREFIX)?
            .parse::<u64>()
            .ok()
            .map(BlockId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_command() {
        let command = BlockCommand::decode(Some("down"), Some("7")).unwrap();
        assert_eq!(command.action, BlockAction::MoveDown);
        assert_eq!(command.id, BlockId(7));
    }

    #[test]
    fn test_decode_rejects_unknown_action() {
        let err = BlockCommand::decode(Some("sideways"), Some("1")).unwrap_err();
        assert!(matches!(err, EditorError::UnknownAction(a) if a == "sideways"));
    }

    #[test]
    fn test_decode_rejects_bad_id() {
        assert!(matches!(
            BlockCommand::decode(Some("up"), Some("abc")),
            Err(EditorError::InvalidBlockId(_))
        ));
        assert!(matches!(
            BlockCommand::decode(Some("up"), Some("-1")),
            Err(EditorError::InvalidBlockId(_))
        ));
        assert!(matches!(
            BlockCommand::decode(Some("up"), None),
            Err(EditorError::MissingAttribute("data-id"))
        ));
    }

    #[test]
    fn test_action_names_roundtrip() {
        for action in BlockAction::ALL {
            assert_eq!(action.as_str().parse::<BlockAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_parse_content_block_id() {
        assert_eq!(dom_ids::parse_content_block("content_block_12"), Some(BlockId(12)));
        assert_eq!(dom_ids::parse_content_block("text_block_12"), None);
        assert_eq!(dom_ids::parse_content_block("content_block_x"), None);
    }
}
