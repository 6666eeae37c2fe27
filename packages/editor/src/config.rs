use serde::{Deserialize, Serialize};

use crate::{EditorError, UploadTarget};

/// Page wiring for the recipe editor
///
/// Every field has a default matching the stock recipe page template, so a
/// page only needs to pass the fields it renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Element that holds the content blocks
    pub container_id: String,

    /// Trigger that appends a text block
    pub add_text_button_id: String,

    /// Trigger that appends an image block
    pub add_image_button_id: String,

    /// `accept` attribute of generated file inputs
    pub accepted_file_types: String,

    /// Media-type prefix a file must carry to be previewed
    pub accepted_media_prefix: String,

    /// `maxlength` of image caption inputs
    pub caption_max_length: usize,

    /// Recipe main image upload region
    pub main_image: UploadTarget,

    /// Tag text input
    pub tag_input_id: String,

    /// Element the committed tags are inserted into
    pub tag_container_id: String,
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container_id: "blocks_container".to_string(),
            add_text_button_id: "add_text_button".to_string(),
            add_image_button_id: "add_image_button".to_string(),
            accepted_file_types: "image/jpeg,image/png,image/gif,image/webp".to_string(),
            accepted_media_prefix: "image/".to_string(),
            caption_max_length: 200,
            main_image: UploadTarget::new("main_image", "image_upload_content", "main_image_container"),
            tag_input_id: "recipe_tags".to_string(),
            tag_container_id: "tag_container".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "containerId": "blocks",
            "captionMaxLength": 120,
            "mainImage": {
                "fileInputId": "cover",
                "contentId": "cover_content",
                "containerId": "cover_container"
            }
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.container_id, "blocks");
        assert_eq!(config.caption_max_length, 120);
        assert_eq!(config.main_image.file_input_id, "cover");
        assert_eq!(config.add_text_button_id, "add_text_button");
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.container_id, "blocks_container");
        assert_eq!(config.accepted_media_prefix, "image/");
        assert_eq!(config.main_image.container_id, "main_image_container");
        assert_eq!(EditorConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EditorConfig::from_json("{\"captionMaxLength\": \"long\"}"),
            Err(EditorError::Config(_))
        ));
    }
}
