//! # Block Factory
//!
//! Renders the markup of a text or image block.
//!
//! Rendering is a pure function of `(kind, id)`: the controller locates a
//! block afterwards only through the ids listed in [`dom_ids`], and its
//! action buttons only through their `data-action` / `data-id` attributes.
//!
//! ```text
//! div.content-block#content_block_<id>[data-block-type]
//!   div.content-block__header
//!     div.content-block__title   (icon + "Text Block" / "Image Block")
//!     div.block-actions          (up / down / delete buttons)
//!   div.content-block__content
//!     textarea#text_block_<id>                      (text)
//!     div.image-upload#image_container_<id> + caption (image)
//! ```

use crate::{dom_ids, to_html, BlockAction, BlockId, BlockKind, EditorConfig, HtmlOptions, VNode};
use crate::{ACTION_CLASS, EMPTY_UPLOAD_CLASS};

/// Produces block markup
#[derive(Debug, Clone)]
pub struct BlockFactory {
    accepted_file_types: String,
    caption_max_length: usize,
}

impl BlockFactory {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            accepted_file_types: config.accepted_file_types.clone(),
            caption_max_length: config.caption_max_length,
        }
    }

    /// Render a block's root element
    pub fn render(&self, kind: BlockKind, id: BlockId) -> VNode {
        let body = match kind {
            BlockKind::Text => text_body(id),
            BlockKind::Image => self.image_body(id),
        };

        VNode::element("div")
            .with_class("content-block")
            .with_id(dom_ids::content_block(id))
            .with_attr("data-block-type", kind.as_str())
            .with_child(header(kind, id))
            .with_child(body)
    }

    /// Render a block straight to compact HTML
    pub fn render_html(&self, kind: BlockKind, id: BlockId) -> String {
        to_html(&self.render(kind, id), &HtmlOptions::compact())
    }

    fn image_body(&self, id: BlockId) -> VNode {
        let caption_id = dom_ids::image_caption(id);

        VNode::element("div")
            .with_class("content-block__content")
            .with_child(
                VNode::element("div")
                    .with_class("form form--spaced")
                    .with_child(self.upload_region(id)),
            )
            .with_child(
                VNode::element("label")
                    .with_attr("for", caption_id.clone())
                    .with_class("form__label")
                    .with_child(VNode::text("Image caption")),
            )
            .with_child(
                VNode::element("input")
                    .with_attr("type", "text")
                    .with_id(caption_id)
                    .with_attr("name", "image_captions[]")
                    .with_class("form__field")
                    .with_attr("placeholder", "Add a caption for your image...")
                    .with_attr("maxlength", self.caption_max_length.to_string()),
            )
    }

    fn upload_region(&self, id: BlockId) -> VNode {
        let input_id = dom_ids::image_input(id);

        VNode::element("div")
            .with_class("image-upload")
            .with_class(EMPTY_UPLOAD_CLASS)
            .with_id(dom_ids::image_container(id))
            .with_attr("tabindex", "0")
            .with_attr("role", "button")
            .with_child(
                VNode::element("input")
                    .with_attr("type", "file")
                    .with_id(input_id.clone())
                    .with_attr("name", input_id)
                    .with_attr("accept", self.accepted_file_types.clone())
                    .with_class("image-upload__input"),
            )
            .with_child(
                VNode::element("div")
                    .with_class("image-upload__content")
                    .with_id(dom_ids::image_content(id))
                    .with_child(
                        VNode::element("div")
                            .with_class("image-upload__icon")
                            .with_attr("aria-hidden", "true")
                            .with_child(upload_icon()),
                    )
                    .with_child(
                        VNode::element("div")
                            .with_class("image-upload__text")
                            .with_child(
                                VNode::element("span")
                                    .with_class("image-upload__text--primary")
                                    .with_child(VNode::text("Drop your image here or click to browse")),
                            )
                            .with_child(
                                VNode::element("span")
                                    .with_class("image-upload__text--secondary")
                                    .with_child(VNode::text("JPG, PNG, GIF, or WebP up to 10MB")),
                            ),
                    ),
            )
    }
}

impl Default for BlockFactory {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

fn header(kind: BlockKind, id: BlockId) -> VNode {
    let icon = match kind {
        BlockKind::Text => text_icon(),
        BlockKind::Image => image_icon(),
    };

    VNode::element("div")
        .with_class("content-block__header")
        .with_child(
            VNode::element("div")
                .with_class("content-block__title")
                .with_child(icon)
                .with_child(VNode::element("h3").with_child(VNode::text(kind.label()))),
        )
        .with_child(action_cluster(id))
}

fn action_cluster(id: BlockId) -> VNode {
    VNode::element("div")
        .with_class("block-actions")
        .with_id(dom_ids::block_actions(id))
        .with_children(BlockAction::ALL.iter().map(|action| action_button(*action, id)))
}

fn action_button(action: BlockAction, id: BlockId) -> VNode {
    VNode::element("button")
        .with_attr("type", "button")
        .with_class(ACTION_CLASS)
        .with_class(format!("{}--{}", ACTION_CLASS, action.as_str()))
        .with_attr("data-action", action.as_str())
        .with_attr("data-id", id.to_string())
        .with_attr("title", action.title())
        .with_attr("aria-label", format!("{} block {}", action.title(), id))
        .with_child(icon(&[action_path(action)]))
}

fn action_path(action: BlockAction) -> VNode {
    let d = match action {
        BlockAction::MoveUp => "M18 15l-6-6-6 6",
        BlockAction::MoveDown => "M6 9l6 6 6-6",
        BlockAction::Delete => {
            "M3 6h18M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2"
        }
    };
    VNode::element("path").with_attr("d", d)
}

fn text_body(id: BlockId) -> VNode {
    let textarea_id = dom_ids::text_block(id);

    VNode::element("div")
        .with_class("content-block__content")
        .with_child(
            VNode::element("textarea")
                .with_id(textarea_id.clone())
                .with_attr("name", "text_blocks[]")
                .with_class("form__field form__textarea")
                .with_attr("placeholder", "Write your text here...")
                .with_attr("aria-describedby", format!("{}_help", textarea_id)),
        )
}

/// Stroke icon on a 24x24 view box
fn icon(shapes: &[VNode]) -> VNode {
    VNode::element("svg")
        .with_attr("viewBox", "0 0 24 24")
        .with_attr("fill", "none")
        .with_attr("stroke", "currentColor")
        .with_attr("stroke-width", "2")
        .with_attr("aria-hidden", "true")
        .with_children(shapes.iter().cloned())
}

fn text_icon() -> VNode {
    icon(&[
        VNode::element("path").with_attr("d", "M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"),
        VNode::element("polyline").with_attr("points", "14,2 14,8 20,8"),
    ])
    .with_class("icon")
}

fn image_icon() -> VNode {
    icon(&[
        VNode::element("rect")
            .with_attr("x", "3")
            .with_attr("y", "3")
            .with_attr("width", "18")
            .with_attr("height", "18")
            .with_attr("rx", "2")
            .with_attr("ry", "2"),
        VNode::element("circle")
            .with_attr("cx", "9")
            .with_attr("cy", "9")
            .with_attr("r", "2"),
        VNode::element("path").with_attr("d", "M21 15l-3.086-3.086a2 2 0 0 0-2.828 0L6 21"),
    ])
    .with_class("icon")
}

fn upload_icon() -> VNode {
    icon(&[VNode::element("path")
        .with_attr("stroke-linecap", "round")
        .with_attr("stroke-linejoin", "round")
        .with_attr(
            "d",
            "M4 16l4.586-4.586a2 2 0 012.828 0L16 16m-2-2l1.586-1.586a2 2 0 012.828 0L20 14m-6-6h.01M6 20h12a2 2 0 002-2V6a2 2 0 00-2-2H6a2 2 0 00-2 2v12a2 2 0 002 2z",
        )])
    .with_attr("width", "48")
    .with_attr("height", "48")
}
