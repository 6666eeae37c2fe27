//! # Recipebook Editor
//!
//! Content block editor for the recipe create/edit page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ controller: add / move-up / move-down /     │
//! │             delete, delegated action decode │
//! └─────────────────────────────────────────────┘
//!        ↓              ↓                ↓
//! ┌────────────┐ ┌──────────────┐ ┌──────────────┐
//! │ ids: block │ │ factory:     │ │ uploader:    │
//! │ allocator  │ │ kind+id →    │ │ input/drop/  │
//! │            │ │ VNode markup │ │ paste → queue│
//! └────────────┘ └──────────────┘ └──────────────┘
//!                       ↓                ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: RenderTree (DOM in the browser,       │
//! │       MemoryTree in tests)                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Rendered order is source of truth**: blocks carry no position field;
//!    moves relocate the rendered element
//! 2. **Ids are never reused**: the allocator only counts up
//! 3. **Missing elements are not errors**: commands for absent blocks are
//!    silent no-ops, binder failures are logged warnings
//!
//! ## Usage
//!
//! ```rust
//! use recipebook_editor::{BlockKind, BlockListController, EditorConfig, MemoryTree};
//!
//! let config = EditorConfig::default();
//! let tree = MemoryTree::with_container(&config.container_id);
//! let mut editor: BlockListController<MemoryTree> =
//!     BlockListController::mount(tree, config).unwrap();
//!
//! let text = editor.add_block(BlockKind::Text);
//! let image = editor.add_block(BlockKind::Image);
//! editor.handle_action(Some("up"), Some(&image.to_string()));
//!
//! assert_eq!(editor.order(), vec![image, text]);
//! ```

mod block;
mod config;
mod controller;
mod errors;
mod factory;
mod ids;
mod list;
mod tree;
mod uploader;

pub use block::{dom_ids, BlockAction, BlockCommand, BlockId, BlockKind, ACTION_CLASS, EMPTY_UPLOAD_CLASS};
pub use config::EditorConfig;
pub use controller::BlockListController;
pub use errors::EditorError;
pub use factory::BlockFactory;
pub use ids::IdAllocator;
pub use list::{block_order, BlockList};
pub use tree::{MemoryTree, RenderTree};
pub use uploader::{
    preview_image, ClipboardEntry, FileProducer, FileSource, ImageUploader, MemoryFile,
    PendingRead, ReadTicket, UploadFile, UploadTarget, DRAGOVER_CLASS,
};
pub use recipebook_common::{to_html, HtmlOptions, VNode};
