//! # Block List Controller
//!
//! Owns the blocks container and everything that changes it.
//!
//! ## Commands
//!
//! - **Add**: allocate an id, render, append at the end; image blocks also
//!   get an [`ImageUploader`] bound to their upload region
//! - **Move up / move down**: relocate the block past its neighbor; no-op at
//!   the boundary
//! - **Delete**: detach the block for good; remaining ids are untouched
//!
//! Move and delete arrive through one delegated click handler as a
//! `data-action` / `data-id` pair and never look at the block's kind.
//! Commands for blocks that are not rendered are ignored.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::{
    block_order, BlockAction, BlockCommand, BlockFactory, BlockId, BlockKind, BlockList, ClipboardEntry,
    EditorConfig, EditorError, FileSource, IdAllocator, ImageUploader, MemoryFile, PendingRead,
    ReadTicket, RenderTree, UploadFile, UploadTarget,
};

/// Content block editor bound to one render tree
pub struct BlockListController<T: RenderTree, F: UploadFile = MemoryFile> {
    tree: T,
    config: EditorConfig,
    ids: IdAllocator,
    factory: BlockFactory,
    uploads: BTreeMap<BlockId, ImageUploader<F>>,
}

impl<T: RenderTree, F: UploadFile> BlockListController<T, F> {
    /// Attach to the container named in `config`
    pub fn mount(tree: T, config: EditorConfig) -> Result<Self, EditorError> {
        if !tree.contains(&config.container_id) {
            return Err(EditorError::MissingElement(config.container_id.clone()));
        }

        info!(container = %config.container_id, "Block editor mounted");
        Ok(Self {
            tree,
            factory: BlockFactory::new(&config),
            config,
            ids: IdAllocator::new(),
            uploads: BTreeMap::new(),
        })
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Block ids in rendered order
    pub fn order(&self) -> Vec<BlockId> {
        block_order(&self.tree, &self.config.container_id)
    }

    fn list(&mut self) -> BlockList<'_, T> {
        BlockList::new(&mut self.tree, &self.config.container_id)
    }

    /// Append a new block of `kind` and return its id
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let id = self.ids.next_id();
        let block = self.factory.render(kind, id);
        self.list().push(&block);

        if kind == BlockKind::Image {
            let bound = ImageUploader::bind_with_prefix(
                &self.tree,
                UploadTarget::for_block(id),
                &self.config.accepted_media_prefix,
            );
            if let Some(uploader) = bound {
                self.uploads.insert(id, uploader);
            }
        }

        debug!(block = %id, kind = kind.as_str(), "Block added");
        id
    }

    /// Delegated click entry point: decode and dispatch an action button
    ///
    /// Returns whether the rendered order or membership changed.
    pub fn handle_action(&mut self, action: Option<&str>, id: Option<&str>) -> bool {
        match BlockCommand::decode(action, id) {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                debug!(error = %err, "Ignoring block action");
                false
            }
        }
    }

    pub fn dispatch(&mut self, command: BlockCommand) -> bool {
        match command.action {
            BlockAction::MoveUp => self.move_up(command.id),
            BlockAction::MoveDown => self.move_down(command.id),
            BlockAction::Delete => self.delete(command.id),
        }
    }

    pub fn move_up(&mut self, id: BlockId) -> bool {
        let moved = self.list().move_up(id);
        if moved {
            debug!(block = %id, "Block moved up");
        }
        moved
    }

    pub fn move_down(&mut self, id: BlockId) -> bool {
        let moved = self.list().move_down(id);
        if moved {
            debug!(block = %id, "Block moved down");
        }
        moved
    }

    /// Remove a block; its id is never handed out again
    pub fn delete(&mut self, id: BlockId) -> bool {
        let removed = self.list().remove(id);
        if removed {
            self.uploads.remove(&id);
            debug!(block = %id, "Block deleted");
        }
        removed
    }

    pub fn uploader(&self, id: BlockId) -> Option<&ImageUploader<F>> {
        self.uploads.get(&id)
    }

    /// Ids of blocks with a bound upload region
    pub fn upload_ids(&self) -> Vec<BlockId> {
        self.uploads.keys().copied().collect()
    }

    /// Feed a file through one channel of a block's upload region
    pub fn offer_file(&mut self, id: BlockId, source: FileSource, file: F) -> bool {
        match self.uploads.get(&id) {
            Some(uploader) => uploader.producer(source).offer(file),
            None => false,
        }
    }

    /// Start reads for everything queued on every upload region
    pub fn pump_uploads(&mut self) -> Vec<(BlockId, PendingRead<F>)> {
        let mut reads = Vec::new();
        for (id, uploader) in self.uploads.iter_mut() {
            reads.extend(uploader.pump(&mut self.tree).into_iter().map(|read| (*id, read)));
        }
        reads
    }

    pub fn complete_read(&mut self, id: BlockId, ticket: ReadTicket, data_url: &str) -> bool {
        match self.uploads.get_mut(&id) {
            Some(uploader) => uploader.complete_read(&mut self.tree, ticket, data_url),
            None => false,
        }
    }

    pub fn fail_read(&mut self, id: BlockId, ticket: ReadTicket) {
        if let Some(uploader) = self.uploads.get_mut(&id) {
            uploader.fail_read(ticket);
        }
    }

    pub fn drag_over(&mut self, id: BlockId) {
        if let Some(uploader) = self.uploads.get(&id) {
            uploader.drag_over(&mut self.tree);
        }
    }

    pub fn drag_leave(&mut self, id: BlockId) {
        if let Some(uploader) = self.uploads.get(&id) {
            uploader.drag_leave(&mut self.tree);
        }
    }
}

impl<T: RenderTree, F: UploadFile + Clone> BlockListController<T, F> {
    /// Deliver one page-level paste event to every upload region
    ///
    /// Paste is not scoped to a region, so each bound block receives the
    /// same clipboard image. Returns the blocks that accepted it.
    pub fn broadcast_paste(&mut self, entries: &[ClipboardEntry<F>]) -> Vec<BlockId> {
        self.uploads
            .iter()
            .filter(|(_, uploader)| {
                uploader
                    .producer(FileSource::Paste)
                    .offer_clipboard(entries.iter().cloned())
            })
            .map(|(id, _)| *id)
            .collect()
    }
}
