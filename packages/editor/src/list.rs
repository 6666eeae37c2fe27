use tracing::debug;

use crate::{dom_ids, BlockId, RenderTree, VNode};

/// Block ids in rendered order
pub fn block_order<T: RenderTree + ?Sized>(tree: &T, container_id: &str) -> Vec<BlockId> {
    tree.child_ids(container_id)
        .iter()
        .filter_map(|id| dom_ids::parse_content_block(id))
        .collect()
}

/// Ordered view over the blocks rendered inside one container
///
/// There is no stored index: every operation reads and relocates the
/// rendered elements themselves.
pub struct BlockList<'a, T: RenderTree + ?Sized> {
    tree: &'a mut T,
    container_id: &'a str,
}

impl<'a, T: RenderTree + ?Sized> BlockList<'a, T> {
    pub fn new(tree: &'a mut T, container_id: &'a str) -> Self {
        Self { tree, container_id }
    }

    pub fn ids(&self) -> Vec<BlockId> {
        block_order(&*self.tree, self.container_id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.tree.contains(&dom_ids::content_block(id))
    }

    /// Append a rendered block at the end
    pub fn push(&mut self, block: &VNode) -> bool {
        self.tree.append_child(self.container_id, block)
    }

    /// Neighbouring blocks of `id`; other container children are skipped
    fn neighbours(&self, id: BlockId) -> Option<(Option<BlockId>, Option<BlockId>)> {
        let order = self.ids();
        let pos = order.iter().position(|block| *block == id)?;
        let previous = pos.checked_sub(1).map(|i| order[i]);
        Some((previous, order.get(pos + 1).copied()))
    }

    /// Relocate `id` before the previous block; `false` when first or absent
    pub fn move_up(&mut self, id: BlockId) -> bool {
        let Some((previous, _)) = self.neighbours(id) else {
            debug!(block = %id, "Move up ignored: block not found");
            return false;
        };
        let Some(previous) = previous else {
            return false;
        };
        self.tree.insert_before(
            self.container_id,
            &dom_ids::content_block(id),
            Some(&dom_ids::content_block(previous)),
        )
    }

    /// Relocate `id` after the next block; `false` when last or absent
    pub fn move_down(&mut self, id: BlockId) -> bool {
        let Some((_, next)) = self.neighbours(id) else {
            debug!(block = %id, "Move down ignored: block not found");
            return false;
        };
        let Some(next) = next else {
            return false;
        };
        // The next block takes our place, which leaves us right after it
        self.tree.insert_before(
            self.container_id,
            &dom_ids::content_block(next),
            Some(&dom_ids::content_block(id)),
        )
    }

    /// Detach the block; `false` when absent
    pub fn remove(&mut self, id: BlockId) -> bool {
        let removed = self.tree.remove(&dom_ids::content_block(id));
        if !removed {
            debug!(block = %id, "Delete ignored: block not found");
        }
        removed
    }
}
