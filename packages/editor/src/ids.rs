use crate::BlockId;

/// Issues block ids for one page session
///
/// Starts at 0 and only ever counts up: deleting a block never frees its id.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id
    pub fn next_id(&mut self) -> BlockId {
        let id = BlockId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}
