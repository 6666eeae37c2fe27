//! # Image Upload Binder
//!
//! Turns an (input, preview, container) triple into an image upload region.
//!
//! ## Design
//!
//! Three producers feed one inbound queue of accepted files:
//!
//! ```text
//! file input change ─┐
//! drop on preview   ─┼─→ queue ─→ pump() ─→ PendingRead ─→ complete_read()
//! page-level paste  ─┘
//! ```
//!
//! - Only files whose media type starts with the accepted prefix (`image/`)
//!   are queued; anything else is dropped without feedback
//! - `pump` takes each queued file, clears the empty marker on the container
//!   and hands back a [`PendingRead`] for the host to read into a data URL
//! - `complete_read` swaps the preview content for an `<img>`
//! - Reads are never cancelled: when several overlap, whichever completes
//!   last owns the preview

use std::collections::BTreeSet;
use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{dom_ids, BlockId, RenderTree, VNode, EMPTY_UPLOAD_CLASS};

/// Class on the preview region while a file is dragged over it
pub const DRAGOVER_CLASS: &str = "dragover";

const DEFAULT_MEDIA_PREFIX: &str = "image/";

/// A file handed to the uploader by one of its channels
pub trait UploadFile {
    /// Declared media type, e.g. `image/png`
    fn media_type(&self) -> String;
}

/// In-memory file, used by tests and non-browser hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// `data:<media type>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

impl UploadFile for MemoryFile {
    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// Channel a file arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSource {
    InputChange,
    Drop,
    Paste,
}

/// One clipboard item of a paste event
#[derive(Debug, Clone)]
pub struct ClipboardEntry<F> {
    pub media_type: String,
    pub file: Option<F>,
}

/// Element ids an upload region is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub file_input_id: String,
    pub content_id: String,
    pub container_id: String,
}

impl UploadTarget {
    pub fn new(
        file_input_id: impl Into<String>,
        content_id: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        Self {
            file_input_id: file_input_id.into(),
            content_id: content_id.into(),
            container_id: container_id.into(),
        }
    }

    /// Upload region of an image block
    pub fn for_block(id: BlockId) -> Self {
        Self::new(
            dom_ids::image_input(id),
            dom_ids::image_content(id),
            dom_ids::image_container(id),
        )
    }
}

/// Identifies one in-flight read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadTicket(pub u64);

impl fmt::Display for ReadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file the host must read into a data URL, then report back
#[derive(Debug)]
pub struct PendingRead<F> {
    pub ticket: ReadTicket,
    pub source: FileSource,
    pub file: F,
}

struct FileAccepted<F> {
    source: FileSource,
    file: F,
}

/// Sending half of the upload queue, bound to one channel
pub struct FileProducer<F> {
    source: FileSource,
    accept_prefix: String,
    sender: Sender<FileAccepted<F>>,
}

impl<F> Clone for FileProducer<F> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            accept_prefix: self.accept_prefix.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<F: UploadFile> FileProducer<F> {
    pub fn source(&self) -> FileSource {
        self.source
    }

    /// Queue `file` if it is an image; `false` if it was dropped
    pub fn offer(&self, file: F) -> bool {
        let media_type = file.media_type();
        if !media_type.starts_with(&self.accept_prefix) {
            debug!(source = ?self.source, media_type = %media_type, "Ignoring non-image file");
            return false;
        }
        self.sender
            .send(FileAccepted {
                source: self.source,
                file,
            })
            .is_ok()
    }

    /// Offer only the first file of a selection or drop
    pub fn offer_first(&self, files: impl IntoIterator<Item = F>) -> bool {
        match files.into_iter().next() {
            Some(file) => self.offer(file),
            None => false,
        }
    }

    /// Offer the first image item of a paste event
    pub fn offer_clipboard(&self, entries: impl IntoIterator<Item = ClipboardEntry<F>>) -> bool {
        let image = entries
            .into_iter()
            .filter(|entry| entry.media_type.starts_with(&self.accept_prefix))
            .find_map(|entry| entry.file);

        match image {
            Some(file) => self.offer(file),
            None => false,
        }
    }
}

/// An upload region bound to its three input channels
pub struct ImageUploader<F> {
    target: UploadTarget,
    accept_prefix: String,
    sender: Sender<FileAccepted<F>>,
    inbox: Receiver<FileAccepted<F>>,
    next_ticket: u64,
    in_flight: BTreeSet<ReadTicket>,
    last_completed: Option<ReadTicket>,
}

impl<F: UploadFile> ImageUploader<F> {
    /// Bind to `target`, accepting `image/*` files
    ///
    /// Returns `None` (after logging a warning) when any of the three
    /// elements is missing, so optional upload regions can be bound
    /// speculatively.
    pub fn bind<T: RenderTree + ?Sized>(tree: &T, target: UploadTarget) -> Option<Self> {
        Self::bind_with_prefix(tree, target, DEFAULT_MEDIA_PREFIX)
    }

    pub fn bind_with_prefix<T: RenderTree + ?Sized>(
        tree: &T,
        target: UploadTarget,
        accept_prefix: &str,
    ) -> Option<Self> {
        let present = tree.contains(&target.file_input_id)
            && tree.contains(&target.content_id)
            && tree.contains(&target.container_id);
        if !present {
            warn!(
                input = %target.file_input_id,
                content = %target.content_id,
                container = %target.container_id,
                "Image uploader: input, content, or container not found"
            );
            return None;
        }

        let (sender, inbox) = channel();
        Some(Self {
            target,
            accept_prefix: accept_prefix.to_string(),
            sender,
            inbox,
            next_ticket: 0,
            in_flight: BTreeSet::new(),
            last_completed: None,
        })
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }

    /// Producer for one input channel
    pub fn producer(&self, source: FileSource) -> FileProducer<F> {
        FileProducer {
            source,
            accept_prefix: self.accept_prefix.clone(),
            sender: self.sender.clone(),
        }
    }

    /// Drain the queue, starting a read for every accepted file
    pub fn pump<T: RenderTree + ?Sized>(&mut self, tree: &mut T) -> Vec<PendingRead<F>> {
        let mut reads = Vec::new();
        while let Ok(accepted) = self.inbox.try_recv() {
            tree.remove_class(&self.target.container_id, EMPTY_UPLOAD_CLASS);

            let ticket = ReadTicket(self.next_ticket);
            self.next_ticket += 1;
            self.in_flight.insert(ticket);

            debug!(ticket = %ticket, source = ?accepted.source, "Image accepted");
            reads.push(PendingRead {
                ticket,
                source: accepted.source,
                file: accepted.file,
            });
        }
        reads
    }

    /// Finish a read: show `data_url` in the preview region
    pub fn complete_read<T: RenderTree + ?Sized>(
        &mut self,
        tree: &mut T,
        ticket: ReadTicket,
        data_url: &str,
    ) -> bool {
        if !self.in_flight.remove(&ticket) {
            debug!(ticket = %ticket, "Ignoring completion of unknown read");
            return false;
        }
        self.last_completed = Some(ticket);
        tree.replace_children(&self.target.content_id, &preview_image(data_url))
    }

    /// Give up on a read that failed in the host
    pub fn fail_read(&mut self, ticket: ReadTicket) {
        if self.in_flight.remove(&ticket) {
            warn!(ticket = %ticket, "Image read failed");
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Ticket of the read currently shown in the preview
    pub fn last_completed(&self) -> Option<ReadTicket> {
        self.last_completed
    }

    pub fn drag_over<T: RenderTree + ?Sized>(&self, tree: &mut T) {
        tree.add_class(&self.target.content_id, DRAGOVER_CLASS);
    }

    pub fn drag_leave<T: RenderTree + ?Sized>(&self, tree: &mut T) {
        tree.remove_class(&self.target.content_id, DRAGOVER_CLASS);
    }
}

/// Preview element for an uploaded image
pub fn preview_image(data_url: &str) -> VNode {
    VNode::element("img")
        .with_attr("src", data_url)
        .with_attr("alt", "Uploaded preview")
        .with_attr(
            "style",
            "max-width: 100%; max-height: 400px; width: auto; border-radius: 0.5rem;",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockFactory, BlockKind, MemoryTree};

    fn bound_tree() -> (MemoryTree, ImageUploader<MemoryFile>) {
        let mut tree = MemoryTree::with_container("blocks");
        tree.append_child("blocks", &BlockFactory::default().render(BlockKind::Image, BlockId(0)));
        let uploader = ImageUploader::bind(&tree, UploadTarget::for_block(BlockId(0))).unwrap();
        (tree, uploader)
    }

    fn png(name: &str) -> MemoryFile {
        MemoryFile::new(name, "image/png", name.as_bytes().to_vec())
    }

    #[test]
    fn test_bind_requires_all_elements() {
        let tree = MemoryTree::with_container("blocks");
        let uploader: Option<ImageUploader<MemoryFile>> =
            ImageUploader::bind(&tree, UploadTarget::for_block(BlockId(0)));
        assert!(uploader.is_none());
    }

    #[test]
    fn test_data_url() {
        let file = MemoryFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        assert_eq!(file.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_non_image_is_dropped() {
        let (mut tree, mut uploader) = bound_tree();
        let producer = uploader.producer(FileSource::InputChange);

        assert!(!producer.offer(MemoryFile::new("notes.txt", "text/plain", b"hi".to_vec())));
        assert!(uploader.pump(&mut tree).is_empty());
        assert!(tree.has_class("image_container_0", EMPTY_UPLOAD_CLASS));
    }

    #[test]
    fn test_accept_then_complete() {
        let (mut tree, mut uploader) = bound_tree();
        assert!(uploader.producer(FileSource::Drop).offer(png("a")));

        let reads = uploader.pump(&mut tree);
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].source, FileSource::Drop);
        assert!(!tree.has_class("image_container_0", EMPTY_UPLOAD_CLASS));
        assert_eq!(uploader.in_flight(), 1);

        let url = reads[0].file.to_data_url();
        assert!(uploader.complete_read(&mut tree, reads[0].ticket, &url));
        let preview = tree.children_snapshot("image_content_0");
        assert_eq!(preview, vec![preview_image(&url)]);
        assert_eq!(uploader.in_flight(), 0);

        // A ticket completes once
        assert!(!uploader.complete_read(&mut tree, reads[0].ticket, &url));
    }

    #[test]
    fn test_last_completed_read_wins() {
        let (mut tree, mut uploader) = bound_tree();
        let input = uploader.producer(FileSource::InputChange);
        input.offer(png("first"));
        input.offer(png("second"));

        let reads = uploader.pump(&mut tree);
        assert_eq!(reads.len(), 2);

        // The second selection finishes reading before the first
        let second = reads[1].file.to_data_url();
        let first = reads[0].file.to_data_url();
        uploader.complete_read(&mut tree, reads[1].ticket, &second);
        uploader.complete_read(&mut tree, reads[0].ticket, &first);

        assert_eq!(tree.children_snapshot("image_content_0"), vec![preview_image(&first)]);
        assert_eq!(uploader.last_completed(), Some(reads[0].ticket));
    }

    #[test]
    fn test_offer_first_only_considers_first_file() {
        let (_tree, uploader) = bound_tree();
        let drop = uploader.producer(FileSource::Drop);

        let files = vec![MemoryFile::new("a.pdf", "application/pdf", Vec::<u8>::new()), png("b")];
        assert!(!drop.offer_first(files));
        assert!(!drop.offer_first(Vec::new()));
    }

    #[test]
    fn test_clipboard_takes_first_image_item() {
        let (mut tree, mut uploader) = bound_tree();
        let paste = uploader.producer(FileSource::Paste);

        let entries = vec![
            ClipboardEntry { media_type: "text/plain".to_string(), file: None },
            ClipboardEntry { media_type: "image/png".to_string(), file: None },
            ClipboardEntry { media_type: "image/png".to_string(), file: Some(png("one")) },
            ClipboardEntry { media_type: "image/gif".to_string(), file: Some(png("two")) },
        ];
        assert!(paste.offer_clipboard(entries));

        let reads = uploader.pump(&mut tree);
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].file.name, "one");
    }

    #[test]
    fn test_dragover_marker() {
        let (mut tree, uploader) = bound_tree();
        uploader.drag_over(&mut tree);
        assert!(tree.has_class("image_content_0", DRAGOVER_CLASS));
        uploader.drag_leave(&mut tree);
        assert!(!tree.has_class("image_content_0", DRAGOVER_CLASS));
    }

    #[test]
    fn test_failed_read_leaves_preview() {
        let (mut tree, mut uploader) = bound_tree();
        uploader.producer(FileSource::Paste).offer(png("a"));
        let reads = uploader.pump(&mut tree);

        let before = tree.children_snapshot("image_content_0");
        uploader.fail_read(reads[0].ticket);
        assert_eq!(uploader.in_flight(), 0);
        assert_eq!(tree.children_snapshot("image_content_0"), before);
    }
}
