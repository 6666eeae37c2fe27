//! Upload region behavior across the three input channels

use recipebook_editor::{
    dom_ids, BlockFactory, BlockId, BlockKind, ClipboardEntry, FileSource, ImageUploader,
    MemoryFile, MemoryTree, RenderTree, UploadTarget, VNode, EMPTY_UPLOAD_CLASS,
};

fn image_region() -> (MemoryTree, ImageUploader<MemoryFile>) {
    let mut tree = MemoryTree::with_container("blocks_container");
    tree.append_child(
        "blocks_container",
        &BlockFactory::default().render(BlockKind::Image, BlockId(0)),
    );
    let uploader = ImageUploader::bind(&tree, UploadTarget::for_block(BlockId(0))).unwrap();
    (tree, uploader)
}

fn photo() -> MemoryFile {
    MemoryFile::new("pie.jpg", "image/jpeg", vec![0xffu8, 0xd8, 0xff, 0xe0])
}

/// Run one file through a channel and return the resulting preview content
fn preview_after(source: FileSource, file: MemoryFile) -> (Vec<VNode>, bool) {
    let (mut tree, mut uploader) = image_region();
    let producer = uploader.producer(source);

    match source {
        FileSource::InputChange | FileSource::Drop => {
            producer.offer_first(vec![file]);
        }
        FileSource::Paste => {
            producer.offer_clipboard(vec![ClipboardEntry {
                media_type: file.media_type.clone(),
                file: Some(file),
            }]);
        }
    }

    for read in uploader.pump(&mut tree) {
        let url = read.file.to_data_url();
        uploader.complete_read(&mut tree, read.ticket, &url);
    }

    let content_id = dom_ids::image_content(BlockId(0));
    let container_id = dom_ids::image_container(BlockId(0));
    (
        tree.children_snapshot(&content_id),
        tree.has_class(&container_id, EMPTY_UPLOAD_CLASS),
    )
}

#[test]
fn test_channels_produce_same_preview() {
    let by_input = preview_after(FileSource::InputChange, photo());
    let by_drop = preview_after(FileSource::Drop, photo());
    let by_paste = preview_after(FileSource::Paste, photo());

    assert_eq!(by_input, by_drop);
    assert_eq!(by_input, by_paste);

    let (preview, still_empty) = by_input;
    assert!(!still_empty);
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].tag(), Some("img"));
    assert_eq!(preview[0].attribute("src"), Some("data:image/jpeg;base64,/9j/4A=="));
    assert_eq!(preview[0].attribute("alt"), Some("Uploaded preview"));
}

#[test]
fn test_non_image_leaves_region_untouched() {
    let (tree, _) = image_region();
    let placeholder = tree.children_snapshot(&dom_ids::image_content(BlockId(0)));

    for source in [FileSource::InputChange, FileSource::Drop, FileSource::Paste] {
        let recipe = MemoryFile::new("recipe.pdf", "application/pdf", b"%PDF".to_vec());
        let (preview, still_empty) = preview_after(source, recipe);

        assert_eq!(preview, placeholder);
        assert!(still_empty);
    }
}

#[test]
fn test_missing_region_binds_nothing() {
    let mut tree = MemoryTree::with_container("blocks_container");
    tree.append_child(
        "blocks_container",
        &BlockFactory::default().render(BlockKind::Text, BlockId(0)),
    );

    let bound: Option<ImageUploader<MemoryFile>> =
        ImageUploader::bind(&tree, UploadTarget::for_block(BlockId(0)));
    assert!(bound.is_none());
}

#[test]
fn test_main_image_region() {
    let mut tree = MemoryTree::new();
    tree.mount(
        &VNode::element("div")
            .with_id("main_image_container")
            .with_class("image-upload image-upload--empty")
            .with_child(VNode::element("input").with_id("main_image").with_attr("type", "file"))
            .with_child(VNode::element("div").with_id("image_upload_content")),
    );

    let target = UploadTarget::new("main_image", "image_upload_content", "main_image_container");
    let mut uploader: ImageUploader<MemoryFile> = ImageUploader::bind(&tree, target).unwrap();

    uploader.producer(FileSource::Drop).offer(photo());
    let reads = uploader.pump(&mut tree);
    assert!(!tree.has_class("main_image_container", EMPTY_UPLOAD_CLASS));

    // Preview is only swapped in once the read finishes
    assert!(tree.children_snapshot("image_upload_content").is_empty());
    let url = reads[0].file.to_data_url();
    uploader.complete_read(&mut tree, reads[0].ticket, &url);
    assert_eq!(tree.children_snapshot("image_upload_content").len(), 1);
}
