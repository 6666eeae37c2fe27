//! Integration tests for the block editor

use recipebook_editor::{
    dom_ids, BlockId, BlockKind, BlockListController, EditorConfig, MemoryTree, RenderTree,
};

fn editor() -> BlockListController<MemoryTree> {
    let config = EditorConfig::default();
    let tree = MemoryTree::with_container(&config.container_id);
    BlockListController::mount(tree, config).unwrap()
}

#[test]
fn test_add_move_delete_scenario() {
    let mut editor = editor();

    // Add text
    let text = editor.add_block(BlockKind::Text);
    assert_eq!(text, BlockId(0));
    assert!(editor.tree().contains("content_block_0"));
    assert!(editor.tree().contains("text_block_0"));

    // Add image
    let image = editor.add_block(BlockKind::Image);
    assert_eq!(image, BlockId(1));
    assert!(editor.tree().contains("content_block_1"));
    assert!(editor.tree().contains("image_container_1"));

    // Move the image above the text
    assert!(editor.handle_action(Some("up"), Some("1")));
    assert_eq!(editor.order(), vec![BlockId(1), BlockId(0)]);

    // Delete the text block
    assert!(editor.handle_action(Some("delete"), Some("0")));
    assert_eq!(editor.order(), vec![BlockId(1)]);
    assert!(!editor.tree().contains("content_block_0"));

    // Ids are not reused
    let next = editor.add_block(BlockKind::Text);
    assert_eq!(next, BlockId(2));
    assert_eq!(editor.order(), vec![BlockId(1), BlockId(2)]);
}

#[test]
fn test_custom_container() -> anyhow::Result<()> {
    let config = EditorConfig::from_json(r#"{ "containerId": "recipe_blocks" }"#)?;
    let tree = MemoryTree::with_container("recipe_blocks");
    let mut editor: BlockListController<MemoryTree> = BlockListController::mount(tree, config)?;

    let id = editor.add_block(BlockKind::Text);
    assert_eq!(editor.tree().child_ids("recipe_blocks"), vec![dom_ids::content_block(id)]);
    Ok(())
}

#[test]
fn test_rendered_block_attributes() {
    let mut editor = editor();
    let id = editor.add_block(BlockKind::Image);

    let tree = editor.tree();
    assert_eq!(
        tree.attribute(&dom_ids::content_block(id), "data-block-type").as_deref(),
        Some("image")
    );
    assert_eq!(
        tree.attribute(&dom_ids::image_input(id), "type").as_deref(),
        Some("file")
    );
    assert_eq!(
        tree.attribute(&dom_ids::image_caption(id), "name").as_deref(),
        Some("image_captions[]")
    );
}
