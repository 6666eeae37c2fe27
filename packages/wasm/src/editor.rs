//! # Recipe Editor Bindings
//!
//! Wires [`BlockListController`] and the main image uploader to the page.
//!
//! ## Listeners
//!
//! - add text / add image buttons: append a block
//! - blocks container click: delegated move/delete via `.block-action`
//! - per upload region: `change` on the input, `dragover` / `dragleave` /
//!   `drop` on the preview
//! - window `paste`: offered to every upload region
//!
//! Accepted files are read with a `FileReader`; each `loadend` reports back
//! with its ticket so the uploader can swap in the preview.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use recipebook_editor::{
    dom_ids, BlockAction, BlockId, BlockKind, BlockListController, ClipboardEntry, EditorConfig, FileSource,
    ImageUploader, PendingRead, ReadTicket, UploadFile, UploadTarget, ACTION_CLASS,
};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Document, DragEvent, Element, Event, FileReader, HtmlInputElement};

use crate::dom::{window, DomTree, EventListener};
use crate::forms;

/// A browser `File` as seen by the uploader
#[derive(Debug, Clone)]
pub struct BrowserFile(pub web_sys::File);

impl UploadFile for BrowserFile {
    fn media_type(&self) -> String {
        self.0.type_()
    }
}

/// Which upload region a file or read belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum UploadSlot {
    Main,
    Block(BlockId),
}

struct EditorState {
    controller: BlockListController<DomTree, BrowserFile>,
    main_image: Option<ImageUploader<BrowserFile>>,
}

impl EditorState {
    fn offer(&mut self, slot: UploadSlot, source: FileSource, file: BrowserFile) -> bool {
        match slot {
            UploadSlot::Block(id) => self.controller.offer_file(id, source, file),
            UploadSlot::Main => match &self.main_image {
                Some(uploader) => uploader.producer(source).offer(file),
                None => false,
            },
        }
    }

    fn paste(&mut self, entries: &[ClipboardEntry<BrowserFile>]) {
        let accepted = self.controller.broadcast_paste(entries);
        if let Some(uploader) = &self.main_image {
            uploader
                .producer(FileSource::Paste)
                .offer_clipboard(entries.iter().cloned());
        }
        debug!(blocks = accepted.len(), "Paste delivered");
    }

    fn pump(&mut self) -> Vec<(UploadSlot, PendingRead<BrowserFile>)> {
        let mut reads: Vec<_> = self
            .controller
            .pump_uploads()
            .into_iter()
            .map(|(id, read)| (UploadSlot::Block(id), read))
            .collect();
        if let Some(uploader) = self.main_image.as_mut() {
            let tree = self.controller.tree_mut();
            reads.extend(uploader.pump(tree).into_iter().map(|read| (UploadSlot::Main, read)));
        }
        reads
    }

    fn complete(&mut self, slot: UploadSlot, ticket: ReadTicket, data_url: &str) {
        match slot {
            UploadSlot::Block(id) => {
                self.controller.complete_read(id, ticket, data_url);
            }
            UploadSlot::Main => {
                if let Some(uploader) = self.main_image.as_mut() {
                    uploader.complete_read(self.controller.tree_mut(), ticket, data_url);
                }
            }
        }
    }

    fn fail(&mut self, slot: UploadSlot, ticket: ReadTicket) {
        match slot {
            UploadSlot::Block(id) => self.controller.fail_read(id, ticket),
            UploadSlot::Main => {
                if let Some(uploader) = self.main_image.as_mut() {
                    uploader.fail_read(ticket);
                }
            }
        }
    }

    fn drag(&mut self, slot: UploadSlot, over: bool) {
        match (slot, over) {
            (UploadSlot::Block(id), true) => self.controller.drag_over(id),
            (UploadSlot::Block(id), false) => self.controller.drag_leave(id),
            (UploadSlot::Main, _) => {
                if let Some(uploader) = &self.main_image {
                    let tree = self.controller.tree_mut();
                    if over {
                        uploader.drag_over(tree);
                    } else {
                        uploader.drag_leave(tree);
                    }
                }
            }
        }
    }
}

type SharedState = Rc<RefCell<EditorState>>;
type SlotListeners = Rc<RefCell<HashMap<UploadSlot, Vec<EventListener>>>>;

/// Handle to a mounted editor; dropping it detaches every listener
///
/// Block ids cross into JS as plain numbers.
#[wasm_bindgen]
pub struct RecipeEditor {
    state: SharedState,
    slots: SlotListeners,
    document: Document,
    _page_listeners: Vec<EventListener>,
    _tags: Option<forms::TagInputBinding>,
}

#[wasm_bindgen]
impl RecipeEditor {
    /// Block ids in rendered order
    #[wasm_bindgen(js_name = blockOrder)]
    pub fn block_order(&self) -> Vec<f64> {
        self.state
            .borrow()
            .controller
            .order()
            .into_iter()
            .map(|id| id.0 as f64)
            .collect()
    }

    #[wasm_bindgen(js_name = addTextBlock)]
    pub fn add_text_block(&self) -> f64 {
        add_block(&self.state, &self.slots, &self.document, BlockKind::Text).0 as f64
    }

    /// Append an image block with its upload region bound
    #[wasm_bindgen(js_name = addImageBlock)]
    pub fn add_image_block(&self) -> f64 {
        add_block(&self.state, &self.slots, &self.document, BlockKind::Image).0 as f64
    }
}

/// Append a block; image blocks also get their upload listeners
fn add_block(state: &SharedState, slots: &SlotListeners, document: &Document, kind: BlockKind) -> BlockId {
    let id = state.borrow_mut().controller.add_block(kind);
    if kind != BlockKind::Image || state.borrow().controller.uploader(id).is_none() {
        return id;
    }
    let slot = UploadSlot::Block(id);
    match bind_upload_region(state, document, slot, &UploadTarget::for_block(id)) {
        Ok(listeners) => {
            slots.borrow_mut().insert(slot, listeners);
        }
        Err(err) => warn!(block = %id, error = ?err, "Failed to bind upload listeners"),
    }
    id
}

/// Mount the block editor, main image uploader and tag input
///
/// `config_json` may override any [`EditorConfig`] field; pass `undefined`
/// for the stock recipe page.
#[wasm_bindgen(js_name = mountRecipeEditor)]
pub fn mount_recipe_editor(config_json: Option<String>) -> Result<RecipeEditor, JsValue> {
    let config = match config_json {
        Some(json) => EditorConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => EditorConfig::default(),
    };
    let tree = DomTree::from_window()?;
    let document = tree.document().clone();

    let main_image = ImageUploader::bind_with_prefix(
        &tree,
        config.main_image.clone(),
        &config.accepted_media_prefix,
    );
    let tags = match forms::TagInputBinding::mount(&document, &config.tag_input_id, &config.tag_container_id) {
        Ok(binding) => Some(binding),
        Err(err) => {
            warn!(error = ?err, "Tag input not mounted");
            None
        }
    };

    let controller = BlockListController::mount(tree, config.clone())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let state: SharedState = Rc::new(RefCell::new(EditorState {
        controller,
        main_image,
    }));
    let slots: SlotListeners = Rc::new(RefCell::new(HashMap::new()));

    if state.borrow().main_image.is_some() {
        let listeners = bind_upload_region(&state, &document, UploadSlot::Main, &config.main_image)?;
        slots.borrow_mut().insert(UploadSlot::Main, listeners);
    }

    let mut page_listeners = Vec::new();

    for (button_id, kind) in [
        (&config.add_text_button_id, BlockKind::Text),
        (&config.add_image_button_id, BlockKind::Image),
    ] {
        let Some(button) = document.get_element_by_id(button_id) else {
            warn!(button = %button_id, kind = kind.as_str(), "Add block button not found");
            continue;
        };
        let state = state.clone();
        let slots = slots.clone();
        let document = document.clone();
        page_listeners.push(EventListener::new(&button, "click", move |_| {
            add_block(&state, &slots, &document, kind);
        })?);
    }

    if let Some(container) = document.get_element_by_id(&config.container_id) {
        let state = state.clone();
        let slots = slots.clone();
        page_listeners.push(EventListener::new(&container, "click", move |event| {
            let Some(button) = closest_action(&event) else {
                return;
            };
            let action = button.get_attribute("data-action");
            let id = button.get_attribute("data-id");
            let changed = state
                .borrow_mut()
                .controller
                .handle_action(action.as_deref(), id.as_deref());

            // Deleted image blocks take their upload listeners with them
            if changed && action.as_deref() == Some(BlockAction::Delete.as_str()) {
                if let Some(id) = id.and_then(|id| id.parse::<BlockId>().ok()) {
                    slots.borrow_mut().remove(&UploadSlot::Block(id));
                }
            }
        })?);
    }

    {
        let state = state.clone();
        let window = window()?;
        page_listeners.push(EventListener::new(&window, "paste", move |event| {
            let entries = clipboard_entries(&event);
            if entries.is_empty() {
                return;
            }
            state.borrow_mut().paste(&entries);
            start_reads(&state);
        })?);
    }

    info!(container = %config.container_id, "Recipe editor ready");
    Ok(RecipeEditor {
        state,
        slots,
        document,
        _page_listeners: page_listeners,
        _tags: tags,
    })
}

fn closest_action(event: &Event) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(&format!(".{}", ACTION_CLASS))
        .ok()
        .flatten()
}

fn clipboard_entries(event: &Event) -> Vec<ClipboardEntry<BrowserFile>> {
    let Some(items) = event
        .dyn_ref::<ClipboardEvent>()
        .and_then(|e| e.clipboard_data())
        .map(|data| data.items())
    else {
        return Vec::new();
    };
    (0..items.length())
        .filter_map(|i| items.get(i))
        .map(|item| ClipboardEntry {
            media_type: item.type_(),
            file: item.get_as_file().ok().flatten().map(BrowserFile),
        })
        .collect()
}

/// Listeners for one upload region: input change plus drag and drop on the
/// preview
fn bind_upload_region(
    state: &SharedState,
    document: &Document,
    slot: UploadSlot,
    target: &UploadTarget,
) -> Result<Vec<EventListener>, JsValue> {
    let input = document
        .get_element_by_id(&target.file_input_id)
        .ok_or_else(|| JsValue::from_str(&target.file_input_id))?;
    let content = document
        .get_element_by_id(&target.content_id)
        .ok_or_else(|| JsValue::from_str(&target.content_id))?;

    let mut listeners = Vec::with_capacity(4);

    {
        let state = state.clone();
        listeners.push(EventListener::new(&input, "change", move |event| {
            let file = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                state
                    .borrow_mut()
                    .offer(slot, FileSource::InputChange, BrowserFile(file));
                start_reads(&state);
            }
        })?);
    }

    {
        let state = state.clone();
        listeners.push(EventListener::new(&content, "dragover", move |event| {
            event.prevent_default();
            state.borrow_mut().drag(slot, true);
        })?);
    }

    {
        let state = state.clone();
        listeners.push(EventListener::new(&content, "dragleave", move |_| {
            state.borrow_mut().drag(slot, false);
        })?);
    }

    {
        let state = state.clone();
        listeners.push(EventListener::new(&content, "drop", move |event| {
            event.prevent_default();
            state.borrow_mut().drag(slot, false);
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(|e| e.data_transfer())
                .and_then(|data| data.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                state.borrow_mut().offer(slot, FileSource::Drop, BrowserFile(file));
                start_reads(&state);
            }
        })?);
    }

    debug!(slot = ?slot, input = %target.file_input_id, "Upload region bound");
    Ok(listeners)
}

fn start_reads(state: &SharedState) {
    let reads = state.borrow_mut().pump();
    for (slot, read) in reads {
        let ticket = read.ticket;
        if let Err(err) = read_as_data_url(state, slot, read) {
            warn!(slot = ?slot, error = ?err, "Could not start image read");
            state.borrow_mut().fail(slot, ticket);
        }
    }
}

fn read_as_data_url(
    state: &SharedState,
    slot: UploadSlot,
    read: PendingRead<BrowserFile>,
) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    let ticket = read.ticket;

    // `loadend` fires exactly once, after either `load` or `error`
    let onloadend = {
        let state = state.clone();
        let reader = reader.clone();
        Closure::once_into_js(move || {
            let data_url = reader
                .result()
                .ok()
                .and_then(|value| value.dyn_into::<js_sys::JsString>().ok())
                .map(String::from);
            let mut state = state.borrow_mut();
            match data_url {
                Some(data_url) => state.complete(slot, ticket, &data_url),
                None => state.fail(slot, ticket),
            }
        })
    };

    reader.set_onloadend(Some(onloadend.unchecked_ref()));
    reader.read_as_data_url(&read.file.0)
}

/// Image block element ids, for page scripts that post the form
#[wasm_bindgen(js_name = imageBlockInputId)]
pub fn image_block_input_id(id: f64) -> String {
    dom_ids::image_input(BlockId(id as u64))
}
