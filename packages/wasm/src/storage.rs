use recipebook_common::{CommonError, CommonResult, KeyValueStore};
use wasm_bindgen::JsValue;

/// The page's `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> CommonResult<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| CommonError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| CommonError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> CommonResult<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set_item(&self, key: &str, value: &str) -> CommonResult<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&self, key: &str) -> CommonResult<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}

fn storage_error(err: JsValue) -> CommonError {
    CommonError::Storage(format!("{:?}", err))
}
