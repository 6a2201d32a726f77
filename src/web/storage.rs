//! [`KeyValueBackend`] over the extension's `chrome.storage.local` area.
//!
//! The popup stores the profile list as a JSON array and everything else as
//! strings. Values read back are handed to the storage layer as strings
//! (non-string values are JSON-encoded), and string values that hold a JSON
//! array or object are written back as structured values so the popup keeps
//! reading them.

use async_trait::async_trait;
use js_sys::{Function, JSON, Object, Promise, Reflect};
use replyguy_storage_local::{KeyValueBackend, LocalStorageError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn unavailable(err: JsValue) -> LocalStorageError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    LocalStorageError::Unavailable(message)
}

pub struct LocalStorageBackend {
    area: Object,
}

impl LocalStorageBackend {
    /// Resolve `chrome.storage.local`.
    pub fn new() -> Result<Self, LocalStorageError> {
        let global = js_sys::global();
        let mut current: JsValue = global.into();
        for name in ["chrome", "storage", "local"] {
            current = Reflect::get(&current, &JsValue::from_str(name)).map_err(unavailable)?;
            if current.is_undefined() || current.is_null() {
                return Err(LocalStorageError::Unavailable(format!("{} is not defined", name)));
            }
        }
        Ok(Self {
            area: current.dyn_into().map_err(unavailable)?,
        })
    }

    /// Register `callback` with `chrome.storage.onChanged`.
    pub fn on_changed(&self, callback: &Function) -> Result<(), LocalStorageError> {
        let global: JsValue = js_sys::global().into();
        let mut current = global;
        for name in ["chrome", "storage", "onChanged"] {
            current = Reflect::get(&current, &JsValue::from_str(name)).map_err(unavailable)?;
        }
        let add: Function = Reflect::get(&current, &JsValue::from_str("addListener"))
            .map_err(unavailable)?
            .dyn_into()
            .map_err(unavailable)?;
        add.call1(&current, callback).map_err(unavailable)?;
        Ok(())
    }

    async fn call(&self, method: &str, arg: &JsValue) -> Result<JsValue, LocalStorageError> {
        let function: Function = Reflect::get(&self.area, &JsValue::from_str(method))
            .map_err(unavailable)?
            .dyn_into()
            .map_err(unavailable)?;
        let promise: Promise = function
            .call1(&self.area, arg)
            .map_err(unavailable)?
            .dyn_into()
            .map_err(unavailable)?;
        JsFuture::from(promise).await.map_err(unavailable)
    }
}

#[async_trait(?Send)]
impl KeyValueBackend for LocalStorageBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        let items = self.call("get", &JsValue::from_str(key)).await?;
        let value = Reflect::get(&items, &JsValue::from_str(key)).map_err(unavailable)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        if let Some(text) = value.as_string() {
            return Ok(Some(text));
        }
        let encoded = JSON::stringify(&value).map_err(unavailable)?;
        Ok(Some(String::from(encoded)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        let trimmed = value.trim_start();
        let stored = if trimmed.starts_with('[') || trimmed.starts_with('{') {
            JSON::parse(value).unwrap_or_else(|_| JsValue::from_str(value))
        } else {
            JsValue::from_str(value)
        };
        let items = Object::new();
        Reflect::set(&items, &JsValue::from_str(key), &stored).map_err(unavailable)?;
        self.call("set", &items).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStorageError> {
        self.call("remove", &JsValue::from_str(key)).await?;
        Ok(())
    }
}
