use super::store::KeyValueStore;
use crate::domain::{SessionRecord, Task};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// JSON shape an element must have to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    String,
}

/// A JSON array stored under one key, decoded with decode-or-default rules:
/// a missing key, null, invalid JSON or non-array payload is an empty list,
/// and elements of the wrong shape are skipped.
pub struct Collection<T> {
    key: &'static str,
    shape: Shape,
    _marker: PhantomData<fn() -> T>,
}

pub const SESSIONS: Collection<SessionRecord> = Collection::new("sessions", Shape::Object);
pub const TASKS: Collection<Task> = Collection::new("tasks", Shape::Object);
pub const CATEGORIES: Collection<String> = Collection::new("categories", Shape::String);

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub const fn new(key: &'static str, shape: Shape) -> Self {
        Self {
            key,
            shape,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Decode a raw stored value. Never fails.
    pub fn decode(&self, raw: Option<&str>) -> Vec<T> {
        let Some(raw) = raw else {
            return Vec::new();
        };

        let items = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            Ok(Value::Null) => return Vec::new(),
            Ok(_) => {
                log::warn!("Stored '{}' is not an array, treating as empty", self.key);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Stored '{}' is not valid JSON ({}), treating as empty", self.key, e);
                return Vec::new();
            }
        };

        let total = items.len();
        let decoded: Vec<T> = items
            .into_iter()
            .filter(|item| match self.shape {
                Shape::Object => item.is_object(),
                Shape::String => item.is_string(),
            })
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if decoded.len() < total {
            log::warn!("Skipped {} malformed '{}' entries", total - decoded.len(), self.key);
        }
        decoded
    }

    /// Load the collection. Store access errors propagate; bad content does not.
    pub fn load(&self, store: &dyn KeyValueStore) -> Result<Vec<T>> {
        let raw = store.get(self.key)?;
        Ok(self.decode(raw.as_deref()))
    }

    /// Replace the whole collection
    pub fn save(&self, store: &mut dyn KeyValueStore, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)
            .with_context(|| format!("Failed to encode '{}'", self.key))?;
        store.set(self.key, &json)
    }

    /// Read the stored list, append one item and write the whole list back.
    /// Returns the list as written.
    pub fn append(&self, store: &mut dyn KeyValueStore, item: T) -> Result<Vec<T>> {
        let mut items = self.load(store)?;
        items.push(item);
        self.save(store, &items)?;
        Ok(items)
    }
}
