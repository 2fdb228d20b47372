use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use uuid::Uuid;

use crate::error::Error;

use super::{BackingStore, BackingStoreSubscriber, Value};

#[derive(Debug)]
struct Entry {
    value: Value,
    dirty: AtomicBool,
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Entry {
            value: self.value.clone(),
            dirty: AtomicBool::new(self.dirty.load(Ordering::Relaxed)),
        }
    }
}

/// [BackingStore] keeping its entries in memory.
///
/// A write is recorded as a change if initialization was completed when it
/// happened. New stores start with initialization completed, so values set
/// on a freshly constructed model are changes, while values assigned during
/// deserialization (between the parse hooks) are not.
pub struct InMemoryBackingStore {
    entries: BTreeMap<String, Entry>,
    subscribers: HashMap<String, BackingStoreSubscriber>,
    initialization_completed: AtomicBool,
    return_only_changed_values: AtomicBool,
}

impl InMemoryBackingStore {
    /// Creates an empty store
    pub fn new() -> Self {
        InMemoryBackingStore {
            entries: BTreeMap::new(),
            subscribers: HashMap::new(),
            initialization_completed: AtomicBool::new(true),
            return_only_changed_values: AtomicBool::new(false),
        }
    }

    /// Stores a value under a key that is known to be valid, bypassing the
    /// key check of [BackingStore::set].
    pub fn put(&mut self, key: &str, value: Value) {
        let dirty = self.initialization_completed.load(Ordering::Relaxed);
        let old = self.entries.insert(
            key.to_owned(),
            Entry {
                value,
                dirty: AtomicBool::new(dirty),
            },
        );
        if self.subscribers.is_empty() {
            return;
        }
        let new = self.entries.get(key).map(|entry| &entry.value);
        for subscriber in self.subscribers.values() {
            subscriber(key, old.as_ref().map(|entry| &entry.value), new);
        }
    }

    fn is_changed(entry: &Entry) -> bool {
        entry.dirty.load(Ordering::Relaxed) || nested_changes(&entry.value)
    }

    fn is_visible(&self, entry: &Entry) -> bool {
        !self.return_only_changed_values.load(Ordering::Relaxed) || Self::is_changed(entry)
    }
}

impl Default for InMemoryBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryBackingStore {
    fn clone(&self) -> Self {
        InMemoryBackingStore {
            entries: self.entries.clone(),
            subscribers: self.subscribers.clone(),
            initialization_completed: AtomicBool::new(
                self.initialization_completed.load(Ordering::Relaxed),
            ),
            return_only_changed_values: AtomicBool::new(
                self.return_only_changed_values.load(Ordering::Relaxed),
            ),
        }
    }
}

impl fmt::Debug for InMemoryBackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackingStore")
            .field("entries", &self.entries)
            .field("subscribers", &self.subscribers.keys().collect::<Vec<_>>())
            .field("initialization_completed", &self.initialization_completed)
            .field("return_only_changed_values", &self.return_only_changed_values)
            .finish()
    }
}

fn validate_key(key: &str) -> Result<&str, Error> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Store("key cannot be empty".to_owned()));
    }
    Ok(key)
}

/// Whether a value holds a nested model with changes
fn nested_changes(value: &Value) -> bool {
    match value {
        Value::Object(model) => model
            .as_backed_model()
            .is_some_and(|model| model.backing_store().has_changed_values()),
        Value::Collection(items) => items.iter().any(nested_changes),
        _ => false,
    }
}

/// Applies `f` to the store of every nested model in `value`
fn for_each_nested_store(value: &Value, f: &dyn Fn(&dyn BackingStore)) {
    match value {
        Value::Object(model) => {
            if let Some(model) = model.as_backed_model() {
                f(model.backing_store())
            }
        }
        Value::Collection(items) => items
            .iter()
            .for_each(|item| for_each_nested_store(item, f)),
        _ => (),
    }
}

impl BackingStore for InMemoryBackingStore {
    fn get(&self, key: &str) -> Result<Option<&Value>, Error> {
        let key = validate_key(key)?;
        Ok(self
            .entries
            .get(key)
            .filter(|entry| self.is_visible(entry))
            .map(|entry| &entry.value))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), Error> {
        let key = validate_key(key)?;
        self.put(key, value);
        Ok(())
    }

    fn enumerate(&self) -> Result<Vec<(&str, &Value)>, Error> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, entry)| self.is_visible(entry))
            .map(|(key, entry)| (key.as_str(), &entry.value))
            .collect())
    }

    fn enumerate_keys_for_values_changed_to_null(&self) -> Result<Vec<&str>, Error> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, entry)| entry.value.is_null() && entry.dirty.load(Ordering::Relaxed))
            .map(|(key, _)| key.as_str())
            .collect())
    }

    fn subscribe(&mut self, subscriber: BackingStoreSubscriber) -> String {
        let id = Uuid::new_v4().to_string();
        self.subscribers.insert(id.clone(), subscriber);
        id
    }

    fn subscribe_with_id(&mut self, id: &str, subscriber: BackingStoreSubscriber) {
        self.subscribers.insert(id.to_owned(), subscriber);
    }

    fn unsubscribe(&mut self, id: &str) -> Result<(), Error> {
        self.subscribers.remove(id);
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn initialization_completed(&self) -> bool {
        self.initialization_completed.load(Ordering::Relaxed)
    }

    fn set_initialization_completed(&self, completed: bool) {
        self.initialization_completed
            .store(completed, Ordering::Relaxed);
        for entry in self.entries.values() {
            entry.dirty.store(!completed, Ordering::Relaxed);
            for_each_nested_store(&entry.value, &|store| {
                store.set_initialization_completed(completed)
            });
        }
    }

    fn return_only_changed_values(&self) -> bool {
        self.return_only_changed_values.load(Ordering::Relaxed)
    }

    fn set_return_only_changed_values(&self, value: bool) {
        self.return_only_changed_values
            .store(value, Ordering::Relaxed);
        for entry in self.entries.values() {
            for_each_nested_store(&entry.value, &|store| {
                store.set_return_only_changed_values(value)
            });
        }
    }

    fn has_changed_values(&self) -> bool {
        self.entries.values().any(Self::is_changed)
    }

    fn clone_box(&self) -> Box<dyn BackingStore> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::store::BackingStoreExt;

    #[test]
    fn get_and_set() {
        let mut store = InMemoryBackingStore::new();
        store.set_value("displayName", Some("Contoso".to_owned())).unwrap();
        store.set_value("count", Some(3i32)).unwrap();
        assert_eq!(
            store.get_value::<String>("displayName").unwrap().as_deref(),
            Some("Contoso")
        );
        assert_eq!(store.get_value::<i32>("count").unwrap(), Some(3));
        assert_eq!(store.get_value::<String>("missing").unwrap(), None);
    }

    #[test]
    fn null_reads_as_absent() {
        let mut store = InMemoryBackingStore::new();
        store.set_value::<String>("displayName", None).unwrap();
        assert_eq!(store.get("displayName").unwrap(), Some(&Value::Null));
        assert_eq!(store.get_value::<String>("displayName").unwrap(), None);
    }

    #[test]
    fn empty_key_is_an_error() {
        let mut store = InMemoryBackingStore::new();
        assert!(matches!(store.get("  "), Err(Error::Store(_))));
        assert!(matches!(store.set("", Value::Null), Err(Error::Store(_))));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let mut store = InMemoryBackingStore::new();
        store.set_value("count", Some(3i32)).unwrap();
        let err = store.get_value::<String>("count").unwrap_err();
        assert!(matches!(err, Error::Type(key, type_name) if key == "count" && type_name == "string"));
    }

    #[test]
    fn change_tracking() {
        let mut store = InMemoryBackingStore::new();
        store.set_initialization_completed(false);
        store.set_value("displayName", Some("Contoso".to_owned())).unwrap();
        store.set_value("id", Some("1".to_owned())).unwrap();
        store.set_initialization_completed(true);
        assert!(!store.has_changed_values());

        store.set_value("displayName", Some("Fabrikam".to_owned())).unwrap();
        store.set_value::<String>("id", None).unwrap();
        store.set_return_only_changed_values(true);

        let changed: Vec<&str> = store
            .enumerate()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(changed, vec!["displayName", "id"]);
        assert_eq!(
            store.enumerate_keys_for_values_changed_to_null().unwrap(),
            vec!["id"]
        );

        store.set_initialization_completed(true);
        assert!(store.enumerate().unwrap().is_empty());
        assert_eq!(store.get("displayName").unwrap(), None);

        store.set_return_only_changed_values(false);
        assert_eq!(
            store.get("displayName").unwrap(),
            Some(&Value::String("Fabrikam".to_owned()))
        );
    }

    #[test]
    fn subscribers_see_every_write() {
        let mut store = InMemoryBackingStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.subscribe(Arc::new(move |key: &str, old: Option<&Value>, new: Option<&Value>| {
            assert_eq!(key, "displayName");
            if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                assert_eq!(old, Some(&Value::from("a")));
                assert_eq!(new, Some(&Value::from("b")));
            }
        }));
        store.set("displayName", Value::from("a")).unwrap();
        store.set("displayName", Value::from("b")).unwrap();
        store.unsubscribe(&id).unwrap();
        store.set("displayName", Value::from("c")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clones_are_independent() {
        let mut store = InMemoryBackingStore::new();
        store.set("displayName", Value::from("a")).unwrap();
        let mut copy = store.clone_box();
        copy.set("displayName", Value::from("b")).unwrap();
        assert_eq!(store.get("displayName").unwrap(), Some(&Value::from("a")));
        assert_eq!(copy.get("displayName").unwrap(), Some(&Value::from("b")));
    }

    #[test]
    fn clear_removes_entries() {
        let mut store = InMemoryBackingStore::new();
        store.set("displayName", Value::from("a")).unwrap();
        store.clear();
        assert!(store.enumerate().unwrap().is_empty());
    }
}
