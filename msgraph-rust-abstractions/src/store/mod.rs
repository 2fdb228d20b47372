/*!
Backing stores hold every property value of a model.

A model does not own typed fields. Its accessors narrow and widen between
its Rust types and the dynamic [Value] kept in a [BackingStore] under the
property's wire name. The store tracks which entries changed since
initialization completed, which lets a model serialize only its changes.
*/

use std::{collections::BTreeMap, fmt, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{
    duration::IsoDuration, error::Error, property::Property, serialization::Parsable,
};

mod in_memory;

pub use in_memory::InMemoryBackingStore;

/// Store key of the additional data map
pub static ADDITIONAL_DATA_KEY: &str = "additionalData";

/// Undeclared wire properties of a model
pub type AdditionalData = BTreeMap<String, Value>;

/// Called with the key, the previous and the new value after every write.
pub type BackingStoreSubscriber = Arc<dyn Fn(&str, Option<&Value>, Option<&Value>) + Send + Sync>;

/// Dynamically typed property value
#[derive(Debug, Clone)]
pub enum Value {
    /// Explicit null
    Null,
    /// true or false
    Boolean(bool),
    /// Unsigned 8-bit integer
    Byte(u8),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Untyped integer above `i64::MAX`
    UnsignedLong(u64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Utf-8 string
    String(String),
    /// Universally unique identifier
    Uuid(Uuid),
    /// Timestamp with offset
    DateTime(DateTime<FixedOffset>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// ISO 8601 duration
    Duration(IsoDuration),
    /// Binary content
    Bytes(Vec<u8>),
    /// Wire name of an enum member or a comma-separated flags value
    Enum(String),
    /// Nested model
    Object(Box<dyn Parsable>),
    /// Ordered collection
    Collection(Vec<Value>),
    /// Untyped object
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for [Value::Null]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the nested model of an [Value::Object]
    pub fn as_object(&self) -> Option<&dyn Parsable> {
        match self {
            Value::Object(model) => Some(model.as_ref()),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::UnsignedLong(_) => "unsigned long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Duration(_) => "duration",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
            Value::Collection(_) => "collection",
            Value::Map(_) => "map",
        }
    }
}

/// Nested models never compare equal, compare them through their accessors.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::UnsignedLong(a), Value::UnsignedLong(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

/// Key/value storage behind a model's accessors.
///
/// The initialization and change-tracking flags take `&self` so that
/// serialization hooks, which only see `&dyn Parsable`, can toggle them.
pub trait BackingStore: fmt::Debug + Send + Sync {
    /// Value stored under `key`. With [BackingStore::return_only_changed_values]
    /// set, unchanged entries read as absent.
    fn get(&self, key: &str) -> Result<Option<&Value>, Error>;
    /// Stores `value` under `key` and notifies subscribers.
    fn set(&mut self, key: &str, value: Value) -> Result<(), Error>;
    /// All entries, or only the changed ones with
    /// [BackingStore::return_only_changed_values] set.
    fn enumerate(&self) -> Result<Vec<(&str, &Value)>, Error>;
    /// Keys whose value was changed to [Value::Null]
    fn enumerate_keys_for_values_changed_to_null(&self) -> Result<Vec<&str>, Error>;
    /// Registers a subscriber and returns its generated id
    fn subscribe(&mut self, subscriber: BackingStoreSubscriber) -> String;
    /// Registers or replaces the subscriber with the given id
    fn subscribe_with_id(&mut self, id: &str, subscriber: BackingStoreSubscriber);
    /// Removes a subscriber
    fn unsubscribe(&mut self, id: &str) -> Result<(), Error>;
    /// Removes every entry
    fn clear(&mut self);
    /// Whether writes are currently tracked as changes
    fn initialization_completed(&self) -> bool;
    /// Completing initialization marks every entry unchanged, resetting it
    /// marks every entry changed. Propagates to nested models.
    fn set_initialization_completed(&self, completed: bool);
    /// Whether reads hide unchanged entries
    fn return_only_changed_values(&self) -> bool;
    /// Sets whether reads hide unchanged entries. Propagates to nested models.
    fn set_return_only_changed_values(&self, value: bool);
    /// Whether any entry, or any nested model, changed
    fn has_changed_values(&self) -> bool;
    /// Clones into a new box
    fn clone_box(&self) -> Box<dyn BackingStore>;
}

impl Clone for Box<dyn BackingStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Typed access on top of [BackingStore].
pub trait BackingStoreExt: BackingStore {
    /// Reads and narrows the value under `key`. Null and missing entries
    /// are `None`; a value of another type is an [Error::Type].
    fn get_value<T: Property>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get(key)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| Error::Type(key.to_owned(), T::TYPE_NAME.to_owned())),
        }
    }

    /// Widens and writes `value` under `key`, `None` stores null.
    fn set_value<T: Property>(&mut self, key: &str, value: Option<T>) -> Result<(), Error> {
        self.set(key, value.map_or(Value::Null, Property::into_value))
    }
}

impl<S: BackingStore + ?Sized> BackingStoreExt for S {}

/// A model whose properties live in a [BackingStore].
pub trait BackedModel {
    /// The model's store
    fn backing_store(&self) -> &dyn BackingStore;
    /// The model's store, mutably
    fn backing_store_mut(&mut self) -> &mut dyn BackingStore;
}

/// Access to the undeclared wire properties of a model.
pub trait AdditionalDataHolder {
    /// Undeclared properties, empty if none were set
    fn additional_data(&self) -> Result<AdditionalData, Error>;
    /// Replaces the undeclared properties
    fn set_additional_data(&mut self, value: AdditionalData) -> Result<(), Error>;
}

impl<M: BackedModel + ?Sized> AdditionalDataHolder for M {
    fn additional_data(&self) -> Result<AdditionalData, Error> {
        match self.backing_store().get(ADDITIONAL_DATA_KEY)? {
            None | Some(Value::Null) => Ok(AdditionalData::new()),
            Some(Value::Map(data)) => Ok(data.clone()),
            Some(other) => Err(Error::Type(other.kind().to_owned(), "map".to_owned())),
        }
    }

    fn set_additional_data(&mut self, value: AdditionalData) -> Result<(), Error> {
        self.backing_store_mut()
            .set(ADDITIONAL_DATA_KEY, Value::Map(value))
    }
}
