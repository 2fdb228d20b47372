/*!
Format-independent parsing and serialization contracts.

A [ParseNode] wraps one wire value and offers typed extraction. A model
implements [Parsable] and is populated by [ParseNode::get_object_value],
which feeds every property of the wire object to
[Parsable::deserialize_field]. The reverse direction goes through a
[SerializationWriter]. Concrete formats live in [json] and [text], and are
looked up by content type through the registries in [registry].
*/

use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use tracing::trace;
use uuid::Uuid;

use crate::{
    duration::IsoDuration,
    error::Error,
    store::{AdditionalData, AdditionalDataHolder, BackedModel, Value},
};

pub mod backing_store;
pub mod json;
pub mod registry;
pub mod text;

/// Content type of the JSON format
pub static JSON_CONTENT_TYPE: &str = "application/json";
/// Content type of the text format
pub static TEXT_CONTENT_TYPE: &str = "text/plain";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Creates the model matching a parse node, usually by inspecting its
/// discriminator.
pub type ParsableFactory = fn(&dyn ParseNode) -> Result<Box<dyn Parsable>, Error>;

/// Callback invoked with a model around its deserialization or serialization
pub type ParsableHook = Arc<dyn Fn(&dyn Parsable) + Send + Sync>;

/// Reads one wire property into a model
pub type FieldDeserializer<M> = fn(&mut M, &dyn ParseNode) -> Result<(), Error>;

/// Field deserializers of a model keyed by wire name
pub type FieldDeserializers<M> = HashMap<&'static str, FieldDeserializer<M>>;

/// A model that can be read from a [ParseNode] and written to a
/// [SerializationWriter].
pub trait Parsable: Any + fmt::Debug + Send + Sync {
    /// Assigns the wire property `key`. Undeclared keys end up in the
    /// additional data.
    fn deserialize_field(&mut self, key: &str, node: &dyn ParseNode) -> Result<(), Error>;

    /// Writes all properties of the model
    fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), Error>;

    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting an owned model
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clones into a new box
    fn clone_box(&self) -> Box<dyn Parsable>;

    /// The backed-model view, if the model keeps its properties in a store
    fn as_backed_model(&self) -> Option<&dyn BackedModel> {
        None
    }
}

impl dyn Parsable {
    /// Returns true if the model is a `T`
    pub fn is<T: Parsable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the model as a `T`
    pub fn downcast_ref<T: Parsable>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Converts the model into a `T`
    pub fn downcast<T: Parsable>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast().ok()
    }
}

impl Clone for Box<dyn Parsable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A single wire value during deserialization.
pub trait ParseNode {
    /// Child of an object node, `None` if the key is missing
    fn get_child_node(&self, name: &str) -> Result<Option<Box<dyn ParseNode + '_>>, Error>;
    /// String value
    fn get_string_value(&self) -> Result<Option<String>, Error>;
    /// Boolean value
    fn get_bool_value(&self) -> Result<Option<bool>, Error>;
    /// Unsigned 8-bit value
    fn get_byte_value(&self) -> Result<Option<u8>, Error>;
    /// 32-bit integer value
    fn get_int32_value(&self) -> Result<Option<i32>, Error>;
    /// 64-bit integer value
    fn get_int64_value(&self) -> Result<Option<i64>, Error>;
    /// 32-bit float value
    fn get_float32_value(&self) -> Result<Option<f32>, Error>;
    /// 64-bit float value
    fn get_float64_value(&self) -> Result<Option<f64>, Error>;
    /// Uuid value
    fn get_uuid_value(&self) -> Result<Option<Uuid>, Error>;
    /// RFC 3339 timestamp
    fn get_time_value(&self) -> Result<Option<DateTime<FixedOffset>>, Error>;
    /// Calendar date
    fn get_date_only_value(&self) -> Result<Option<NaiveDate>, Error>;
    /// Time of day
    fn get_time_only_value(&self) -> Result<Option<NaiveTime>, Error>;
    /// ISO 8601 duration
    fn get_iso_duration_value(&self) -> Result<Option<IsoDuration>, Error>;
    /// Base64 encoded binary content
    fn get_byte_array_value(&self) -> Result<Option<Vec<u8>>, Error>;
    /// Raw wire name of an enum value
    fn get_enum_value(&self) -> Result<Option<String>, Error>;
    /// Model created by `factory` and populated from this node
    fn get_object_value(
        &self,
        factory: ParsableFactory,
    ) -> Result<Option<Box<dyn Parsable>>, Error>;
    /// Collection of models. Null members are skipped rather than kept as
    /// empty slots, the remaining members keep their order.
    fn get_collection_of_object_values(
        &self,
        factory: ParsableFactory,
    ) -> Result<Option<Vec<Box<dyn Parsable>>>, Error>;
    /// Collection of primitives of the given type name, see
    /// [get_primitive_value]
    fn get_collection_of_primitive_values(
        &self,
        type_name: &str,
    ) -> Result<Option<Vec<Value>>, Error>;
    /// Collection of raw enum names, null members are skipped
    fn get_collection_of_enum_values(&self) -> Result<Option<Vec<String>>, Error>;
    /// The value converted without a schema
    fn get_untyped_value(&self) -> Result<Value, Error>;
    /// Hook called before the fields of a model are assigned
    fn on_before_assign_field_values(&self) -> Option<&ParsableHook>;
    /// Hook called after the fields of a model are assigned
    fn on_after_assign_field_values(&self) -> Option<&ParsableHook>;
    /// Sets the hook called before the fields of a model are assigned
    fn set_on_before_assign_field_values(&mut self, hook: Option<ParsableHook>);
    /// Sets the hook called after the fields of a model are assigned
    fn set_on_after_assign_field_values(&mut self, hook: Option<ParsableHook>);
}

/// Sink for serialized models.
///
/// A `None` value writes nothing. A `None` key writes into the enclosing
/// collection or, at the top level, the root value.
pub trait SerializationWriter {
    /// Writes a string
    fn write_string_value(&mut self, key: Option<&str>, value: Option<&str>) -> Result<(), Error>;
    /// Writes a boolean
    fn write_bool_value(&mut self, key: Option<&str>, value: Option<bool>) -> Result<(), Error>;
    /// Writes an unsigned 8-bit integer
    fn write_byte_value(&mut self, key: Option<&str>, value: Option<u8>) -> Result<(), Error>;
    /// Writes a 32-bit integer
    fn write_int32_value(&mut self, key: Option<&str>, value: Option<i32>) -> Result<(), Error>;
    /// Writes a 64-bit integer
    fn write_int64_value(&mut self, key: Option<&str>, value: Option<i64>) -> Result<(), Error>;
    /// Writes a 32-bit float
    fn write_float32_value(&mut self, key: Option<&str>, value: Option<f32>)
        -> Result<(), Error>;
    /// Writes a 64-bit float
    fn write_float64_value(&mut self, key: Option<&str>, value: Option<f64>)
        -> Result<(), Error>;
    /// Writes a uuid
    fn write_uuid_value(&mut self, key: Option<&str>, value: Option<Uuid>) -> Result<(), Error>;
    /// Writes an RFC 3339 timestamp
    fn write_time_value(
        &mut self,
        key: Option<&str>,
        value: Option<DateTime<FixedOffset>>,
    ) -> Result<(), Error>;
    /// Writes a calendar date
    fn write_date_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveDate>,
    ) -> Result<(), Error>;
    /// Writes a time of day
    fn write_time_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveTime>,
    ) -> Result<(), Error>;
    /// Writes an ISO 8601 duration
    fn write_iso_duration_value(
        &mut self,
        key: Option<&str>,
        value: Option<IsoDuration>,
    ) -> Result<(), Error>;
    /// Writes binary content as base64
    fn write_byte_array_value(
        &mut self,
        key: Option<&str>,
        value: Option<&[u8]>,
    ) -> Result<(), Error>;
    /// Writes an explicit null
    fn write_null_value(&mut self, key: Option<&str>) -> Result<(), Error>;
    /// Writes a model
    fn write_object_value(
        &mut self,
        key: Option<&str>,
        value: Option<&dyn Parsable>,
    ) -> Result<(), Error>;
    /// Writes a collection of models
    fn write_collection_of_object_values(
        &mut self,
        key: Option<&str>,
        values: &[&dyn Parsable],
    ) -> Result<(), Error>;
    /// Writes a collection of primitives
    fn write_collection_of_primitive_values(
        &mut self,
        key: Option<&str>,
        values: &[Value],
    ) -> Result<(), Error>;
    /// Writes a value of any kind
    fn write_any_value(&mut self, key: Option<&str>, value: &Value) -> Result<(), Error>;
    /// Writes every entry of the additional data under its own key
    fn write_additional_data(&mut self, data: &AdditionalData) -> Result<(), Error> {
        for (key, value) in data {
            self.write_any_value(Some(key), value)?;
        }
        Ok(())
    }
    /// Writes a collection of strings
    fn write_collection_of_string_values(
        &mut self,
        key: Option<&str>,
        values: &[String],
    ) -> Result<(), Error> {
        let values: Vec<Value> = values.iter().cloned().map(Value::String).collect();
        self.write_collection_of_primitive_values(key, &values)
    }
    /// Returns the serialized content
    fn get_serialized_content(&mut self) -> Result<Vec<u8>, Error>;
    /// Sets the hook called before a model is serialized
    fn set_on_before_object_serialization(&mut self, hook: Option<ParsableHook>);
    /// Sets the hook called after a model is serialized
    fn set_on_after_object_serialization(&mut self, hook: Option<ParsableHook>);
}

/// Creates root parse nodes for one content type.
pub trait ParseNodeFactory: Send + Sync {
    /// Content type this factory handles
    fn valid_content_type(&self) -> Result<&str, Error>;
    /// Parses `content` into a root node
    fn get_root_parse_node(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Box<dyn ParseNode>, Error>;
}

/// Creates serialization writers for one content type.
pub trait SerializationWriterFactory: Send + Sync {
    /// Content type this factory handles
    fn valid_content_type(&self) -> Result<&str, Error>;
    /// Creates an empty writer
    fn get_serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, Error>;
}

/// Reads a primitive of the given type name. Type names follow the
/// collection requests of the generated models: `string`, `bool`, `uint8`
/// or `byte`, `int32`, `int64`, `float32`, `float64`, `uuid`, `time`,
/// `dateonly`, `timeonly`, `isoduration` and `base64`.
pub fn get_primitive_value(node: &dyn ParseNode, type_name: &str) -> Result<Option<Value>, Error> {
    Ok(match type_name {
        "string" => node.get_string_value()?.map(Value::String),
        "bool" => node.get_bool_value()?.map(Value::Boolean),
        "uint8" | "byte" => node.get_byte_value()?.map(Value::Byte),
        "int32" => node.get_int32_value()?.map(Value::Int),
        "int64" => node.get_int64_value()?.map(Value::Long),
        "float32" => node.get_float32_value()?.map(Value::Float),
        "float64" => node.get_float64_value()?.map(Value::Double),
        "uuid" => node.get_uuid_value()?.map(Value::Uuid),
        "time" => node.get_time_value()?.map(Value::DateTime),
        "dateonly" => node.get_date_only_value()?.map(Value::Date),
        "timeonly" => node.get_time_only_value()?.map(Value::Time),
        "isoduration" => node.get_iso_duration_value()?.map(Value::Duration),
        "base64" => node.get_byte_array_value()?.map(Value::Bytes),
        _ => {
            return Err(Error::NotSupported(format!(
                "Primitive collection of type {type_name}"
            )))
        }
    })
}

/// Stores an undeclared wire property in the additional data of a model
pub fn assign_additional_field<M: BackedModel + ?Sized>(
    model: &mut M,
    key: &str,
    node: &dyn ParseNode,
) -> Result<(), Error> {
    trace!(key, "storing undeclared property as additional data");
    let mut data = model.additional_data()?;
    data.insert(key.to_owned(), node.get_untyped_value()?);
    model.set_additional_data(data)
}

pub(crate) fn format_date_time(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn format_date(value: &NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_time(value: &NaiveTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>, Error> {
    Ok(DateTime::parse_from_rfc3339(value)?)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}

pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, Error> {
    Ok(NaiveTime::parse_from_str(value, TIME_FORMAT)?)
}

pub(crate) fn encode_bytes(value: &[u8]) -> String {
    STANDARD.encode(value)
}

pub(crate) fn decode_bytes(value: &str) -> Result<Vec<u8>, Error> {
    Ok(STANDARD.decode(value)?)
}

#[cfg(test)]
pub(crate) mod testing;
