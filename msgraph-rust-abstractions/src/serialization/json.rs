/*!
JSON parse node and serialization writer over `serde_json`.
*/

use std::{borrow::Cow, collections::BTreeMap};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde_json::{Map, Number, Value as JsonValue};
use uuid::Uuid;

use crate::{
    duration::IsoDuration,
    error::Error,
    store::{Value, ADDITIONAL_DATA_KEY},
};

use super::{
    decode_bytes, encode_bytes, format_date, format_date_time, format_time, get_primitive_value,
    parse_date, parse_date_time, parse_time, Parsable, ParsableFactory, ParsableHook, ParseNode,
    ParseNodeFactory, SerializationWriter, SerializationWriterFactory, JSON_CONTENT_TYPE,
};

/// [ParseNode] over a JSON value
#[derive(Clone)]
pub struct JsonParseNode<'a> {
    value: Cow<'a, JsonValue>,
    on_before: Option<ParsableHook>,
    on_after: Option<ParsableHook>,
}

impl JsonParseNode<'static> {
    /// Creates a root node owning `value`
    pub fn new(value: JsonValue) -> Self {
        JsonParseNode {
            value: Cow::Owned(value),
            on_before: None,
            on_after: None,
        }
    }

    /// Parses JSON text into a root node
    pub fn from_slice(content: &[u8]) -> Result<Self, Error> {
        Ok(JsonParseNode::new(serde_json::from_slice(content)?))
    }
}

impl<'a> JsonParseNode<'a> {
    /// The wrapped JSON value
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    fn child<'b>(&self, value: &'b JsonValue) -> JsonParseNode<'b> {
        JsonParseNode {
            value: Cow::Borrowed(value),
            on_before: self.on_before.clone(),
            on_after: self.on_after.clone(),
        }
    }

    fn typed<T>(
        &self,
        type_name: &str,
        extract: impl FnOnce(&JsonValue) -> Option<T>,
    ) -> Result<Option<T>, Error> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            value => extract(value)
                .map(Some)
                .ok_or_else(|| Error::Type(value.to_string(), type_name.to_owned())),
        }
    }

    fn parsed<T>(&self, parse: impl FnOnce(&str) -> Result<T, Error>) -> Result<Option<T>, Error> {
        self.get_string_value()?
            .map(|value| parse(&value))
            .transpose()
    }

    fn items(&self) -> Result<Option<&[JsonValue]>, Error> {
        match self.value.as_ref() {
            JsonValue::Null => Ok(None),
            JsonValue::Array(items) => Ok(Some(items)),
            value => Err(Error::Type(value.to_string(), "array".to_owned())),
        }
    }
}

fn untyped(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(value) => Value::Boolean(*value),
        JsonValue::Number(number) => match (number.as_i64(), number.as_u64()) {
            (Some(value), _) => Value::Long(value),
            (None, Some(value)) => Value::UnsignedLong(value),
            (None, None) => Value::Double(number.as_f64().unwrap_or_default()),
        },
        JsonValue::String(value) => Value::String(value.clone()),
        JsonValue::Array(items) => Value::Collection(items.iter().map(untyped).collect()),
        JsonValue::Object(properties) => Value::Map(
            properties
                .iter()
                .map(|(key, value)| (key.clone(), untyped(value)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

impl<'a> ParseNode for JsonParseNode<'a> {
    fn get_child_node(&self, name: &str) -> Result<Option<Box<dyn ParseNode + '_>>, Error> {
        Ok(self
            .value
            .as_object()
            .and_then(|properties| properties.get(name))
            .map(|value| Box::new(self.child(value)) as Box<dyn ParseNode + '_>))
    }

    fn get_string_value(&self) -> Result<Option<String>, Error> {
        self.typed("string", |value| value.as_str().map(ToOwned::to_owned))
    }

    fn get_bool_value(&self) -> Result<Option<bool>, Error> {
        self.typed("bool", JsonValue::as_bool)
    }

    fn get_byte_value(&self) -> Result<Option<u8>, Error> {
        Ok(self
            .get_int64_value()?
            .map(u8::try_from)
            .transpose()?)
    }

    fn get_int32_value(&self) -> Result<Option<i32>, Error> {
        Ok(self
            .get_int64_value()?
            .map(i32::try_from)
            .transpose()?)
    }

    fn get_int64_value(&self) -> Result<Option<i64>, Error> {
        self.typed("int64", JsonValue::as_i64)
    }

    fn get_float32_value(&self) -> Result<Option<f32>, Error> {
        self.typed("float32", |value| value.as_f64().map(|value| value as f32))
    }

    fn get_float64_value(&self) -> Result<Option<f64>, Error> {
        self.typed("float64", JsonValue::as_f64)
    }

    fn get_uuid_value(&self) -> Result<Option<Uuid>, Error> {
        self.parsed(|value| Ok(Uuid::parse_str(value)?))
    }

    fn get_time_value(&self) -> Result<Option<DateTime<FixedOffset>>, Error> {
        self.parsed(parse_date_time)
    }

    fn get_date_only_value(&self) -> Result<Option<NaiveDate>, Error> {
        self.parsed(parse_date)
    }

    fn get_time_only_value(&self) -> Result<Option<NaiveTime>, Error> {
        self.parsed(parse_time)
    }

    fn get_iso_duration_value(&self) -> Result<Option<IsoDuration>, Error> {
        self.parsed(str::parse)
    }

    fn get_byte_array_value(&self) -> Result<Option<Vec<u8>>, Error> {
        self.parsed(decode_bytes)
    }

    fn get_enum_value(&self) -> Result<Option<String>, Error> {
        self.get_string_value()
    }

    fn get_object_value(
        &self,
        factory: ParsableFactory,
    ) -> Result<Option<Box<dyn Parsable>>, Error> {
        let properties = match self.value.as_ref() {
            JsonValue::Null => return Ok(None),
            JsonValue::Object(properties) => properties,
            value => return Err(Error::Type(value.to_string(), "object".to_owned())),
        };
        let mut model = factory(self)?;
        if let Some(hook) = &self.on_before {
            hook(model.as_ref());
        }
        for (key, value) in properties {
            model.deserialize_field(key, &self.child(value))?;
        }
        if let Some(hook) = &self.on_after {
            hook(model.as_ref());
        }
        Ok(Some(model))
    }

    fn get_collection_of_object_values(
        &self,
        factory: ParsableFactory,
    ) -> Result<Option<Vec<Box<dyn Parsable>>>, Error> {
        self.items()?
            .map(|items| {
                items
                    .iter()
                    .map(|item| self.child(item).get_object_value(factory))
                    .filter_map(Result::transpose)
                    .collect()
            })
            .transpose()
    }

    fn get_collection_of_primitive_values(
        &self,
        type_name: &str,
    ) -> Result<Option<Vec<Value>>, Error> {
        self.items()?
            .map(|items| {
                items
                    .iter()
                    .map(|item| get_primitive_value(&self.child(item), type_name))
                    .filter_map(Result::transpose)
                    .collect()
            })
            .transpose()
    }

    fn get_collection_of_enum_values(&self) -> Result<Option<Vec<String>>, Error> {
        self.items()?
            .map(|items| {
                items
                    .iter()
                    .map(|item| self.child(item).get_enum_value())
                    .filter_map(Result::transpose)
                    .collect()
            })
            .transpose()
    }

    fn get_untyped_value(&self) -> Result<Value, Error> {
        Ok(untyped(&self.value))
    }

    fn on_before_assign_field_values(&self) -> Option<&ParsableHook> {
        self.on_before.as_ref()
    }

    fn on_after_assign_field_values(&self) -> Option<&ParsableHook> {
        self.on_after.as_ref()
    }

    fn set_on_before_assign_field_values(&mut self, hook: Option<ParsableHook>) {
        self.on_before = hook;
    }

    fn set_on_after_assign_field_values(&mut self, hook: Option<ParsableHook>) {
        self.on_after = hook;
    }
}

#[derive(Debug)]
enum Frame {
    Object(Map<String, JsonValue>),
    Array(Vec<JsonValue>),
}

/// [SerializationWriter] building a JSON document
#[derive(Default)]
pub struct JsonSerializationWriter {
    frames: Vec<Frame>,
    roots: Vec<JsonValue>,
    on_before: Option<ParsableHook>,
    on_after: Option<ParsableHook>,
}

impl JsonSerializationWriter {
    /// Creates an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    fn write_json(&mut self, key: Option<&str>, value: JsonValue) -> Result<(), Error> {
        match (self.frames.last_mut(), key) {
            (Some(Frame::Object(properties)), Some(key)) => {
                properties.insert(key.to_owned(), value);
            }
            (Some(Frame::Array(items)), None) => items.push(value),
            (None, None) => self.roots.push(value),
            (Some(Frame::Object(_)), None) => {
                return Err(Error::InvalidFormat(format!(
                    "Value {value} without a key inside an object"
                )))
            }
            (_, Some(key)) => {
                return Err(Error::InvalidFormat(format!(
                    "Key {key} outside of an object"
                )))
            }
        }
        Ok(())
    }

    fn pop_object(&mut self) -> Result<Map<String, JsonValue>, Error> {
        match self.frames.pop() {
            Some(Frame::Object(properties)) => Ok(properties),
            _ => Err(Error::InvalidFormat("Object frame".to_owned())),
        }
    }

    fn pop_array(&mut self) -> Result<Vec<JsonValue>, Error> {
        match self.frames.pop() {
            Some(Frame::Array(items)) => Ok(items),
            _ => Err(Error::InvalidFormat("Array frame".to_owned())),
        }
    }

    fn write_array(&mut self, key: Option<&str>, values: &[Value]) -> Result<(), Error> {
        self.frames.push(Frame::Array(Vec::new()));
        let written = values
            .iter()
            .try_for_each(|value| self.write_any_value(None, value));
        let items = self.pop_array()?;
        written?;
        self.write_json(key, JsonValue::Array(items))
    }

    fn write_map(&mut self, key: Option<&str>, entries: &BTreeMap<String, Value>) -> Result<(), Error> {
        self.frames.push(Frame::Object(Map::new()));
        let written = entries
            .iter()
            .try_for_each(|(name, value)| self.write_any_value(Some(name), value));
        let properties = self.pop_object()?;
        written?;
        self.write_json(key, JsonValue::Object(properties))
    }

    fn write_float(&mut self, key: Option<&str>, value: f64) -> Result<(), Error> {
        let number =
            Number::from_f64(value).ok_or_else(|| Error::InvalidFormat(value.to_string()))?;
        self.write_json(key, JsonValue::Number(number))
    }
}

impl SerializationWriter for JsonSerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: Option<&str>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(value.to_owned())),
            None => Ok(()),
        }
    }

    fn write_bool_value(&mut self, key: Option<&str>, value: Option<bool>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::Bool(value)),
            None => Ok(()),
        }
    }

    fn write_byte_value(&mut self, key: Option<&str>, value: Option<u8>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::from(value)),
            None => Ok(()),
        }
    }

    fn write_int32_value(&mut self, key: Option<&str>, value: Option<i32>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::from(value)),
            None => Ok(()),
        }
    }

    fn write_int64_value(&mut self, key: Option<&str>, value: Option<i64>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::from(value)),
            None => Ok(()),
        }
    }

    fn write_float32_value(
        &mut self,
        key: Option<&str>,
        value: Option<f32>,
    ) -> Result<(), Error> {
        match value {
            // shortest f32 text, widening the bits adds digits
            Some(value) => self.write_float(key, value.to_string().parse()?),
            None => Ok(()),
        }
    }

    fn write_float64_value(
        &mut self,
        key: Option<&str>,
        value: Option<f64>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_float(key, value),
            None => Ok(()),
        }
    }

    fn write_uuid_value(&mut self, key: Option<&str>, value: Option<Uuid>) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(value.to_string())),
            None => Ok(()),
        }
    }

    fn write_time_value(
        &mut self,
        key: Option<&str>,
        value: Option<DateTime<FixedOffset>>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(format_date_time(&value))),
            None => Ok(()),
        }
    }

    fn write_date_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveDate>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(format_date(&value))),
            None => Ok(()),
        }
    }

    fn write_time_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveTime>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(format_time(&value))),
            None => Ok(()),
        }
    }

    fn write_iso_duration_value(
        &mut self,
        key: Option<&str>,
        value: Option<IsoDuration>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(value.to_string())),
            None => Ok(()),
        }
    }

    fn write_byte_array_value(
        &mut self,
        key: Option<&str>,
        value: Option<&[u8]>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_json(key, JsonValue::String(encode_bytes(value))),
            None => Ok(()),
        }
    }

    fn write_null_value(&mut self, key: Option<&str>) -> Result<(), Error> {
        self.write_json(key, JsonValue::Null)
    }

    fn write_object_value(
        &mut self,
        key: Option<&str>,
        value: Option<&dyn Parsable>,
    ) -> Result<(), Error> {
        let Some(model) = value else {
            return Ok(());
        };
        if let Some(hook) = &self.on_before {
            hook(model);
        }
        self.frames.push(Frame::Object(Map::new()));
        let serialized = model.serialize(self);
        let mut properties = self.pop_object()?;
        serialized?;
        if let Some(backed) = model.as_backed_model() {
            let store = backed.backing_store();
            if store.return_only_changed_values() {
                for name in store.enumerate_keys_for_values_changed_to_null()? {
                    if name != ADDITIONAL_DATA_KEY {
                        properties.entry(name).or_insert(JsonValue::Null);
                    }
                }
            }
        }
        if let Some(hook) = &self.on_after {
            hook(model);
        }
        self.write_json(key, JsonValue::Object(properties))
    }

    fn write_collection_of_object_values(
        &mut self,
        key: Option<&str>,
        values: &[&dyn Parsable],
    ) -> Result<(), Error> {
        self.frames.push(Frame::Array(Vec::new()));
        let written = values
            .iter()
            .try_for_each(|model| self.write_object_value(None, Some(*model)));
        let items = self.pop_array()?;
        written?;
        self.write_json(key, JsonValue::Array(items))
    }

    fn write_collection_of_primitive_values(
        &mut self,
        key: Option<&str>,
        values: &[Value],
    ) -> Result<(), Error> {
        self.write_array(key, values)
    }

    fn write_any_value(&mut self, key: Option<&str>, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => self.write_null_value(key),
            Value::Boolean(value) => self.write_bool_value(key, Some(*value)),
            Value::Byte(value) => self.write_byte_value(key, Some(*value)),
            Value::Int(value) => self.write_int32_value(key, Some(*value)),
            Value::Long(value) => self.write_int64_value(key, Some(*value)),
            Value::UnsignedLong(value) => self.write_json(key, JsonValue::from(*value)),
            Value::Float(value) => self.write_float32_value(key, Some(*value)),
            Value::Double(value) => self.write_float64_value(key, Some(*value)),
            Value::String(value) | Value::Enum(value) => self.write_string_value(key, Some(value)),
            Value::Uuid(value) => self.write_uuid_value(key, Some(*value)),
            Value::DateTime(value) => self.write_time_value(key, Some(*value)),
            Value::Date(value) => self.write_date_only_value(key, Some(*value)),
            Value::Time(value) => self.write_time_only_value(key, Some(*value)),
            Value::Duration(value) => self.write_iso_duration_value(key, Some(*value)),
            Value::Bytes(value) => self.write_byte_array_value(key, Some(value)),
            Value::Object(model) => self.write_object_value(key, Some(model.as_ref())),
            Value::Collection(items) => self.write_array(key, items),
            Value::Map(entries) => self.write_map(key, entries),
        }
    }

    fn get_serialized_content(&mut self) -> Result<Vec<u8>, Error> {
        if !self.frames.is_empty() {
            return Err(Error::InvalidFormat("Unterminated object or array".to_owned()));
        }
        let mut roots = std::mem::take(&mut self.roots);
        match roots.len() {
            0 => Ok(Vec::new()),
            1 => Ok(serde_json::to_vec(&roots.remove(0))?),
            n => Err(Error::InvalidFormat(format!("Document with {n} root values"))),
        }
    }

    fn set_on_before_object_serialization(&mut self, hook: Option<ParsableHook>) {
        self.on_before = hook;
    }

    fn set_on_after_object_serialization(&mut self, hook: Option<ParsableHook>) {
        self.on_after = hook;
    }
}

/// Creates [JsonParseNode]s
#[derive(Debug, Clone, Default)]
pub struct JsonParseNodeFactory;

impl ParseNodeFactory for JsonParseNodeFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Ok(JSON_CONTENT_TYPE)
    }

    fn get_root_parse_node(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Box<dyn ParseNode>, Error> {
        if content_type.trim().is_empty() {
            return Err(Error::InvalidFormat("Empty content type".to_owned()));
        }
        if content.is_empty() {
            return Err(Error::InvalidFormat("Empty content".to_owned()));
        }
        Ok(Box::new(JsonParseNode::from_slice(content)?))
    }
}

/// Creates [JsonSerializationWriter]s
#[derive(Debug, Clone, Default)]
pub struct JsonSerializationWriterFactory;

impl SerializationWriterFactory for JsonSerializationWriterFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Ok(JSON_CONTENT_TYPE)
    }

    fn get_serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, Error> {
        if content_type.trim().is_empty() {
            return Err(Error::InvalidFormat("Empty content type".to_owned()));
        }
        Ok(Box::new(JsonSerializationWriter::new()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        property::Property,
        serialization::testing::Person,
        store::{AdditionalDataHolder, BackedModel},
    };

    fn parse(value: JsonValue) -> Person {
        let node = JsonParseNode::new(value);
        Person::read(&node).unwrap().unwrap()
    }

    fn write(person: &Person) -> JsonValue {
        let mut writer = JsonSerializationWriter::new();
        writer.write_object_value(None, Some(person)).unwrap();
        serde_json::from_slice(&writer.get_serialized_content().unwrap()).unwrap()
    }

    #[test]
    fn scalars() {
        let node = JsonParseNode::new(json!({
            "name": "Contoso",
            "count": 42,
            "ratio": 0.5,
            "enabled": true,
            "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
            "created": "2024-01-01T00:00:00Z",
            "day": "2024-02-29",
            "at": "08:30:00",
            "timeout": "PT1H30M",
            "data": "aGVsbG8=",
            "missing": null
        }));
        let child = |name: &str| node.get_child_node(name).unwrap().unwrap();
        assert_eq!(child("name").get_string_value().unwrap().as_deref(), Some("Contoso"));
        assert_eq!(child("count").get_int32_value().unwrap(), Some(42));
        assert_eq!(child("count").get_byte_value().unwrap(), Some(42));
        assert_eq!(child("ratio").get_float64_value().unwrap(), Some(0.5));
        assert_eq!(child("enabled").get_bool_value().unwrap(), Some(true));
        assert_eq!(
            child("id").get_uuid_value().unwrap().map(|id| id.to_string()).as_deref(),
            Some("6f9619ff-8b86-d011-b42d-00cf4fc964ff")
        );
        assert_eq!(
            child("created").get_time_value().unwrap(),
            Some(DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap())
        );
        assert_eq!(
            child("day").get_date_only_value().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            child("at").get_time_only_value().unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(
            child("timeout").get_iso_duration_value().unwrap().map(|d| d.to_string()).as_deref(),
            Some("PT1H30M")
        );
        assert_eq!(child("data").get_byte_array_value().unwrap(), Some(b"hello".to_vec()));
        assert_eq!(child("missing").get_string_value().unwrap(), None);
        assert!(node.get_child_node("absent").unwrap().is_none());
    }

    #[test]
    fn wrong_types_are_errors() {
        let node = JsonParseNode::new(json!({"count": "42", "big": 4294967296i64, "day": "yesterday"}));
        let child = |name: &str| node.get_child_node(name).unwrap().unwrap();
        assert!(matches!(child("count").get_int32_value(), Err(Error::Type(_, _))));
        assert!(matches!(child("big").get_int32_value(), Err(Error::TryFromInt(_))));
        assert!(matches!(child("day").get_date_only_value(), Err(Error::Chrono(_))));
        assert!(matches!(
            node.get_collection_of_enum_values(),
            Err(Error::Type(_, _))
        ));
    }

    #[test]
    fn object_round_trip() {
        let input = json!({
            "displayName": "Megan",
            "age": 31,
            "manager": {"displayName": "Adele"},
            "tags": ["a", "b"],
            "office": {"floor": 3, "wing": "north"}
        });
        let person = parse(input.clone());
        assert_eq!(person.display_name().unwrap().as_deref(), Some("Megan"));
        assert_eq!(person.age().unwrap(), Some(31));
        assert_eq!(
            person.manager().unwrap().unwrap().display_name().unwrap().as_deref(),
            Some("Adele")
        );
        assert_eq!(
            person.tags().unwrap(),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        let office = person.additional_data().unwrap().remove("office").unwrap();
        assert!(matches!(office, Value::Map(ref map) if map.get("floor") == Some(&Value::Long(3))));
        assert_eq!(write(&person), input);
    }

    #[test]
    fn collections_skip_nulls() {
        let node = JsonParseNode::new(json!([{"displayName": "a"}, null, {"displayName": "b"}]));
        let people = Person::read_collection(&node).unwrap().unwrap();
        let names: Vec<_> = people
            .iter()
            .map(|person| person.display_name().unwrap())
            .collect();
        assert_eq!(names, vec![Some("a".to_owned()), Some("b".to_owned())]);

        let node = JsonParseNode::new(json!(["a", null, "b"]));
        assert_eq!(
            String::read_collection(&node).unwrap(),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn hooks_run_around_assignment() {
        let mut node = JsonParseNode::new(json!({"displayName": "Megan"}));
        node.set_on_before_assign_field_values(Some(std::sync::Arc::new(|model: &dyn Parsable| {
            let person = model.as_any().downcast_ref::<Person>().unwrap();
            assert_eq!(person.display_name().unwrap(), None);
        })));
        node.set_on_after_assign_field_values(Some(std::sync::Arc::new(|model: &dyn Parsable| {
            let person = model.as_any().downcast_ref::<Person>().unwrap();
            assert_eq!(person.display_name().unwrap().as_deref(), Some("Megan"));
        })));
        let person = Person::read(&node).unwrap().unwrap();
        assert!(person.backing_store().has_changed_values());
    }

    #[test]
    fn writer_formats() {
        let mut writer = JsonSerializationWriter::new();
        let mut data = BTreeMap::new();
        data.insert(
            "created".to_owned(),
            Value::DateTime(DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap()),
        );
        data.insert("flags".to_owned(), Value::Enum("a,b".to_owned()));
        data.insert("data".to_owned(), Value::Bytes(b"hello".to_vec()));
        data.insert("items".to_owned(), Value::Collection(vec![Value::Int(1), Value::Null]));
        writer.write_any_value(None, &Value::Map(data)).unwrap();
        let output: JsonValue =
            serde_json::from_slice(&writer.get_serialized_content().unwrap()).unwrap();
        assert_eq!(
            output,
            json!({
                "created": "2024-01-01T00:00:00Z",
                "flags": "a,b",
                "data": "aGVsbG8=",
                "items": [1, null]
            })
        );
    }

    #[test]
    fn float32_is_written_in_shortest_form() {
        let mut writer = JsonSerializationWriter::new();
        writer.write_float32_value(None, Some(0.1)).unwrap();
        assert_eq!(writer.get_serialized_content().unwrap(), b"0.1");

        writer.write_float32_value(None, Some(16_777_216.0)).unwrap();
        assert_eq!(writer.get_serialized_content().unwrap(), b"16777216.0");

        assert!(writer.write_float32_value(None, Some(f32::NAN)).is_err());
        assert!(writer.write_float32_value(None, Some(f32::INFINITY)).is_err());
    }

    #[test]
    fn large_integers_stay_exact() {
        let input = json!({"big": u64::MAX, "small": -1, "ratio": 1.5});
        let person = parse(input.clone());
        let data = person.additional_data().unwrap();
        assert_eq!(data.get("big"), Some(&Value::UnsignedLong(u64::MAX)));
        assert_eq!(data.get("small"), Some(&Value::Long(-1)));
        assert_eq!(data.get("ratio"), Some(&Value::Double(1.5)));
        assert_eq!(write(&person), input);
    }

    #[test]
    fn failed_model_leaves_writer_usable() {
        let mut broken = Person::new();
        let mut data = BTreeMap::new();
        data.insert("ratio".to_owned(), Value::Double(f64::NAN));
        broken.set_additional_data(data).unwrap();
        let mut adele = Person::new();
        adele.set_display_name(Some("Adele".to_owned())).unwrap();

        let mut writer = JsonSerializationWriter::new();
        assert!(writer.write_object_value(None, Some(&broken)).is_err());
        assert!(writer
            .write_collection_of_object_values(None, &[&adele, &broken])
            .is_err());
        assert!(writer
            .write_any_value(None, &Value::Collection(vec![Value::Double(f64::NAN)]))
            .is_err());
        writer.write_object_value(None, Some(&adele)).unwrap();
        let output: JsonValue =
            serde_json::from_slice(&writer.get_serialized_content().unwrap()).unwrap();
        assert_eq!(output, json!({"displayName": "Adele"}));
    }

    #[test]
    fn writer_rejects_malformed_documents() {
        let mut writer = JsonSerializationWriter::new();
        assert!(writer.write_string_value(Some("name"), Some("a")).is_err());
        assert!(writer.write_float64_value(None, Some(f64::NAN)).is_err());
        writer.write_bool_value(None, Some(true)).unwrap();
        writer.write_bool_value(None, Some(false)).unwrap();
        assert!(writer.get_serialized_content().is_err());
        assert!(writer.get_serialized_content().unwrap().is_empty());
    }

    #[test]
    fn factory_rejects_empty_content() {
        assert!(JsonParseNodeFactory
            .get_root_parse_node(JSON_CONTENT_TYPE, b"")
            .is_err());
        assert!(JsonParseNodeFactory
            .get_root_parse_node(JSON_CONTENT_TYPE, b"{\"a\":1}")
            .is_ok());
    }
}
