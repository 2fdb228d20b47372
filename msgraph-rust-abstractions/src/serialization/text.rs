/*!
Plain text format. A text document holds exactly one primitive value, so
objects, collections and keyed writes are not supported.
*/

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{duration::IsoDuration, error::Error, store::Value};

use super::{
    decode_bytes, encode_bytes, format_date, format_date_time, format_time, parse_date,
    parse_date_time, parse_time, Parsable, ParsableFactory, ParsableHook, ParseNode,
    ParseNodeFactory, SerializationWriter, SerializationWriterFactory, TEXT_CONTENT_TYPE,
};

fn not_supported<T>(operation: &str) -> Result<T, Error> {
    Err(Error::NotSupported(format!("{operation} in text content")))
}

/// [ParseNode] over a single text value
#[derive(Clone, Default)]
pub struct TextParseNode {
    text: String,
    on_before: Option<ParsableHook>,
    on_after: Option<ParsableHook>,
}

impl TextParseNode {
    /// Creates a node, one pair of surrounding double quotes is removed
    pub fn new(text: &str) -> Self {
        let text = text
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(text);
        TextParseNode {
            text: text.to_owned(),
            on_before: None,
            on_after: None,
        }
    }

    fn parsed<T>(&self, parse: impl FnOnce(&str) -> Result<T, Error>) -> Result<Option<T>, Error> {
        if self.text.is_empty() {
            Ok(None)
        } else {
            parse(&self.text).map(Some)
        }
    }
}

impl ParseNode for TextParseNode {
    fn get_child_node(&self, _name: &str) -> Result<Option<Box<dyn ParseNode + '_>>, Error> {
        not_supported("Child nodes")
    }

    fn get_string_value(&self) -> Result<Option<String>, Error> {
        self.parsed(|text| Ok(text.to_owned()))
    }

    fn get_bool_value(&self) -> Result<Option<bool>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_byte_value(&self) -> Result<Option<u8>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_int32_value(&self) -> Result<Option<i32>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_int64_value(&self) -> Result<Option<i64>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_float32_value(&self) -> Result<Option<f32>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_float64_value(&self) -> Result<Option<f64>, Error> {
        self.parsed(|text| Ok(text.parse()?))
    }

    fn get_uuid_value(&self) -> Result<Option<Uuid>, Error> {
        self.parsed(|text| Ok(Uuid::parse_str(text)?))
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
        _factory: ParsableFactory,
    ) -> Result<Option<Box<dyn Parsable>>, Error> {
        not_supported("Objects")
    }

    fn get_collection_of_object_values(
        &self,
        _factory: ParsableFactory,
    ) -> Result<Option<Vec<Box<dyn Parsable>>>, Error> {
        not_supported("Collections")
    }

    fn get_collection_of_primitive_values(
        &self,
        _type_name: &str,
    ) -> Result<Option<Vec<Value>>, Error> {
        not_supported("Collections")
    }

    fn get_collection_of_enum_values(&self) -> Result<Option<Vec<String>>, Error> {
        not_supported("Collections")
    }

    fn get_untyped_value(&self) -> Result<Value, Error> {
        Ok(self
            .get_string_value()?
            .map_or(Value::Null, Value::String))
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

/// [SerializationWriter] producing a single text value
#[derive(Default)]
pub struct TextSerializationWriter {
    text: Option<String>,
}

impl TextSerializationWriter {
    /// Creates an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    fn write_text(&mut self, key: Option<&str>, text: Option<String>) -> Result<(), Error> {
        if key.is_some_and(|key| !key.is_empty()) {
            return not_supported("Keyed values");
        }
        let Some(text) = text else {
            return Ok(());
        };
        if self.text.is_some() {
            return Err(Error::InvalidFormat(
                "Text content with more than one value".to_owned(),
            ));
        }
        self.text = Some(text);
        Ok(())
    }
}

impl SerializationWriter for TextSerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: Option<&str>) -> Result<(), Error> {
        self.write_text(key, value.map(ToOwned::to_owned))
    }

    fn write_bool_value(&mut self, key: Option<&str>, value: Option<bool>) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_byte_value(&mut self, key: Option<&str>, value: Option<u8>) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_int32_value(&mut self, key: Option<&str>, value: Option<i32>) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_int64_value(&mut self, key: Option<&str>, value: Option<i64>) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_float32_value(
        &mut self,
        key: Option<&str>,
        value: Option<f32>,
    ) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_float64_value(
        &mut self,
        key: Option<&str>,
        value: Option<f64>,
    ) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_uuid_value(&mut self, key: Option<&str>, value: Option<Uuid>) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_time_value(
        &mut self,
        key: Option<&str>,
        value: Option<DateTime<FixedOffset>>,
    ) -> Result<(), Error> {
        self.write_text(key, value.as_ref().map(format_date_time))
    }

    fn write_date_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveDate>,
    ) -> Result<(), Error> {
        self.write_text(key, value.as_ref().map(format_date))
    }

    fn write_time_only_value(
        &mut self,
        key: Option<&str>,
        value: Option<NaiveTime>,
    ) -> Result<(), Error> {
        self.write_text(key, value.as_ref().map(format_time))
    }

    fn write_iso_duration_value(
        &mut self,
        key: Option<&str>,
        value: Option<IsoDuration>,
    ) -> Result<(), Error> {
        self.write_text(key, value.map(|value| value.to_string()))
    }

    fn write_byte_array_value(
        &mut self,
        key: Option<&str>,
        value: Option<&[u8]>,
    ) -> Result<(), Error> {
        self.write_text(key, value.map(encode_bytes))
    }

    fn write_null_value(&mut self, key: Option<&str>) -> Result<(), Error> {
        self.write_text(key, Some("null".to_owned()))
    }

    fn write_object_value(
        &mut self,
        _key: Option<&str>,
        _value: Option<&dyn Parsable>,
    ) -> Result<(), Error> {
        not_supported("Objects")
    }

    fn write_collection_of_object_values(
        &mut self,
        _key: Option<&str>,
        _values: &[&dyn Parsable],
    ) -> Result<(), Error> {
        not_supported("Collections")
    }

    fn write_collection_of_primitive_values(
        &mut self,
        _key: Option<&str>,
        _values: &[Value],
    ) -> Result<(), Error> {
        not_supported("Collections")
    }

    fn write_any_value(&mut self, key: Option<&str>, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => self.write_null_value(key),
            Value::Boolean(value) => self.write_bool_value(key, Some(*value)),
            Value::Byte(value) => self.write_byte_value(key, Some(*value)),
            Value::Int(value) => self.write_int32_value(key, Some(*value)),
            Value::Long(value) => self.write_int64_value(key, Some(*value)),
            Value::UnsignedLong(value) => self.write_text(key, Some(value.to_string())),
            Value::Float(value) => self.write_float32_value(key, Some(*value)),
            Value::Double(value) => self.write_float64_value(key, Some(*value)),
            Value::String(value) | Value::Enum(value) => self.write_string_value(key, Some(value)),
            Value::Uuid(value) => self.write_uuid_value(key, Some(*value)),
            Value::DateTime(value) => self.write_time_value(key, Some(*value)),
            Value::Date(value) => self.write_date_only_value(key, Some(*value)),
            Value::Time(value) => self.write_time_only_value(key, Some(*value)),
            Value::Duration(value) => self.write_iso_duration_value(key, Some(*value)),
            Value::Bytes(value) => self.write_byte_array_value(key, Some(value)),
            Value::Object(_) => not_supported("Objects"),
            Value::Collection(_) | Value::Map(_) => not_supported("Collections"),
        }
    }

    fn get_serialized_content(&mut self) -> Result<Vec<u8>, Error> {
        Ok(self.text.take().map(String::into_bytes).unwrap_or_default())
    }

    fn set_on_before_object_serialization(&mut self, _hook: Option<ParsableHook>) {}

    fn set_on_after_object_serialization(&mut self, _hook: Option<ParsableHook>) {}
}

/// Creates [TextParseNode]s
#[derive(Debug, Clone, Default)]
pub struct TextParseNodeFactory;

impl ParseNodeFactory for TextParseNodeFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Ok(TEXT_CONTENT_TYPE)
    }

    fn get_root_parse_node(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Box<dyn ParseNode>, Error> {
        if content_type.trim().is_empty() {
            return Err(Error::InvalidFormat("Empty content type".to_owned()));
        }
        let text = String::from_utf8(content.to_vec())?;
        Ok(Box::new(TextParseNode::new(&text)))
    }
}

/// Creates [TextSerializationWriter]s
#[derive(Debug, Clone, Default)]
pub struct TextSerializationWriterFactory;

impl SerializationWriterFactory for TextSerializationWriterFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Ok(TEXT_CONTENT_TYPE)
    }

    fn get_serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, Error> {
        if content_type.trim().is_empty() {
            return Err(Error::InvalidFormat("Empty content type".to_owned()));
        }
        Ok(Box::new(TextSerializationWriter::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::testing::Person;

    #[test]
    fn parse_primitives() {
        assert_eq!(TextParseNode::new("42").get_int32_value().unwrap(), Some(42));
        assert_eq!(TextParseNode::new("true").get_bool_value().unwrap(), Some(true));
        assert_eq!(
            TextParseNode::new("\"quoted\"").get_string_value().unwrap().as_deref(),
            Some("quoted")
        );
        assert_eq!(TextParseNode::new("").get_int64_value().unwrap(), None);
        assert!(matches!(
            TextParseNode::new("forty").get_int32_value(),
            Err(Error::ParseInt(_))
        ));
    }

    #[test]
    fn only_one_pair_of_quotes_is_removed() {
        let text = |raw: &str| TextParseNode::new(raw).get_string_value().unwrap();
        assert_eq!(text("\"\"a\"\"").as_deref(), Some("\"a\""));
        assert_eq!(text("\"a").as_deref(), Some("\"a"));
        assert_eq!(text("\"").as_deref(), Some("\""));
        assert_eq!(text("\"\""), None);
    }

    #[test]
    fn structured_reads_are_not_supported() {
        let node = TextParseNode::new("{}");
        assert!(matches!(node.get_child_node("a"), Err(Error::NotSupported(_))));
        assert!(matches!(
            node.get_object_value(Person::create),
            Err(Error::NotSupported(_))
        ));
        assert!(matches!(
            node.get_collection_of_primitive_values("string"),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn write_single_value() {
        let mut writer = TextSerializationWriter::new();
        writer
            .write_date_only_value(None, NaiveDate::from_ymd_opt(2024, 1, 31))
            .unwrap();
        assert!(writer.write_string_value(None, Some("again")).is_err());
        assert_eq!(writer.get_serialized_content().unwrap(), b"2024-01-31".to_vec());

        assert!(matches!(
            writer.write_int32_value(Some("count"), Some(1)),
            Err(Error::NotSupported(_))
        ));
        assert!(matches!(
            writer.write_object_value(None, Some(&Person::new())),
            Err(Error::NotSupported(_))
        ));
    }
}
