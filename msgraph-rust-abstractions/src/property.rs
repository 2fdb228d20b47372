/*!
Mapping of Rust property types onto the store and the wire.

Every type a model property can have implements [Property]: scalars here,
`Vec<T>` for collections, and models and enums through the helper functions
at the end of this module.
*/

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    duration::IsoDuration,
    enums::{serialize_enum_values, GraphEnum},
    error::Error,
    serialization::{Parsable, ParsableFactory, ParseNode, SerializationWriter},
    store::Value,
};

/// A type that can be kept in a backing store and read from or written to
/// the wire.
pub trait Property: Sized + Clone + Send + Sync + 'static {
    /// Name used in type errors and to request primitive collections from a
    /// parse node
    const TYPE_NAME: &'static str;

    /// Widens into a store value
    fn into_value(self) -> Value;

    /// Narrows a store value, `None` if it holds another type
    fn from_value(value: &Value) -> Option<Self>;

    /// Reads a value from a parse node, `None` for null
    fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error>;

    /// Writes a value under `key`
    fn write(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        value: &Self,
    ) -> Result<(), Error>;

    /// Reads a collection of values. Null members are skipped.
    fn read_collection(node: &dyn ParseNode) -> Result<Option<Vec<Self>>, Error> {
        node.get_collection_of_primitive_values(Self::TYPE_NAME)?
            .map(|values| {
                values
                    .iter()
                    .filter(|value| !value.is_null())
                    .map(|value| {
                        Self::from_value(value).ok_or_else(|| {
                            Error::Type(value.kind().to_owned(), Self::TYPE_NAME.to_owned())
                        })
                    })
                    .collect()
            })
            .transpose()
    }

    /// Writes a collection of values under `key`
    fn write_collection(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        values: &[Self],
    ) -> Result<(), Error> {
        let values: Vec<Value> = values.iter().cloned().map(Property::into_value).collect();
        writer.write_collection_of_primitive_values(key, &values)
    }
}

macro_rules! copy_property {
    ($ty:ty, $type_name:literal, $variant:ident, $get:ident, $write:ident) => {
        impl Property for $ty {
            const TYPE_NAME: &'static str = $type_name;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(value) => Some(*value),
                    _ => None,
                }
            }

            fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error> {
                node.$get()
            }

            fn write(
                writer: &mut dyn SerializationWriter,
                key: Option<&str>,
                value: &Self,
            ) -> Result<(), Error> {
                writer.$write(key, Some(*value))
            }
        }
    };
}

copy_property!(bool, "bool", Boolean, get_bool_value, write_bool_value);
copy_property!(i32, "int32", Int, get_int32_value, write_int32_value);
copy_property!(i64, "int64", Long, get_int64_value, write_int64_value);
copy_property!(f32, "float32", Float, get_float32_value, write_float32_value);
copy_property!(f64, "float64", Double, get_float64_value, write_float64_value);
copy_property!(Uuid, "uuid", Uuid, get_uuid_value, write_uuid_value);
copy_property!(
    DateTime<FixedOffset>,
    "time",
    DateTime,
    get_time_value,
    write_time_value
);
copy_property!(
    NaiveDate,
    "dateonly",
    Date,
    get_date_only_value,
    write_date_only_value
);
copy_property!(
    NaiveTime,
    "timeonly",
    Time,
    get_time_only_value,
    write_time_only_value
);
copy_property!(
    IsoDuration,
    "isoduration",
    Duration,
    get_iso_duration_value,
    write_iso_duration_value
);

impl Property for String {
    const TYPE_NAME: &'static str = "string";

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error> {
        node.get_string_value()
    }

    fn write(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        value: &Self,
    ) -> Result<(), Error> {
        writer.write_string_value(key, Some(value))
    }
}

/// Binary content, base64 on the wire
impl Property for Vec<u8> {
    const TYPE_NAME: &'static str = "base64";

    fn into_value(self) -> Value {
        Value::Bytes(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error> {
        node.get_byte_array_value()
    }

    fn write(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        value: &Self,
    ) -> Result<(), Error> {
        writer.write_byte_array_value(key, Some(value))
    }
}

impl<T: Property> Property for Vec<T> {
    const TYPE_NAME: &'static str = "collection";

    fn into_value(self) -> Value {
        Value::Collection(self.into_iter().map(Property::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Collection(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error> {
        T::read_collection(node)
    }

    fn write(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        value: &Self,
    ) -> Result<(), Error> {
        T::write_collection(writer, key, value)
    }
}

fn downcast_model<T: Parsable>(model: Box<dyn Parsable>) -> Result<T, Error> {
    model
        .downcast::<T>()
        .map(|model| *model)
        .ok_or_else(|| {
            Error::Type(
                "object".to_owned(),
                std::any::type_name::<T>().to_owned(),
            )
        })
}

/// Narrows a store value to a concrete model
pub fn object_from_value<T: Parsable + Clone>(value: &Value) -> Option<T> {
    value.as_object()?.as_any().downcast_ref::<T>().cloned()
}

/// Reads a nested model built by `factory`. A factory that returns another
/// type than `T` is an [Error::Type].
pub fn read_object<T: Parsable>(
    node: &dyn ParseNode,
    factory: ParsableFactory,
) -> Result<Option<T>, Error> {
    node.get_object_value(factory)?
        .map(downcast_model::<T>)
        .transpose()
}

/// Reads a collection of nested models built by `factory`. `null` members
/// are skipped, so the models after one move up a position.
pub fn read_objects<T: Parsable>(
    node: &dyn ParseNode,
    factory: ParsableFactory,
) -> Result<Option<Vec<T>>, Error> {
    node.get_collection_of_object_values(factory)?
        .map(|models| models.into_iter().map(downcast_model::<T>).collect())
        .transpose()
}

/// Writes a collection of models under `key`
pub fn write_objects<T: Parsable>(
    writer: &mut dyn SerializationWriter,
    key: Option<&str>,
    values: &[T],
) -> Result<(), Error> {
    let values: Vec<&dyn Parsable> = values.iter().map(|value| value as &dyn Parsable).collect();
    writer.write_collection_of_object_values(key, &values)
}

fn parse_enum<E: GraphEnum>(name: &str) -> Option<E> {
    let value = E::parse(name);
    if value.is_none() {
        debug!(
            value = name,
            enum_type = std::any::type_name::<E>(),
            "unrecognized enum value"
        );
    }
    value
}

/// Narrows a store value to an enum
pub fn enum_from_value<E: GraphEnum>(value: &Value) -> Option<E> {
    match value {
        Value::Enum(name) => E::parse(name),
        _ => None,
    }
}

/// Reads an enum from its wire name. Unrecognized names are `None`.
pub fn read_enum<E: GraphEnum>(node: &dyn ParseNode) -> Result<Option<E>, Error> {
    Ok(node
        .get_enum_value()?
        .and_then(|name| parse_enum::<E>(&name)))
}

/// Reads a collection of enums, dropping unrecognized names
pub fn read_enums<E: GraphEnum>(node: &dyn ParseNode) -> Result<Option<Vec<E>>, Error> {
    Ok(node.get_collection_of_enum_values()?.map(|names| {
        names
            .iter()
            .filter_map(|name| parse_enum::<E>(name))
            .collect()
    }))
}

/// Writes an enum as its wire name
pub fn write_enum<E: GraphEnum>(
    writer: &mut dyn SerializationWriter,
    key: Option<&str>,
    value: &E,
) -> Result<(), Error> {
    writer.write_string_value(key, Some(&value.to_string()))
}

/// Writes a collection of enums as their wire names
pub fn write_enums<E: GraphEnum>(
    writer: &mut dyn SerializationWriter,
    key: Option<&str>,
    values: &[E],
) -> Result<(), Error> {
    writer.write_collection_of_string_values(key, &serialize_enum_values(values))
}
