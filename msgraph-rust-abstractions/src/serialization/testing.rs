//! A hand-written backed model for exercising formats and proxies.

use std::any::Any;

use crate::{
    error::Error,
    property::{object_from_value, read_object, read_objects, write_objects, Property},
    store::{AdditionalDataHolder, BackedModel, BackingStore, BackingStoreExt, InMemoryBackingStore, Value},
};

use super::{
    assign_additional_field, FieldDeserializers, Parsable, ParseNode, SerializationWriter,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct Person {
    backing_store: InMemoryBackingStore,
}

impl Person {
    pub(crate) fn new() -> Self {
        Person::default()
    }

    pub(crate) fn create(_node: &dyn ParseNode) -> Result<Box<dyn Parsable>, Error> {
        Ok(Box::new(Person::new()))
    }

    pub(crate) fn display_name(&self) -> Result<Option<String>, Error> {
        self.backing_store.get_value("displayName")
    }

    pub(crate) fn set_display_name(&mut self, value: Option<String>) -> Result<(), Error> {
        self.backing_store.set_value("displayName", value)
    }

    pub(crate) fn age(&self) -> Result<Option<i32>, Error> {
        self.backing_store.get_value("age")
    }

    pub(crate) fn set_age(&mut self, value: Option<i32>) -> Result<(), Error> {
        self.backing_store.set_value("age", value)
    }

    pub(crate) fn manager(&self) -> Result<Option<Person>, Error> {
        self.backing_store.get_value("manager")
    }

    pub(crate) fn set_manager(&mut self, value: Option<Person>) -> Result<(), Error> {
        self.backing_store.set_value("manager", value)
    }

    pub(crate) fn tags(&self) -> Result<Option<Vec<String>>, Error> {
        self.backing_store.get_value("tags")
    }

    pub(crate) fn set_tags(&mut self, value: Option<Vec<String>>) -> Result<(), Error> {
        self.backing_store.set_value("tags", value)
    }

    fn field_deserializers() -> FieldDeserializers<Self> {
        let mut fields: FieldDeserializers<Self> = FieldDeserializers::new();
        fields.insert("displayName", |model, node| {
            model.set_display_name(String::read(node)?)
        });
        fields.insert("age", |model, node| model.set_age(i32::read(node)?));
        fields.insert("manager", |model, node| model.set_manager(Person::read(node)?));
        fields.insert("tags", |model, node| model.set_tags(Vec::<String>::read(node)?));
        fields
    }
}

impl BackedModel for Person {
    fn backing_store(&self) -> &dyn BackingStore {
        &self.backing_store
    }

    fn backing_store_mut(&mut self) -> &mut dyn BackingStore {
        &mut self.backing_store
    }
}

impl Parsable for Person {
    fn deserialize_field(&mut self, key: &str, node: &dyn ParseNode) -> Result<(), Error> {
        match Self::field_deserializers().get(key) {
            Some(deserializer) => deserializer(self, node),
            None => assign_additional_field(self, key, node),
        }
    }

    fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<(), Error> {
        if let Some(value) = self.display_name()? {
            String::write(writer, Some("displayName"), &value)?;
        }
        if let Some(value) = self.age()? {
            i32::write(writer, Some("age"), &value)?;
        }
        if let Some(value) = self.manager()? {
            Person::write(writer, Some("manager"), &value)?;
        }
        if let Some(value) = self.tags()? {
            Vec::<String>::write(writer, Some("tags"), &value)?;
        }
        writer.write_additional_data(&self.additional_data()?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn Parsable> {
        Box::new(self.clone())
    }

    fn as_backed_model(&self) -> Option<&dyn BackedModel> {
        Some(self)
    }
}

impl Property for Person {
    const TYPE_NAME: &'static str = "person";

    fn into_value(self) -> Value {
        Value::Object(Box::new(self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        object_from_value(value)
    }

    fn read(node: &dyn ParseNode) -> Result<Option<Self>, Error> {
        read_object(node, Person::create)
    }

    fn write(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        value: &Self,
    ) -> Result<(), Error> {
        writer.write_object_value(key, Some(value))
    }

    fn read_collection(node: &dyn ParseNode) -> Result<Option<Vec<Self>>, Error> {
        read_objects(node, Person::create)
    }

    fn write_collection(
        writer: &mut dyn SerializationWriter,
        key: Option<&str>,
        values: &[Self],
    ) -> Result<(), Error> {
        write_objects(writer, key, values)
    }
}
