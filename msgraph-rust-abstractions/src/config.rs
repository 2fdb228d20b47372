/*!
Serialization settings and the entry points that turn models into bytes and
back.
*/

use std::sync::Arc;

use derive_builder::Builder;
use derive_getters::Getters;
use serde_derive::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::Error,
    property::Property,
    serialization::{
        backing_store::{
            BackingStoreParseNodeFactory, BackingStoreSerializationWriterProxyFactory,
        },
        registry::{ParseNodeFactoryRegistry, SerializationWriterFactoryRegistry},
        Parsable, ParsableFactory, ParseNodeFactory, SerializationWriterFactory,
        JSON_CONTENT_TYPE,
    },
};

/// Content type and change tracking used to read and write models
#[derive(Debug, Clone, PartialEq, Eq, Builder, Getters, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[builder(build_fn(error = "Error"))]
pub struct SerializationConfig {
    /// Content type of the payloads
    #[builder(setter(into), default = "JSON_CONTENT_TYPE.to_owned()")]
    content_type: String,
    /// Parse models clean and serialize only their changes
    #[builder(default)]
    backing_store_enabled: bool,
}

impl Default for SerializationConfig {
    fn default() -> Self {
        SerializationConfig {
            content_type: JSON_CONTENT_TYPE.to_owned(),
            backing_store_enabled: false,
        }
    }
}

impl SerializationConfig {
    /// Creates a builder for a [SerializationConfig]
    pub fn builder() -> SerializationConfigBuilder {
        SerializationConfigBuilder::default()
    }

    /// The registry of parse node factories, wrapped for change tracking
    /// if the backing store is enabled
    pub fn parse_node_factory(&self) -> Arc<dyn ParseNodeFactory> {
        let registry: Arc<dyn ParseNodeFactory> = Arc::new(ParseNodeFactoryRegistry::with_defaults());
        if self.backing_store_enabled {
            Arc::new(BackingStoreParseNodeFactory::new(registry))
        } else {
            registry
        }
    }

    /// The registry of serialization writer factories, wrapped for change
    /// tracking if the backing store is enabled
    pub fn serialization_writer_factory(&self) -> Arc<dyn SerializationWriterFactory> {
        let registry: Arc<dyn SerializationWriterFactory> =
            Arc::new(SerializationWriterFactoryRegistry::with_defaults());
        if self.backing_store_enabled {
            Arc::new(BackingStoreSerializationWriterProxyFactory::new(registry))
        } else {
            registry
        }
    }

    /// Serializes a model
    #[instrument(
        name = "msgraph_rust_abstractions::config::serialize",
        level = "debug",
        skip(self, model),
        fields(content_type = %self.content_type)
    )]
    pub fn serialize(&self, model: &dyn Parsable) -> Result<Vec<u8>, Error> {
        let mut writer = self
            .serialization_writer_factory()
            .get_serialization_writer(&self.content_type)?;
        writer.write_object_value(None, Some(model))?;
        writer.get_serialized_content()
    }

    /// Serializes a collection of models
    pub fn serialize_collection(&self, models: &[&dyn Parsable]) -> Result<Vec<u8>, Error> {
        let mut writer = self
            .serialization_writer_factory()
            .get_serialization_writer(&self.content_type)?;
        writer.write_collection_of_object_values(None, models)?;
        writer.get_serialized_content()
    }

    /// Deserializes a model created by `factory`, `None` for a null payload
    #[instrument(
        name = "msgraph_rust_abstractions::config::deserialize",
        level = "debug",
        skip(self, content, factory),
        fields(content_type = %self.content_type, length = content.len())
    )]
    pub fn deserialize(
        &self,
        content: &[u8],
        factory: ParsableFactory,
    ) -> Result<Option<Box<dyn Parsable>>, Error> {
        self.parse_node_factory()
            .get_root_parse_node(&self.content_type, content)?
            .get_object_value(factory)
    }

    /// Deserializes a collection of models created by `factory`
    pub fn deserialize_collection(
        &self,
        content: &[u8],
        factory: ParsableFactory,
    ) -> Result<Option<Vec<Box<dyn Parsable>>>, Error> {
        self.parse_node_factory()
            .get_root_parse_node(&self.content_type, content)?
            .get_collection_of_object_values(factory)
    }

    /// Reads a typed value: a model, an enum, a primitive or a collection
    /// of any of them
    pub fn deserialize_value<T: Property>(&self, content: &[u8]) -> Result<Option<T>, Error> {
        let node = self
            .parse_node_factory()
            .get_root_parse_node(&self.content_type, content)?;
        T::read(&*node)
    }

    /// Writes a typed value
    pub fn serialize_value<T: Property>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let mut writer = self
            .serialization_writer_factory()
            .get_serialization_writer(&self.content_type)?;
        T::write(&mut *writer, None, value)?;
        writer.get_serialized_content()
    }
}

/// Serializes a value to JSON with the default configuration
pub fn to_json<T: Property>(value: &T) -> Result<String, Error> {
    Ok(String::from_utf8(
        SerializationConfig::default().serialize_value(value)?,
    )?)
}

/// Deserializes a value from JSON with the default configuration
pub fn from_json<T: Property>(json: &str) -> Result<Option<T>, Error> {
    SerializationConfig::default().deserialize_value(json.as_bytes())
}
