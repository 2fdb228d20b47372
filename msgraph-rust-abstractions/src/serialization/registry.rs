/*!
Registries selecting a format factory by content type.

Lookups ignore parameters such as `; charset=utf-8` and case. A vendor
specific type like `application/vnd.github+json` falls back to its
structured syntax suffix (`application/json`) when it is not registered
itself.
*/

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::error::Error;

use super::{
    json::{JsonParseNodeFactory, JsonSerializationWriterFactory},
    text::{TextParseNodeFactory, TextSerializationWriterFactory},
    ParseNode, ParseNodeFactory, SerializationWriter, SerializationWriterFactory,
};

/// Removes parameters and lowercases a content type
pub fn normalize_content_type(content_type: &str) -> Result<String, Error> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime.is_empty() {
        return Err(Error::InvalidFormat("Empty content type".to_owned()));
    }
    Ok(mime)
}

/// Replaces the vendor subtype of a content type by its suffix
fn vendor_fallback(mime: &str) -> Option<String> {
    let (kind, subtype) = mime.split_once('/')?;
    let (_, suffix) = subtype.rsplit_once('+')?;
    let fallback = format!("{kind}/{suffix}");
    debug!(content_type = mime, fallback = %fallback, "vendor content type");
    Some(fallback)
}

fn lookup<'m, F: ?Sized>(
    factories: &'m HashMap<String, Arc<F>>,
    content_type: &str,
) -> Result<(String, &'m Arc<F>), Error> {
    let mime = normalize_content_type(content_type)?;
    if let Some(factory) = factories.get(&mime) {
        return Ok((mime, factory));
    }
    vendor_fallback(&mime)
        .and_then(|fallback| {
            let factory = factories.get(&fallback)?;
            Some((fallback, factory))
        })
        .ok_or_else(|| Error::NotFound(format!("Factory for content type {content_type}")))
}

/// [ParseNodeFactory] dispatching on the content type
#[derive(Clone, Default)]
pub struct ParseNodeFactoryRegistry {
    factories: HashMap<String, Arc<dyn ParseNodeFactory>>,
}

impl ParseNodeFactoryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the JSON and text factories
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            super::JSON_CONTENT_TYPE.to_owned(),
            Arc::new(JsonParseNodeFactory),
        );
        registry.factories.insert(
            super::TEXT_CONTENT_TYPE.to_owned(),
            Arc::new(TextParseNodeFactory),
        );
        registry
    }

    /// Registers a factory under its own content type, replacing any
    /// previous factory for it
    pub fn register(&mut self, factory: Arc<dyn ParseNodeFactory>) -> Result<(), Error> {
        let content_type = normalize_content_type(factory.valid_content_type()?)?;
        self.factories.insert(content_type, factory);
        Ok(())
    }

    /// Registered content types
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for ParseNodeFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseNodeFactoryRegistry")
            .field("content_types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ParseNodeFactory for ParseNodeFactoryRegistry {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Err(Error::NotSupported(
            "Single content type of a registry".to_owned(),
        ))
    }

    fn get_root_parse_node(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Box<dyn ParseNode>, Error> {
        let (content_type, factory) = lookup(&self.factories, content_type)?;
        factory.get_root_parse_node(&content_type, content)
    }
}

/// [SerializationWriterFactory] dispatching on the content type
#[derive(Clone, Default)]
pub struct SerializationWriterFactoryRegistry {
    factories: HashMap<String, Arc<dyn SerializationWriterFactory>>,
}

impl SerializationWriterFactoryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the JSON and text factories
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            super::JSON_CONTENT_TYPE.to_owned(),
            Arc::new(JsonSerializationWriterFactory),
        );
        registry.factories.insert(
            super::TEXT_CONTENT_TYPE.to_owned(),
            Arc::new(TextSerializationWriterFactory),
        );
        registry
    }

    /// Registers a factory under its own content type, replacing any
    /// previous factory for it
    pub fn register(&mut self, factory: Arc<dyn SerializationWriterFactory>) -> Result<(), Error> {
        let content_type = normalize_content_type(factory.valid_content_type()?)?;
        self.factories.insert(content_type, factory);
        Ok(())
    }

    /// Registered content types
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for SerializationWriterFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationWriterFactoryRegistry")
            .field("content_types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SerializationWriterFactory for SerializationWriterFactoryRegistry {
    fn valid_content_type(&self) -> Result<&str, Error> {
        Err(Error::NotSupported(
            "Single content type of a registry".to_owned(),
        ))
    }

    fn get_serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, Error> {
        let (content_type, factory) = lookup(&self.factories, content_type)?;
        factory.get_serialization_writer(&content_type)
    }
}
