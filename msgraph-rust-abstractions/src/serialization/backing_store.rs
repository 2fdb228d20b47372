/*!
Factory wrappers connecting the formats to the change tracking of backed
models.

Parsed models must not report the wire values as changes, and serialized
models should only send what changed since they were parsed or last sent.
*/

use std::sync::Arc;

use crate::error::Error;

use super::{
    Parsable, ParsableHook, ParseNode, ParseNodeFactory, SerializationWriter,
    SerializationWriterFactory,
};

fn begin_assignment(model: &dyn Parsable) {
    if let Some(model) = model.as_backed_model() {
        model.backing_store().set_initialization_completed(false);
    }
}

fn complete_assignment(model: &dyn Parsable) {
    if let Some(model) = model.as_backed_model() {
        model.backing_store().set_initialization_completed(true);
    }
}

fn begin_serialization(model: &dyn Parsable) {
    if let Some(model) = model.as_backed_model() {
        model.backing_store().set_return_only_changed_values(true);
    }
}

fn complete_serialization(model: &dyn Parsable) {
    if let Some(model) = model.as_backed_model() {
        let store = model.backing_store();
        store.set_return_only_changed_values(false);
        store.set_initialization_completed(true);
    }
}

/// Runs `hook` and then the hook that was installed before it
fn chain(hook: ParsableHook, previous: Option<&ParsableHook>) -> ParsableHook {
    match previous.cloned() {
        None => hook,
        Some(previous) => Arc::new(move |model: &dyn Parsable| {
            hook(model);
            previous(model);
        }),
    }
}

/// Wraps a [ParseNodeFactory] so that models leave parsing with
/// initialization completed and no changes recorded.
#[derive(Clone)]
pub struct BackingStoreParseNodeFactory {
    inner: Arc<dyn ParseNodeFactory>,
}

impl BackingStoreParseNodeFactory {
    /// Wraps `inner`
    pub fn new(inner: Arc<dyn ParseNodeFactory>) -> Self {
        BackingStoreParseNodeFactory { inner }
    }
}

impl ParseNodeFactory for BackingStoreParseNodeFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        self.inner.valid_content_type()
    }

    fn get_root_parse_node(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Box<dyn ParseNode>, Error> {
        let mut node = self.inner.get_root_parse_node(content_type, content)?;
        let before = chain(
            Arc::new(begin_assignment),
            node.on_before_assign_field_values(),
        );
        let after = chain(
            Arc::new(complete_assignment),
            node.on_after_assign_field_values(),
        );
        node.set_on_before_assign_field_values(Some(before));
        node.set_on_after_assign_field_values(Some(after));
        Ok(node)
    }
}

/// Wraps a [SerializationWriterFactory] so that backed models write only
/// their changed values and are marked clean afterwards.
#[derive(Clone)]
pub struct BackingStoreSerializationWriterProxyFactory {
    inner: Arc<dyn SerializationWriterFactory>,
}

impl BackingStoreSerializationWriterProxyFactory {
    /// Wraps `inner`
    pub fn new(inner: Arc<dyn SerializationWriterFactory>) -> Self {
        BackingStoreSerializationWriterProxyFactory { inner }
    }
}

impl SerializationWriterFactory for BackingStoreSerializationWriterProxyFactory {
    fn valid_content_type(&self) -> Result<&str, Error> {
        self.inner.valid_content_type()
    }

    fn get_serialization_writer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn SerializationWriter>, Error> {
        let mut writer = self.inner.get_serialization_writer(content_type)?;
        writer.set_on_before_object_serialization(Some(Arc::new(begin_serialization)));
        writer.set_on_after_object_serialization(Some(Arc::new(complete_serialization)));
        Ok(writer)
    }
}
