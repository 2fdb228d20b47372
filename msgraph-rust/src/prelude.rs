//! Models, accessor traits and the serialization entry points
pub use crate::models::call_records::*;
pub use crate::models::*;
pub use msgraph_rust_abstractions::{
    duration::IsoDuration,
    enums::GraphEnum,
    error::Error,
    property::Property,
    serialization::{Parsable, ParseNode, SerializationWriter},
    store::{AdditionalData, AdditionalDataHolder, BackedModel, BackingStore, Value},
    config::{from_json, to_json, SerializationConfig},
};
