//! Runtime contracts for Microsoft Graph models
//!
//! A model keeps every property in a [store::BackingStore] and exposes typed
//! accessors on top of it. This crate provides the pieces such models are
//! built from:
//!
//! - `serialization`: the [serialization::Parsable], [serialization::ParseNode]
//!   and [serialization::SerializationWriter] contracts with JSON and text
//!   implementations, factory registries and the change tracking proxies
//! - `store`: dynamic values and the in-memory backing store
//! - `property`: conversions between Rust types, store values and the wire
//! - `enums`: string forms of closed and bitmask enums
//! - `duration`: ISO 8601 durations
//! - `config`: serialization settings and byte level entry points
//! - `error`: error types and handling
//!
pub mod config;
pub mod duration;
pub mod enums;
pub mod error;
pub mod property;
pub mod serialization;
pub mod store;

pub use config::{from_json, to_json, SerializationConfig};
pub use error::Error;
