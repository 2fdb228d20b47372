//! Typed Microsoft Graph models
//!
//! Every model keeps its properties in a backing store and exposes them
//! through an `*able` trait, so a `ResellerDelegatedAdminRelationship` can be
//! used wherever a `&dyn DelegatedAdminRelationshipable` or a
//! `&dyn Entityable` is expected. Polymorphic payloads are resolved through
//! the `@odata.type` discriminator by each model's
//! `create_from_discriminator_value`, and every base type with subtypes has
//! an `Any*` enum (`AnyEntity`, `AnyDelegatedAdminRelationship`, ...) that
//! reads into the matching variant.
//!
//! ```
//! use msgraph_rust::prelude::*;
//!
//! let json = r#"{"status":"active","createdDateTime":"2024-01-01T00:00:00Z"}"#;
//! let relationship = from_json::<DelegatedAdminRelationship>(json)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     relationship.status().unwrap(),
//!     Some(DelegatedAdminRelationshipStatus::Active)
//! );
//! ```
//!
//! The crate is organized into:
//!
//! - `models`: models and enums of the `microsoft.graph` namespace
//! - `models::call_records`: models and enums of `microsoft.graph.callRecords`
//! - `prelude`: models, accessor traits and the serialization entry points
//!
#[macro_use]
mod macros;

pub mod models;
pub mod prelude;

pub use msgraph_rust_abstractions as abstractions;
pub use msgraph_rust_abstractions::Error;
