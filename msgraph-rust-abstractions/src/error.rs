/*!
Error type for msgraph models
*/

use thiserror::Error;

#[derive(Error, Debug)]
/// Model serialization error
pub enum Error {
    /// Invalid format
    #[error("{0} doesn't have the right format")]
    InvalidFormat(String),
    /// Type error
    #[error("Value {0} doesn't have the {1} type.")]
    Type(String, String),
    /// Backing store error
    #[error("Backing store error: {0}")]
    Store(String),
    /// Not found
    #[error("{0} not found.")]
    NotFound(String),
    /// Not supported
    #[error("Feature {0} is not supported.")]
    NotSupported(String),
    /// Serde json
    #[error(transparent)]
    JSONSerde(#[from] serde_json::Error),
    /// Chrono parse
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
    /// Uuid parse
    #[error(transparent)]
    Uuid(#[from] uuid::Error),
    /// Base64 decode error
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// Try from int error
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),
    /// from utf8 error
    #[error(transparent)]
    FromUTF8(#[from] std::string::FromUtf8Error),
    /// parse int error
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
    /// parse float error
    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),
    /// parse bool error
    #[error(transparent)]
    ParseBool(#[from] std::str::ParseBoolError),
    /// derive builder
    #[error(transparent)]
    DeriveBuilder(#[from] derive_builder::UninitializedFieldError),
}
