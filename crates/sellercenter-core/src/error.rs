use thiserror::Error;

use crate::feed::ErrorResponse;
use crate::http_client::HttpError;

/// Value-level validation errors raised while building domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("seller sku cannot be empty")]
    EmptySellerSku,
    #[error("image url cannot be empty")]
    EmptyImageUrl,
    #[error("brand name cannot be empty")]
    EmptyBrandName,
    #[error("category name cannot be empty")]
    EmptyCategoryName,
    #[error("category name '{name}' cannot contain ',' or be all digits")]
    InvalidCategoryName { name: String },

    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be non-negative: '{value}'")]
    NegativeValue { field: &'static str, value: String },
    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("product node is malformed: {reason}")]
    MalformedNode { reason: String },

    #[error("timestamp must match YYYY-MM-DD HH:MM:SS: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("configuration value '{name}' is missing")]
    MissingConfiguration { name: &'static str },
    #[error("configuration value '{name}' is invalid: '{value}'")]
    InvalidConfiguration { name: &'static str, value: String },
}

/// Top-level error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is meaningless before anything is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submitted feed was rejected by the provider.
    #[error(transparent)]
    Feed(ErrorResponse),

    /// A read request was rejected by the provider.
    #[error(transparent)]
    Request(ErrorResponse),

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("provider returned status {status} with an unrecognized body")]
    UnexpectedStatus { status: u16, body: String },

    #[error("xml error: {0}")]
    Xml(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Provider error document carried by a rejection, if any.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Feed(response) | Self::Request(response) => Some(response),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(error: quick_xml::DeError) -> Self {
        Self::Xml(error.to_string())
    }
}
