//! Payloads exchanged with the external compile service.
//!
//! The service accepts a POST body of the form `{"code": "..."}` and answers
//! with either an object of result sections (`tokens`, `ast`, `ir`, `asm`,
//! ...) or an object carrying an `error` string.

use crate::log::{error_serialize, error_service, Error};
use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the field that marks a response as an error payload.
pub const ERROR_FIELD: &str = "error";

/// Body of a compile request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileRequest {
    /// Source code to compile.
    pub code: String,
}

impl CompileRequest {
    /// Create a new [`CompileRequest`] for the given source code.
    #[inline]
    pub fn new<S>(code: S) -> Self
    where
        S: Into<String>,
    {
        Self { code: code.into() }
    }

    /// Serialize the request to its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(error_serialize)
    }
}

/// Parsed body of a compile response.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileResponse {
    /// The service produced results, keyed by section name.
    Success(Map<String, Value>),
    /// The service reported an error.
    Failure {
        /// Message from the `error` field.
        error: String,
    },
}

impl CompileResponse {
    /// Parse a response body.
    ///
    /// An object with a string `error` field is a [`CompileResponse::Failure`],
    /// any other object is a [`CompileResponse::Success`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `text` is not JSON, or is JSON but not an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::CompileResponse;
    ///
    /// let response = CompileResponse::from_json(r#"{"error": "Undefined variable: 'y'"}"#);
    ///
    /// assert!(response.is_ok_and(|r| r.is_failure()));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(text).map_err(error_serialize)?;

        Self::from_value(value)
    }

    /// Classify an already parsed response body.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(error_serialize(format!(
                    "expected a response object, found `{other}`"
                )))
            }
        };

        match map.remove(ERROR_FIELD) {
            Some(Value::String(error)) => Ok(Self::Failure { error }),
            Some(other) => {
                map.insert(ERROR_FIELD.to_string(), other);
                Ok(Self::Success(map))
            }
            None => Ok(Self::Success(map)),
        }
    }

    /// Return true if this is an error payload.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Return one result section, such as `tokens` or `asm`.
    ///
    /// Always `None` for a failure.
    pub fn section(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Success(map) => map.get(name),
            Self::Failure { .. } => None,
        }
    }

    /// Convert into the result sections, or an [`Error`] of kind
    /// [`Service`][`crate::ErrorKind::Service`] carrying the service's message.
    pub fn into_result(self) -> Result<Map<String, Value>, Error> {
        match self {
            Self::Success(map) => Ok(map),
            Self::Failure { error } => Err(error_service(error)),
        }
    }
}
