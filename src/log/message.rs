use super::{Error, ErrorKind};
use std::fmt::Display;

pub const UNDEFINED_VARIABLE: &str = "undefined variable";
pub const INVALID_SCOPE_OPERATION: &str = "invalid scope operation";
pub const INVALID_NAME: &str = "invalid name";
pub const SERIALIZATION_FAILURE: &str = "serialization failure";
pub const SERVICE_FAILURE: &str = "compile service failure";

/// Return an [`Error`] explaining that no active scope declares `name`.
pub fn error_undefined_variable(name: &str) -> Error {
    Error::build(ErrorKind::UndefinedVariable, UNDEFINED_VARIABLE)
        .with_help(format!("`{name}` is not declared in any enclosing scope"))
}

/// Return an [`Error`] explaining that the root scope cannot be exited.
pub fn error_root_scope() -> Error {
    Error::build(ErrorKind::InvalidScopeOperation, INVALID_SCOPE_OPERATION)
        .with_help("the root scope must never be removed, is every exit paired with an enter?")
}

/// Return an [`Error`] explaining that a scoped closure tried to exit a scope
/// it did not enter.
pub fn error_scope_floor() -> Error {
    Error::build(ErrorKind::InvalidScopeOperation, INVALID_SCOPE_OPERATION)
        .with_help("a scoped block may only exit scopes it entered itself")
}

/// Return an [`Error`] describing a malformed binding name.
pub fn error_invalid_name(name: &str) -> Error {
    let help = if name.is_empty() {
        "names must not be empty".to_string()
    } else {
        format!("name {name:?} must not contain whitespace or control characters")
    };

    Error::build(ErrorKind::InvalidName, INVALID_NAME).with_help(help)
}

/// Return an [`Error`] explaining that a value could not be converted.
pub fn error_serialize<T>(cause: T) -> Error
where
    T: Display,
{
    Error::build(ErrorKind::Serialization, SERIALIZATION_FAILURE).with_help(cause.to_string())
}

/// Return an [`Error`] carrying the message of a compile service error payload.
pub fn error_service<T>(message: T) -> Error
where
    T: Into<String>,
{
    Error::build(ErrorKind::Service, SERVICE_FAILURE).with_help(message)
}
