use crate::{
    log::{error_serialize, Error},
    ScopeTable,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{to_value, Map, Value};

/// A [`ScopeTable`] holding dynamically typed JSON values.
///
/// This is the table an untyped interpreter would use, where every runtime
/// value is a [`Value`].
pub type Store = ScopeTable<Value>;

impl ScopeTable<Value> {
    /// Serialize `value` and bind it to `name` in the innermost frame.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the serialization fails or `name` is not a
    /// valid name.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::Store;
    /// use serde_json::json;
    ///
    /// let mut store = Store::new();
    /// store.declare_value("point", [1, 2]).unwrap();
    ///
    /// assert_eq!(store.lookup("point"), Ok(&json!([1, 2])));
    /// ```
    pub fn declare_value<S, T>(&mut self, name: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let value = to_value(value).map_err(error_serialize)?;

        self.declare(name, value)
    }

    /// Serialize `value` and rebind the nearest binding of `name` to it,
    /// returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the serialization fails or no active frame
    /// binds `name`.
    pub fn update_value<T>(&mut self, name: &str, value: T) -> Result<Value, Error>
    where
        T: Serialize,
    {
        let value = to_value(value).map_err(error_serialize)?;

        self.update(name, value)
    }

    /// Look up `name` and deserialize its nearest binding into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if no active frame binds `name`, or the bound
    /// value does not deserialize into `T`.
    pub fn lookup_as<T>(&self, name: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        T::deserialize(self.lookup(name)?).map_err(error_serialize)
    }

    /// Render every active frame as a JSON object, root first.
    pub fn snapshot(&self) -> Value {
        let frames = self
            .frames()
            .map(|frame| {
                frame
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect::<Map<String, Value>>()
            })
            .map(Value::Object)
            .collect();

        Value::Array(frames)
    }
}
