use std::collections::{hash_map, HashMap};

/// One level of bindings within a [`ScopeTable`][`crate::ScopeTable`].
///
/// Names are unique within a frame. A frame is handed back by
/// [`exit_scope`][`crate::ScopeTable::exit_scope`] so the caller can inspect
/// what the block declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<V> {
    bindings: HashMap<String, V>,
}

impl<V> Frame<V> {
    /// Create a new, empty Frame.
    #[inline]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Get the value bound to `name` in this frame only.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.bindings.get(name)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.bindings.get_mut(name)
    }

    /// Return true if this frame binds `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings in this frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Names bound in this frame, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Bindings of this frame, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Consume the frame, returning its bindings.
    #[inline]
    pub fn into_bindings(self) -> HashMap<String, V> {
        self.bindings
    }

    /// Bind `name`, returning the value it replaces in this frame.
    #[inline]
    pub(crate) fn insert(&mut self, name: String, value: V) -> Option<V> {
        self.bindings.insert(name, value)
    }
}

impl<V> Default for Frame<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for Frame<V> {
    type Item = (String, V);
    type IntoIter = hash_map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}
