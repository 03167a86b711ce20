mod frame;

pub use frame::Frame;

use crate::log::{
    error_invalid_name, error_root_scope, error_scope_floor, error_undefined_variable, Error,
};
use std::{collections::HashSet, mem, slice};

/// A stack of lexical scopes mapping names to values of type `V`.
///
/// The table always holds at least one frame, the root scope. Lookups and
/// updates search from the innermost frame outward, so an inner binding
/// shadows an outer one for as long as its scope is active.
///
/// # Examples
///
/// ```
/// use symtab::{ErrorKind, ScopeTable};
///
/// let mut table = ScopeTable::new();
/// table.declare("a", 10).unwrap();
///
/// table.enter_scope();
/// table.declare("b", 20).unwrap();
/// assert_eq!(table.lookup("a"), Ok(&10));
/// assert_eq!(table.lookup("b"), Ok(&20));
///
/// table.exit_scope().unwrap();
/// assert_eq!(table.lookup("b").unwrap_err().kind(), ErrorKind::UndefinedVariable);
/// assert_eq!(table.lookup("a"), Ok(&10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTable<V> {
    frames: Vec<Frame<V>>,
    /// Lowest depth `exit_scope` may leave behind. One outside of `scoped`.
    floor: usize,
}

impl<V> ScopeTable<V> {
    /// Create a new [`ScopeTable`] containing only the root scope.
    #[inline]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
            floor: 1,
        }
    }

    /// Number of active frames, including the root. Never less than one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new, empty frame. Declarations target it until it is exited.
    #[inline]
    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Remove the innermost frame and return it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind
    /// [`InvalidScopeOperation`][`crate::ErrorKind::InvalidScopeOperation`]
    /// when only the root frame remains, or inside [`scoped`][`ScopeTable::scoped`]
    /// when the frame it opened is innermost. The table is left unchanged.
    pub fn exit_scope(&mut self) -> Result<Frame<V>, Error> {
        if self.frames.len() <= self.floor {
            return Err(match self.floor {
                1 => error_root_scope(),
                _ => error_scope_floor(),
            });
        }

        Ok(self
            .frames
            .pop()
            .expect("frames above the floor must exist"))
    }

    /// Run `f` inside a new scope and return its result.
    ///
    /// The scope is exited when `f` returns, whether it succeeded or not.
    /// Any scopes `f` entered and left open are closed as well. While `f`
    /// runs, [`exit_scope`][`ScopeTable::exit_scope`] refuses to remove the
    /// scope opened here or any scope outside it, so the depth after the
    /// call always equals the depth before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::ScopeTable;
    ///
    /// let mut table = ScopeTable::new();
    /// table.declare("x", 1).unwrap();
    ///
    /// let inner = table.scoped(|table| {
    ///     table.declare("x", 2)?;
    ///     table.lookup("x").copied()
    /// });
    ///
    /// assert_eq!(inner, Ok(2));
    /// assert_eq!(table.lookup("x"), Ok(&1));
    /// ```
    pub fn scoped<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.enter_scope();
        let floor = mem::replace(&mut self.floor, self.frames.len());
        let result = f(self);
        self.frames.truncate(self.floor - 1);
        self.floor = floor;

        result
    }

    /// Bind `name` to `value` in the innermost frame.
    ///
    /// An existing binding of `name` in the same frame is overwritten. Outer
    /// frames are never searched or modified.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind [`InvalidName`][`crate::ErrorKind::InvalidName`]
    /// if `name` is empty or contains whitespace or control characters.
    pub fn declare<S>(&mut self, name: S, value: V) -> Result<(), Error>
    where
        S: Into<String>,
    {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(error_invalid_name(&name));
        }
        self.current().insert(name, value);

        Ok(())
    }

    /// Bind `name` to `value` in the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid name.
    #[inline]
    pub fn declare_must<S>(&mut self, name: S, value: V)
    where
        S: Into<String>,
    {
        self.declare(name, value).unwrap()
    }

    /// Bind `name` to `value` in the innermost frame.
    ///
    /// Returns the `ScopeTable`, so additional bindings may be chained.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `name` is not a valid name.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::ScopeTable;
    ///
    /// let table = ScopeTable::new().with("print_int", 1).and_then(|t| t.with("read_int", 0));
    ///
    /// assert!(table.is_ok());
    /// ```
    #[inline]
    pub fn with<S>(mut self, name: S, value: V) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        self.declare(name, value)?;

        Ok(self)
    }

    /// Bind `name` to `value` in the innermost frame.
    ///
    /// Returns the `ScopeTable`, so additional bindings may be chained.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid name.
    #[inline]
    pub fn with_must<S>(mut self, name: S, value: V) -> Self
    where
        S: Into<String>,
    {
        self.declare_must(name, value);

        self
    }

    /// Return the value of the nearest binding of `name`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind
    /// [`UndefinedVariable`][`crate::ErrorKind::UndefinedVariable`] when no
    /// active frame binds `name`.
    #[inline]
    pub fn lookup(&self, name: &str) -> Result<&V, Error> {
        self.get(name).ok_or_else(|| error_undefined_variable(name))
    }

    /// Return the value of the nearest binding of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Return a mutable reference to the nearest binding of `name`, if any.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
    }

    /// Rebind `name` in the frame that holds its nearest binding, returning
    /// the previous value.
    ///
    /// Unlike [`declare`][`ScopeTable::declare`], the binding stays in the
    /// scope where it was declared, so the new value survives exiting the
    /// current scope.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind
    /// [`UndefinedVariable`][`crate::ErrorKind::UndefinedVariable`] when no
    /// active frame binds `name`. No frame is modified.
    pub fn update(&mut self, name: &str, value: V) -> Result<V, Error> {
        match self.get_mut(name) {
            Some(slot) => Ok(mem::replace(slot, value)),
            None => Err(error_undefined_variable(name)),
        }
    }

    /// Rebind `name` where it is found, or declare it in the innermost frame
    /// when no active frame binds it.
    ///
    /// Returns the previous value when an existing binding was replaced.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `name` has to be declared and is not a valid
    /// name.
    pub fn update_or_declare<S>(&mut self, name: S, value: V) -> Result<Option<V>, Error>
    where
        S: Into<String>,
    {
        let name = name.into();
        if let Some(slot) = self.get_mut(&name) {
            return Ok(Some(mem::replace(slot, value)));
        }
        self.declare(name, value)?;

        Ok(None)
    }

    /// Return true if any active frame binds `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Return true if the innermost frame binds `name`.
    #[inline]
    pub fn is_local(&self, name: &str) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains(name))
    }

    /// Index of the frame holding the nearest binding of `name`, where the
    /// root frame is `0`.
    #[inline]
    pub fn resolve_depth(&self, name: &str) -> Option<usize> {
        self.frames.iter().rposition(|frame| frame.contains(name))
    }

    /// Iterate over the active frames, root first.
    #[inline]
    pub fn frames(&self) -> slice::Iter<'_, Frame<V>> {
        self.frames.iter()
    }

    /// Iterate over every binding resolvable from the innermost scope.
    ///
    /// Each name appears once, paired with its nearest binding. Shadowed
    /// bindings are skipped.
    pub fn visible(&self) -> impl Iterator<Item = (&str, &V)> {
        let mut seen = HashSet::new();

        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .filter(move |(name, _)| seen.insert(*name))
    }

    /// The innermost frame.
    fn current(&mut self) -> &mut Frame<V> {
        self.frames
            .last_mut()
            .expect("root scope must never be removed")
    }
}

impl<V> ScopeTable<V>
where
    V: Clone,
{
    /// Return a copy of the value of the nearest binding of `name`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind
    /// [`UndefinedVariable`][`crate::ErrorKind::UndefinedVariable`] when no
    /// active frame binds `name`.
    #[inline]
    pub fn lookup_cloned(&self, name: &str) -> Result<V, Error> {
        self.lookup(name).cloned()
    }
}

impl<V> Default for ScopeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Return true if `name` is non-empty and free of whitespace and control
/// characters.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, ScopeTable};
    use crate::ErrorKind;

    #[test]
    fn test_new_has_root_only() {
        let table: ScopeTable<i32> = ScopeTable::new();

        assert_eq!(table.depth(), 1);
        assert!(table.frames().all(|frame| frame.is_empty()));
    }

    #[test]
    fn test_exit_root_is_error() {
        let mut table: ScopeTable<i32> = ScopeTable::new();
        table.declare_must("a", 1);
        let result = table.exit_scope();

        assert_eq!(
            result.unwrap_err().kind(),
            ErrorKind::InvalidScopeOperation
        );
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup("a"), Ok(&1));
    }

    #[test]
    fn test_exit_returns_frame() {
        let mut table = ScopeTable::new();
        table.enter_scope();
        table.declare_must("local", 5);
        let frame = table.exit_scope().unwrap();

        assert_eq!(frame.get("local"), Some(&5));
        assert_eq!(table.depth(), 1);
    }

    #[test]
    fn test_exited_names_unresolvable() {
        let mut table = ScopeTable::new();
        table.enter_scope();
        table.declare_must("x", 1);
        table.enter_scope();
        table.declare_must("y", 2);

        table.exit_scope().unwrap();
        assert_eq!(table.lookup("y").unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert_eq!(table.lookup("x"), Ok(&1));

        table.exit_scope().unwrap();
        assert_eq!(table.lookup("x").unwrap_err().kind(), ErrorKind::UndefinedVariable);
    }

    #[test]
    fn test_shadowing() {
        let mut table = ScopeTable::new();
        table.declare_must("x", "outer");
        table.enter_scope();
        table.declare_must("x", "inner");

        assert_eq!(table.lookup("x"), Ok(&"inner"));
        table.exit_scope().unwrap();
        assert_eq!(table.lookup("x"), Ok(&"outer"));
    }

    #[test]
    fn test_update_targets_declaring_scope() {
        let mut table = ScopeTable::new();
        table.declare_must("x", 1);
        table.enter_scope();

        assert_eq!(table.update("x", 2), Ok(1));
        assert!(!table.is_local("x"));
        table.exit_scope().unwrap();
        assert_eq!(table.lookup("x"), Ok(&2));
    }

    #[test]
    fn test_update_prefers_innermost() {
        let mut table = ScopeTable::new();
        table.declare_must("x", 1);
        table.enter_scope();
        table.declare_must("x", 10);
        table.enter_scope();
        table.update("x", 20).unwrap();
        table.exit_scope().unwrap();

        assert_eq!(table.lookup("x"), Ok(&20));
        table.exit_scope().unwrap();
        assert_eq!(table.lookup("x"), Ok(&1));
    }

    #[test]
    fn test_declare_never_affects_outer() {
        let mut table = ScopeTable::new();
        table.declare_must("y", 1);
        table.enter_scope();
        table.declare_must("y", 2);
        table.exit_scope().unwrap();

        assert_eq!(table.lookup("y"), Ok(&1));
    }

    #[test]
    fn test_redeclare_in_same_frame_overwrites() {
        let mut table = ScopeTable::new();
        table.declare_must("z", 1);
        table.declare_must("z", 2);

        assert_eq!(table.lookup("z"), Ok(&2));
        assert_eq!(table.frames().next().map(|frame| frame.len()), Some(1));
    }

    #[test]
    fn test_undefined_at_root() {
        let mut table: ScopeTable<i32> = ScopeTable::new();

        assert_eq!(table.lookup("nope").unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert_eq!(table.update("nope", 1).unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert_eq!(table.get("nope"), None);
    }

    #[test]
    fn test_undefined_when_nested() {
        let mut table = ScopeTable::new();
        table.declare_must("a", 1);
        table.enter_scope();
        table.declare_must("b", 2);
        table.enter_scope();

        assert_eq!(table.lookup("c").unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert_eq!(table.update("c", 3).unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert!(!table.contains("c"));
        assert!(table.frames().all(|frame| !frame.contains("c")));
    }

    #[test]
    fn test_undefined_error_names_variable() {
        let table: ScopeTable<i32> = ScopeTable::new();
        let error = table.lookup("count").unwrap_err();

        assert_eq!(
            error.help(),
            Some("`count` is not declared in any enclosing scope")
        );
    }

    #[test]
    fn test_scenario() {
        let mut table = ScopeTable::new();
        table.declare("a", 10).unwrap();
        table.enter_scope();
        table.declare("b", 20).unwrap();

        assert_eq!(table.lookup("a"), Ok(&10));
        assert_eq!(table.lookup("b"), Ok(&20));
        table.exit_scope().unwrap();

        assert_eq!(table.lookup("b").unwrap_err().kind(), ErrorKind::UndefinedVariable);
        assert_eq!(table.lookup("a"), Ok(&10));
    }

    #[test]
    fn test_invalid_names() {
        let mut table = ScopeTable::new();

        assert_eq!(table.declare("", 1).unwrap_err().kind(), ErrorKind::InvalidName);
        assert_eq!(table.declare("a b", 1).unwrap_err().kind(), ErrorKind::InvalidName);
        assert_eq!(table.declare("a\n", 1).unwrap_err().kind(), ErrorKind::InvalidName);
        assert!(table.frames().all(|frame| frame.is_empty()));
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("x"));
        assert!(is_valid_name("print_int"));
        assert!(is_valid_name("+"));
        assert!(is_valid_name("名前"));
        assert!(!is_valid_name("\t"));
    }

    #[test]
    #[should_panic]
    fn test_declare_must_invalid() {
        let mut table = ScopeTable::new();
        table.declare_must("", 1);
    }

    #[test]
    fn test_with_fluent() {
        let table = ScopeTable::new().with_must("one", 1).with_must("two", 2);

        assert_eq!(table.lookup("two"), Ok(&2));
        assert!(ScopeTable::new().with(" ", 1).is_err());
    }

    #[test]
    fn test_update_or_declare() {
        let mut table = ScopeTable::new();
        table.declare_must("x", 1);
        table.enter_scope();

        assert_eq!(table.update_or_declare("x", 2), Ok(Some(1)));
        assert_eq!(table.update_or_declare("y", 3), Ok(None));
        assert!(table.is_local("y"));
        table.exit_scope().unwrap();

        assert_eq!(table.lookup("x"), Ok(&2));
        assert!(!table.contains("y"));
    }

    #[test]
    fn test_get_mut() {
        let mut table = ScopeTable::new();
        table.declare_must("items", vec![1]);
        table.enter_scope();
        table.get_mut("items").unwrap().push(2);
        table.exit_scope().unwrap();

        assert_eq!(table.lookup("items"), Ok(&vec![1, 2]));
    }

    #[test]
    fn test_lookup_cloned() {
        let table = ScopeTable::new().with_must("name", String::from("taylor"));

        assert_eq!(table.lookup_cloned("name"), Ok(String::from("taylor")));
        assert!(table.lookup_cloned("other").is_err());
    }

    #[test]
    fn test_resolve_depth() {
        let mut table = ScopeTable::new();
        table.declare_must("a", 0);
        table.enter_scope();
        table.enter_scope();
        table.declare_must("b", 0);

        assert_eq!(table.depth(), 3);
        assert_eq!(table.resolve_depth("a"), Some(0));
        assert_eq!(table.resolve_depth("b"), Some(2));
        assert_eq!(table.resolve_depth("c"), None);
    }

    #[test]
    fn test_scoped_pairs_enter_and_exit() {
        let mut table = ScopeTable::new();
        table.declare_must("x", 1);

        let result: Result<i32, _> = table.scoped(|table| {
            table.declare_must("tmp", 5);
            table.enter_scope();
            table.lookup("missing").copied()
        });

        assert!(result.is_err());
        assert_eq!(table.depth(), 1);
        assert!(!table.contains("tmp"));
        assert_eq!(table.lookup("x"), Ok(&1));
    }

    #[test]
    fn test_scoped_keeps_outer_depth() {
        let mut table: ScopeTable<i32> = ScopeTable::new();
        table.enter_scope();
        let depth = table.scoped(|table| table.depth());

        assert_eq!(depth, 3);
        assert_eq!(table.depth(), 2);
    }

    #[test]
    fn test_scoped_refuses_exiting_outer_scopes() {
        let mut table = ScopeTable::new();
        table.enter_scope();
        table.enter_scope();
        table.declare_must("kept", 1);

        let exits = table.scoped(|table| {
            table.enter_scope();
            let inner = table.exit_scope().map(|_| ());
            let opened = table.exit_scope().map(|_| ());
            let outer = table.exit_scope().map(|_| ());
            (inner, opened, outer)
        });

        assert_eq!(exits.0, Ok(()));
        assert_eq!(exits.1.unwrap_err().kind(), ErrorKind::InvalidScopeOperation);
        assert_eq!(exits.2.unwrap_err().kind(), ErrorKind::InvalidScopeOperation);
        assert_eq!(table.depth(), 3);
        assert_eq!(table.lookup("kept"), Ok(&1));
    }

    #[test]
    fn test_nested_scoped_restores_floor() {
        let mut table: ScopeTable<i32> = ScopeTable::new();
        table.scoped(|table| table.scoped(|table| table.enter_scope()));
        table.enter_scope();

        assert!(table.exit_scope().is_ok());
        assert_eq!(
            table.exit_scope().unwrap_err().kind(),
            ErrorKind::InvalidScopeOperation
        );
        assert_eq!(table.depth(), 1);
    }

    #[test]
    fn test_visible_skips_shadowed() {
        let mut table = ScopeTable::new();
        table.declare_must("a", 1);
        table.declare_must("b", 2);
        table.enter_scope();
        table.declare_must("a", 10);

        let mut visible: Vec<_> = table.visible().collect();
        visible.sort_unstable();

        assert_eq!(visible, [("a", &10), ("b", &2)]);
    }
}
