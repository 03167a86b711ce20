use super::{Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{Debug, Display, Formatter, Result};

/// The category of an [`Error`].
///
/// Hosts match on this to decide whether a failure is fatal, recoverable,
/// or should fall back to a default.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// A name was looked up or updated, but no active scope declares it.
    UndefinedVariable,
    /// A scope was exited that must stay: the root, or a scope outside a
    /// `scoped` block.
    InvalidScopeOperation,
    /// A name was empty or contained whitespace or control characters.
    InvalidName,
    /// A value could not be converted to or from JSON.
    Serialization,
    /// The compile service answered with an error payload.
    Service,
}

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// # Examples
///
/// Attaching a source location to an undefined variable reported by a
/// [`ScopeTable`][`crate::ScopeTable`]:
///
/// ```
/// use symtab::{ErrorKind, ScopeTable};
///
/// let source = "var x = y + 1";
/// let table: ScopeTable<i64> = ScopeTable::new();
///
/// let error = table
///     .lookup("y")
///     .unwrap_err()
///     .with_pointer(source, 8..9)
///     .with_name("main.src");
///
/// assert_eq!(error.kind(), ErrorKind::UndefinedVariable);
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: undefined variable
///   --> main.src:1:9
///    |
///  1 | var x = y + 1
///    |         ^--
///    |
///   = help: `y` is not declared in any enclosing scope
/// ```
pub struct Error {
    /// Category of the [`Error`].
    kind: ErrorKind,
    /// Describes the cause of the [`Error`].
    reason: String,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The name of the source text that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] of the given kind with the given reason text.
    ///
    /// The additional fields may be populated using the various methods
    /// defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::{Error, ErrorKind};
    ///
    /// Error::build(ErrorKind::InvalidName, "invalid name")
    ///     .with_help("names must not be empty");
    /// ```
    pub fn build<T>(kind: ErrorKind, reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            kind,
            reason: reason.into(),
            name: None,
            visual: None,
            help: None,
        }
    }

    /// Set the reason text, which is a short summary of the [`Error`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = text.into();

        self
    }

    /// Set the name text, which is the name of the source (a file, a REPL
    /// line) that the [`Error`] is related to.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`].
    ///
    /// This is a shortcut for `error.with_visual(Pointer::new(source, region))`.
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        self.visual = Some(Box::new(Pointer::new(source, region.into())));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the [`ErrorKind`] of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the reason text.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    #[inline]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the name of the source that the error is related to.
    #[inline]
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("reason", &self.reason)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()?;

        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if !f.alternate() {
            return Ok(());
        }

        match &self.visual {
            Some(visual) => visual.display(f, self.name.as_deref(), self.help.as_deref()),
            None => match &self.help {
                Some(help) => writeln!(f, "\n  = help: {help}"),
                None => writeln!(f),
            },
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.reason == other.reason
            && self.help == other.help
            && self.name == other.name
    }
}

impl std::error::Error for Error {}
