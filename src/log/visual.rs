mod pointer;

pub use pointer::Pointer;

use std::fmt::{Debug, Formatter, Result};

const BLANK: &str = "";
const PIPE: &str = "|";
const EQUAL: &str = "=";
const HIGHLIGHT: &str = "^";

/// Describes a type that can be attached to an [`Error`][`super::Error`]
/// and used to print a visualization of where it happened.
pub trait Visual: Debug {
    /// Display the visualization by writing to the given Formatter.
    ///
    /// `source_name` is the name of the source text, if known.
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        source_name: Option<&str>,
        help: Option<&str>,
    ) -> Result;
}

/// Display width of the given text.
fn get_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}
