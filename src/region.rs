use std::ops::Range;

/// A byte range within source text, used to locate a diagnostic.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new Region from the given range.
    pub fn new(position: Range<usize>) -> Self {
        position.into()
    }

    /// Access the text covered by this [`Region`], if it lies on char
    /// boundaries within `source`.
    pub fn literal<'source>(&self, source: &'source str) -> Option<&'source str> {
        source.get(self.begin..self.end)
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}
