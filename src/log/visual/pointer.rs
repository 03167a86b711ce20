use std::{
    cmp::max,
    fmt::{Formatter, Result},
};

use super::{
    super::{RESET, YELLOW},
    {get_width, Visual, BLANK, EQUAL, HIGHLIGHT, PIPE},
};
use crate::region::Region;

/// A [`Visual`] that underlines a [`Region`] within one line of source text.
#[derive(Debug, PartialEq)]
pub struct Pointer {
    /// Zero indexed line of the start of the region.
    line: usize,
    /// Zero indexed display column of the start of the region.
    column: usize,
    /// Display width of the underline, at least one.
    length: usize,
    /// The full text of the line being pointed to.
    text: String,
}

impl Pointer {
    /// Create a new Pointer over the given source text and Region.
    ///
    /// A region reaching past the end of its line is cut at the line end, and
    /// a region outside of the source points just past the last character.
    pub fn new(source: &str, region: Region) -> Self {
        let begin = clamp_to_boundary(source, region.begin);
        let line_start = source[..begin].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[begin..]
            .find('\n')
            .map_or(source.len(), |i| begin + i);

        let line = source[..line_start].matches('\n').count();
        let column = get_width(&source[line_start..begin]);
        let end = clamp_to_boundary(source, region.end.max(begin)).min(line_end);
        let length = max(1, get_width(&source[begin..end]));

        Self {
            line,
            column,
            length,
            text: source[line_start..line_end].to_string(),
        }
    }
}

/// Move `offset` back until it lands on a char boundary within `source`.
fn clamp_to_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }

    offset
}

impl Visual for Pointer {
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        source_name: Option<&str>,
        help: Option<&str>,
    ) -> Result {
        let num = (self.line + 1).to_string();
        let col = self.column + 1;
        let pad = get_width(&num);
        let align = self.column + self.length;

        let extra = "-".repeat(3_usize.saturating_sub(self.length));
        let name = source_name.unwrap_or("?");
        let text = &self.text;
        let underline = HIGHLIGHT.repeat(self.length);

        write!(
            formatter,
            "\n {BLANK:pad$}--> {name}:{num}:{col}\
             \n {BLANK:pad$} {PIPE}\
             \n {num:>} {PIPE} {text}\
             \n {BLANK:pad$} {PIPE} {YELLOW}{underline:>align$}{RESET}{extra}\
             \n {BLANK:pad$} {PIPE}\n",
        )?;

        if let Some(help) = help {
            writeln!(formatter, "{BLANK:pad$} {EQUAL} help: {help}")?;
        }

        Ok(())
    }
}
