//! Read-only document access
//!
//! The scanner and composer only ever look at a document through the
//! [`Document`] trait, so they can run against plain in-memory line arrays
//! as easily as against an editor buffer.

use std::path::Path;

use crate::error::Result;

/// A single line as seen by the segmentation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line text without its terminator
    pub text: &'a str,
    /// Byte column of the first non-whitespace character
    /// (equal to `text.len()` for blank lines)
    pub first_non_whitespace: usize,
    /// True when the line is empty or whitespace-only
    pub is_blank: bool,
}

impl<'a> Line<'a> {
    /// Build a line view from raw text
    pub fn new(text: &'a str) -> Self {
        let trimmed = text.trim_start();
        Self {
            text,
            first_non_whitespace: text.len() - trimmed.len(),
            is_blank: trimmed.is_empty(),
        }
    }

    /// Text with leading whitespace removed
    pub fn trimmed(&self) -> &'a str {
        &self.text[self.first_non_whitespace..]
    }

    /// Whether the line starts at column zero
    pub fn is_top_level(&self) -> bool {
        self.first_non_whitespace == 0
    }
}

/// Narrow read-only view of an editor document
pub trait Document {
    /// Number of lines; never zero for a real document
    fn line_count(&self) -> usize;

    /// Line at a zero-based index. Callers stay below `line_count()`.
    fn line_at(&self, index: usize) -> Line<'_>;

    /// Whole document text, lines joined by `\n`
    fn text(&self) -> String {
        let mut out = String::new();
        for idx in 0..self.line_count() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(self.line_at(idx).text);
        }
        out
    }

    /// Text covered by a selection, or an empty string for a collapsed one
    fn text_in(&self, selection: &Selection) -> String {
        let (start, end) = selection.ordered();
        let count = self.line_count();
        if count == 0 || start == end || start.line >= count {
            return String::new();
        }
        let end = if end.line >= count {
            Position::new(count - 1, usize::MAX)
        } else {
            end
        };

        let mut out = String::new();
        for idx in start.line..=end.line {
            let text = self.line_at(idx).text;
            let from = if idx == start.line {
                char_to_byte(text, start.character)
            } else {
                0
            };
            let to = if idx == end.line {
                char_to_byte(text, end.character)
            } else {
                text.len()
            };
            if idx > start.line {
                out.push('\n');
            }
            if from < to {
                out.push_str(&text[from..to]);
            }
        }
        out
    }
}

fn char_to_byte(text: &str, character: usize) -> usize {
    text.char_indices()
        .nth(character)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Zero-based line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// An editor selection between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Start and end in document order
    pub fn ordered(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// In-memory document backed by owned lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    /// Split text into lines the way an editor does: a trailing newline
    /// yields a final empty line and `\r\n` endings are stripped.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    /// Build a document from already separated lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a document from disk
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::from_text(&text))
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_at(&self, index: usize) -> Line<'_> {
        Line::new(&self.lines[index])
    }
}
