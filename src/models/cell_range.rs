//! Cell Range Model
//!
//! A cell range is one actionable suggestion produced by the scanner:
//! a half-open line interval plus the action the UI offers for it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Action label attached to a cell range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellAction {
    /// Run the body of one cell
    #[serde(rename = "Run Cell")]
    RunCell,
    /// Run everything above a marker
    #[serde(rename = "Run Above")]
    RunAbove,
    /// Run everything below a marker
    #[serde(rename = "Run Below")]
    RunBelow,
    /// Run the whole document
    #[serde(rename = "Run All")]
    RunAll,
    /// Run an explicit `-- %{` block
    #[serde(rename = "Run Block")]
    RunBlock,
    /// Run from a `-- %}` marker to the end
    #[serde(rename = "Run Rest")]
    RunRest,
}

impl CellAction {
    /// Title shown on the lens
    pub fn title(&self) -> &'static str {
        match self {
            CellAction::RunCell => "Run Cell",
            CellAction::RunAbove => "Run Above",
            CellAction::RunBelow => "Run Below",
            CellAction::RunAll => "Run All",
            CellAction::RunBlock => "Run Block",
            CellAction::RunRest => "Run Rest",
        }
    }
}

impl fmt::Display for CellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Exclusive end of a line range.
///
/// `End` is resolved lazily to the document's line count when the range is
/// composed, and travels as `-1` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBound {
    /// A concrete line index
    Line(usize),
    /// End of document
    End,
}

impl LineBound {
    /// Resolve against a document of `line_count` lines
    pub fn resolve(self, line_count: usize) -> usize {
        match self {
            LineBound::Line(idx) => idx.min(line_count),
            LineBound::End => line_count,
        }
    }

    /// Wire form, `-1` for end of document
    pub fn as_i64(self) -> i64 {
        match self {
            LineBound::Line(idx) => idx as i64,
            LineBound::End => -1,
        }
    }

    /// Parse the wire form; any negative value means end of document
    pub fn from_i64(value: i64) -> Self {
        if value < 0 {
            LineBound::End
        } else {
            LineBound::Line(value as usize)
        }
    }
}

impl From<usize> for LineBound {
    fn from(idx: usize) -> Self {
        LineBound::Line(idx)
    }
}

impl fmt::Display for LineBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineBound::Line(idx) => write!(f, "{}", idx),
            LineBound::End => f.write_str("end"),
        }
    }
}

impl Serialize for LineBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for LineBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(LineBound::from_i64)
    }
}

/// Where a lens is displayed, as a `[start, end)` line span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub start: usize,
    pub end: usize,
}

impl Anchor {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Anchor on a single marker line
    pub fn line(idx: usize) -> Self {
        Self::new(idx, idx + 1)
    }
}

/// One "run this range" suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    /// Suggested action
    pub action: CellAction,
    /// Where the UI shows the action
    pub anchor: Anchor,
    /// First line to send
    pub since: usize,
    /// Exclusive end of the lines to send
    pub before: LineBound,
}

impl CellRange {
    pub fn new(action: CellAction, anchor: Anchor, since: usize, before: LineBound) -> Self {
        Self {
            action,
            anchor,
            since,
            before,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}) @{}",
            self.action, self.since, self.before, self.anchor.start
        )
    }
}
