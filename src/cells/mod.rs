//! Cell Segmentation
//!
//! Line classification shared by the [`scanner`] (which finds runnable
//! ranges) and the [`composer`] (which turns a range into GHCi input).
//!
//! Markers are line comments matched after stripping leading whitespace:
//!
//! | Marker  | Meaning                         |
//! |---------|---------------------------------|
//! | `-- %%` | cell boundary                   |
//! | `-- %-` | silent cell boundary            |
//! | `-- %{` | block start                     |
//! | `-- %}` | block end                       |
//! | `-- %:` | raw GHCi command (`-- %:load X`)|

pub mod composer;
pub mod scanner;

pub use composer::compose;
pub use scanner::scan;

use crate::document::Line;

/// Cell boundary marker
pub const CELL_START: &str = "-- %%";
/// Cell boundary that offers no action
pub const DUMMY_CELL: &str = "-- %-";
/// Start of an explicit block
pub const BLOCK_START: &str = "-- %{";
/// End of an explicit block
pub const BLOCK_END: &str = "-- %}";
/// Raw GHCi command line
pub const DIRECT_LINE: &str = "-- %:";
/// Prefix stripped from a direct line before sending
pub const MARKER_PREFIX: &str = "-- %";

/// Keywords whose declarations need their own `:{` / `:}` scope
pub const DECLARATION_KEYWORDS: [&str; 4] = ["class", "type", "data", "instance"];

/// GHCi multi-line input delimiters
pub const OPEN_DELIMITER: &str = ":{";
pub const CLOSE_DELIMITER: &str = ":}";

/// Classification of a single source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    CellStart,
    DummyCell,
    BlockStart,
    BlockEnd,
    DirectLine,
    DeclarationStart,
    TopLevel,
    Indented,
    Blank,
}

/// Classify a line by its leading-whitespace-trimmed text
pub fn classify(line: &Line<'_>) -> LineKind {
    if line.is_blank {
        return LineKind::Blank;
    }

    let text = line.trimmed();
    if text.starts_with(CELL_START) {
        LineKind::CellStart
    } else if text.starts_with(DUMMY_CELL) {
        LineKind::DummyCell
    } else if text.starts_with(BLOCK_START) {
        LineKind::BlockStart
    } else if text.starts_with(BLOCK_END) {
        LineKind::BlockEnd
    } else if text.starts_with(DIRECT_LINE) {
        LineKind::DirectLine
    } else if starts_with_declaration(text) {
        LineKind::DeclarationStart
    } else if line.is_top_level() {
        LineKind::TopLevel
    } else {
        LineKind::Indented
    }
}

/// Literal prefix match against [`DECLARATION_KEYWORDS`]
pub fn starts_with_declaration(text: &str) -> bool {
    DECLARATION_KEYWORDS
        .iter()
        .any(|keyword| text.starts_with(keyword))
}
