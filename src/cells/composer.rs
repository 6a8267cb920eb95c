//! Block Composer
//!
//! Turns a line range into the literal text GHCi should receive. GHCi only
//! accepts multi-line input between `:{` and `:}`, so declarations, indented
//! statement runs and explicit `-- %{` blocks get wrapped, while single
//! top-level lines pass through untouched.

use super::{
    classify, starts_with_declaration, LineKind, CLOSE_DELIMITER, MARKER_PREFIX, OPEN_DELIMITER,
};
use crate::document::Document;
use crate::models::LineBound;

/// Transcript under construction, tracking whether a `:{` is open
#[derive(Debug, Default)]
struct Transcript {
    text: String,
    in_block: bool,
}

impl Transcript {
    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Open a `:{` / `do` region unless one is already open, so
    /// consecutive statements share a single `do`
    fn ensure_in_do_block(&mut self) {
        if !self.in_block {
            self.push_line(OPEN_DELIMITER);
            self.push_line("do");
            self.in_block = true;
        }
    }

    /// Give the next unit a fresh `:{` scope of its own
    fn ensure_in_separate_block(&mut self) {
        if self.in_block {
            self.push_line(CLOSE_DELIMITER);
        }
        self.push_line(OPEN_DELIMITER);
        self.in_block = true;
    }

    fn ensure_out_of_block(&mut self) {
        if self.in_block {
            self.push_line(CLOSE_DELIMITER);
            self.in_block = false;
        }
    }

    fn finish(mut self) -> String {
        self.ensure_out_of_block();
        self.text
    }
}

/// Compose the GHCi transcript for lines `[since, before)`.
///
/// `LineBound::End` resolves to the document's line count. Returns `None`
/// when there is nothing to send.
pub fn compose<D: Document + ?Sized>(
    document: &D,
    since: usize,
    before: LineBound,
) -> Option<String> {
    let before = before.resolve(document.line_count());
    if since >= before {
        return None;
    }

    let mut transcript = Transcript::default();
    let mut line_idx = since;
    while line_idx < before {
        let line = document.line_at(line_idx);
        let kind = classify(&line);

        if kind == LineKind::Blank {
            transcript.text.push('\n');
        } else if kind == LineKind::BlockStart {
            // The block consumes the rest of the range verbatim
            transcript.ensure_in_separate_block();
            for rest_idx in line_idx + 1..before {
                transcript.push_line(document.line_at(rest_idx).text);
            }
            line_idx = before;
            continue;
        } else if kind == LineKind::DirectLine {
            transcript.ensure_out_of_block();
            transcript.push_line(&line.trimmed()[MARKER_PREFIX.len()..]);
        } else if starts_with_declaration(line.text) {
            transcript.ensure_in_separate_block();
            transcript.push_line(line.text);
        } else if line.is_top_level() {
            transcript.push_line(line.trimmed());
        } else {
            transcript.ensure_in_do_block();
            transcript.push_line(line.text);
        }
        line_idx += 1;
    }

    let text = transcript.finish();
    debug!(
        "Composed lines [{}, {}) into {} bytes",
        since,
        before,
        text.len()
    );
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
