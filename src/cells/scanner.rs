//! Cell Scanner
//!
//! Walks a document backwards and emits the runnable ranges ("lenses") for
//! every cell and block marker it finds.

use super::{classify, LineKind};
use crate::document::Document;
use crate::models::{Anchor, CellAction, CellRange, LineBound};

/// Accumulator threaded through the backward sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    /// End of the next range to be closed
    pub before_line: usize,
    /// End of the next `-- %{` block
    pub before_block: usize,
    /// Number of markers seen so far
    pub cell_count: usize,
    /// Ranges in emission order
    pub ranges: Vec<CellRange>,
}

impl ScanState {
    /// Initial state for a document of `line_count` lines
    pub fn new(line_count: usize) -> Self {
        Self {
            before_line: line_count,
            before_block: line_count,
            cell_count: 0,
            ranges: Vec::new(),
        }
    }

    /// Fold one line (visited from last to first) into the state
    pub fn step(mut self, line_idx: usize, kind: LineKind) -> Self {
        match kind {
            LineKind::CellStart => {
                self.emit(
                    CellAction::RunCell,
                    Anchor::new(line_idx, self.before_line),
                    line_idx + 1,
                    self.before_line.into(),
                );
                self.emit_surrounding(line_idx);
                self.close_cell(line_idx);
            }
            LineKind::DummyCell => self.close_cell(line_idx),
            LineKind::BlockStart => {
                self.emit(
                    CellAction::RunBlock,
                    Anchor::line(line_idx),
                    line_idx,
                    self.before_block.into(),
                );
                self.emit_surrounding(line_idx);
                self.close_cell(line_idx);
            }
            LineKind::BlockEnd => {
                self.before_block = line_idx;
                self.emit(
                    CellAction::RunRest,
                    Anchor::line(line_idx),
                    self.before_block,
                    LineBound::End,
                );
                self.close_cell(line_idx);
            }
            _ => {}
        }
        self
    }

    /// Emit the trailing leading-material actions and return the ranges
    pub fn finish(mut self) -> Vec<CellRange> {
        if self.cell_count > 0 && self.before_line > 0 {
            self.emit(
                CellAction::RunCell,
                Anchor::new(0, self.before_line),
                0,
                self.before_line.into(),
            );
            self.emit(CellAction::RunAll, Anchor::new(0, 0), 0, LineBound::End);
        }
        self.ranges
    }

    fn emit(&mut self, action: CellAction, anchor: Anchor, since: usize, before: LineBound) {
        self.ranges.push(CellRange::new(action, anchor, since, before));
    }

    /// `Run Above` / `Run Below` for markers past the first line,
    /// `Run All` for a marker on the first line
    fn emit_surrounding(&mut self, line_idx: usize) {
        if line_idx > 0 {
            self.emit(CellAction::RunAbove, Anchor::line(line_idx), 0, line_idx.into());
            self.emit(
                CellAction::RunBelow,
                Anchor::line(line_idx),
                line_idx + 1,
                LineBound::End,
            );
        } else {
            self.emit(CellAction::RunAll, Anchor::new(0, 0), 0, LineBound::End);
        }
    }

    fn close_cell(&mut self, line_idx: usize) {
        self.before_line = line_idx;
        self.cell_count += 1;
    }
}

/// Discover every runnable range in a document.
///
/// A document without markers yields no ranges at all.
pub fn scan<D: Document + ?Sized>(document: &D) -> Vec<CellRange> {
    let line_count = document.line_count();
    let ranges = (0..line_count)
        .rev()
        .fold(ScanState::new(line_count), |state, idx| {
            state.step(idx, classify(&document.line_at(idx)))
        })
        .finish();
    trace!("Scanned {} lines into {} ranges", line_count, ranges.len());
    ranges
}
