//! Property-based tests for the block composer
//!
//! Random Haskell-ish documents mixing markers, declarations, indented
//! statements and direct commands must always compose into a transcript
//! GHCi can parse.

use ghci_cells::{compose, LineBound, TextDocument};
use proptest::prelude::*;

fn haskell_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("-- %%".to_string()),
        Just("-- %- separator".to_string()),
        Just("-- %{".to_string()),
        Just("-- %}".to_string()),
        "-- %:[a-z]{1,8}",
        "  -- %:[a-z]{1,8}",
        "(data|type|class|instance) [A-Z][a-z]{0,6}",
        "[a-z][a-z0-9 =+()]{0,20}",
        "  [a-z][a-z0-9 =+()<-]{0,20}",
        "\t[a-z]{1,10}",
    ]
}

fn document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(haskell_line(), 0..40)
}

/// Walk the transcript, failing on unbalanced delimiters or on a direct
/// command emitted while a block is open
fn check_transcript(transcript: &str) -> Result<(), TestCaseError> {
    let mut open = false;
    for line in transcript.lines() {
        match line {
            ":{" => {
                prop_assert!(!open, "nested :{{ in {:?}", transcript);
                open = true;
            }
            ":}" => {
                prop_assert!(open, "stray :}} in {:?}", transcript);
                open = false;
            }
            direct if direct.starts_with(':') => {
                prop_assert!(!open, "direct line {:?} inside a block", direct);
            }
            _ => {}
        }
    }
    prop_assert!(!open, "unclosed block in {:?}", transcript);
    Ok(())
}

proptest! {
    #[test]
    fn test_whole_document_is_well_delimited(lines in document()) {
        let doc = TextDocument::from_lines(lines.iter().map(String::as_str));
        if let Some(text) = compose(&doc, 0, LineBound::End) {
            check_transcript(&text)?;
            prop_assert!(text.ends_with('\n'));
        } else {
            prop_assert!(lines.is_empty());
        }
    }

    #[test]
    fn test_any_range_is_well_delimited(
        lines in document(),
        a in 0usize..45,
        b in 0usize..45,
    ) {
        let doc = TextDocument::from_lines(lines.iter().map(String::as_str));
        let (since, before) = (a.min(b), a.max(b));
        match compose(&doc, since, LineBound::Line(before)) {
            Some(text) => check_transcript(&text)?,
            None => {
                prop_assert!(since >= before.min(lines.len()));
            }
        }
    }

    #[test]
    fn test_blank_lines_compose_to_newlines(blanks in prop::collection::vec("[ \t]{0,4}", 1..20)) {
        let doc = TextDocument::from_lines(blanks.iter().map(String::as_str));
        let text = compose(&doc, 0, LineBound::End).unwrap();
        prop_assert_eq!(text, "\n".repeat(blanks.len()));
    }

    #[test]
    fn test_top_level_lines_pass_through(
        lines in prop::collection::vec("[a-z][a-z0-9 =+]{0,20}", 1..20),
    ) {
        prop_assume!(lines.iter().all(|l| !["data", "type", "class", "instance"]
            .iter()
            .any(|kw| l.starts_with(kw))));
        let doc = TextDocument::from_lines(lines.iter().map(String::as_str));
        let expected: String = lines.iter().map(|l| format!("{}\n", l.trim_start())).collect();
        prop_assert_eq!(compose(&doc, 0, LineBound::End), Some(expected));
    }
}
