//! Translates diff hunks into LSP text edits against the live buffer.
//!
//! One edit per hunk, in hunk order. Unified diffs guarantee hunks are
//! ascending and non-overlapping, so the host may apply the edits in any
//! order and ends up with exactly the formatter's output.

use tower_lsp::lsp_types::{Position, Range, TextEdit};

use crate::diff::Hunk;

/// Convert parsed hunks into replacement edits.
///
/// The replaced range covers `original_count` lines of the current document
/// starting at the zero-based `new_start - 1`; the replacement text is the
/// hunk's context and addition lines with prefixes stripped, joined with the
/// delimiter of the hunk's first line. Deletion lines never appear in the
/// output.
pub fn translate(hunks: &[Hunk]) -> Vec<TextEdit> {
    hunks.iter().map(translate_hunk).collect()
}

fn translate_hunk(hunk: &Hunk) -> TextEdit {
    let content: Vec<&str> = hunk
        .lines
        .iter()
        .filter(|line| !line.starts_with('-'))
        .map(|line| &line[1..])
        .collect();

    let delimiter = hunk
        .delimiters
        .first()
        .filter(|d| !d.is_empty())
        .map(String::as_str)
        .unwrap_or("\n");

    let start_line = hunk.new_start.saturating_sub(1);
    let start = Position {
        line: start_line,
        character: 0,
    };

    if hunk.original_count == 0 {
        // Pure insertion: zero-width range at the line start, trailing
        // delimiter so the existing line moves down instead of merging.
        let mut text = content.join(delimiter);
        text.push_str(delimiter);
        return TextEdit {
            range: Range { start, end: start },
            new_text: text,
        };
    }

    if content.is_empty() {
        // Pure deletion: extend through the start of the following line so
        // the removed lines take their terminators with them.
        return TextEdit {
            range: Range {
                start,
                end: Position {
                    line: start_line + hunk.original_count,
                    character: 0,
                },
            },
            new_text: String::new(),
        };
    }

    let last_line = content[content.len() - 1];
    let end = Position {
        line: start_line + hunk.original_count - 1,
        character: last_line.len() as u32,
    };

    TextEdit {
        range: Range { start, end },
        new_text: content.join(delimiter),
    }
}
