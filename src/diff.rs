//! Parses the unified diff emitted by the formatter into structured hunks.
//!
//! Only a diff for a single file is expected; if the text describes more
//! than one file, everything from the second file header on is ignored.
//! Line delimiters are recorded per line so CRLF documents round-trip.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::FormatError;

/// One contiguous block of a unified diff.
///
/// `lines[i]` keeps its one-character prefix (`' '`, `'+'` or `'-'`);
/// `delimiters[i]` is the terminator that followed it in the diff text
/// (`"\n"`, `"\r\n"`, or `""` for an unterminated final line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub original_start: u32,
    pub original_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    pub lines: Vec<String>,
    pub delimiters: Vec<String>,
}

fn hunk_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
    })
}

/// Parse a unified diff into hunks.
///
/// Fails when no hunk header is found or when a hunk body ends before its
/// declared line counts are satisfied. An in-place formatter run produces
/// empty output, which lands in the no-hunks error rather than an empty
/// hunk list.
pub fn parse(diff: &str) -> Result<Vec<Hunk>, FormatError> {
    let lines = split_keeping_delimiters(diff);
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (content, _) = lines[i];

        if let Some(captures) = hunk_header_re().captures(content) {
            let original_start = parse_count(captures.get(1).map(|m| m.as_str()), 1)?;
            let original_count = parse_count(captures.get(2).map(|m| m.as_str()), 1)?;
            let new_start = parse_count(captures.get(3).map(|m| m.as_str()), 1)?;
            let new_count = parse_count(captures.get(4).map(|m| m.as_str()), 1)?;
            i += 1;

            let (body, consumed) =
                parse_hunk_body(&lines[i..], original_count, new_count)?;
            i += consumed;

            hunks.push(Hunk {
                original_start,
                original_count,
                new_start,
                new_count,
                lines: body.0,
                delimiters: body.1,
            });
            continue;
        }

        // A second file header after the first hunks means a multi-file
        // diff; only the first file is honored.
        if !hunks.is_empty() && (content.starts_with("--- ") || content.starts_with("diff ")) {
            log::warn!("diff describes more than one file; ignoring everything after the first");
            break;
        }

        // Preamble (diff/index/---/+++ lines) before the first hunk.
        i += 1;
    }

    if hunks.is_empty() {
        return Err(FormatError::PatchParse(
            "no hunks found in formatter output".to_string(),
        ));
    }
    Ok(hunks)
}

type HunkBody = (Vec<String>, Vec<String>);

/// Consume one hunk body, returning its lines and how many input lines were
/// used. Counting is driven by the header: context lines decrement both
/// sides, deletions the original side, additions the new side.
fn parse_hunk_body(
    lines: &[(&str, &str)],
    original_count: u32,
    new_count: u32,
) -> Result<(HunkBody, usize), FormatError> {
    let mut body_lines: Vec<String> = Vec::new();
    let mut delimiters: Vec<String> = Vec::new();
    let mut old_remaining = original_count;
    let mut new_remaining = new_count;
    let mut consumed = 0;

    while old_remaining > 0 || new_remaining > 0 {
        let Some(&(content, delimiter)) = lines.get(consumed) else {
            return Err(FormatError::PatchParse(format!(
                "hunk body ended early: {old_remaining} original and {new_remaining} new lines unaccounted for"
            )));
        };
        consumed += 1;

        if content.starts_with('\\') {
            // "\ No newline at end of file": the preceding line has no
            // terminator in the actual file.
            if let Some(last) = delimiters.last_mut() {
                last.clear();
            }
            continue;
        }

        // Some diff producers emit a bare empty line for empty context.
        let normalized = if content.is_empty() { " " } else { content };

        match normalized.as_bytes()[0] {
            b' ' => {
                old_remaining = decrement(old_remaining, "context")?;
                new_remaining = decrement(new_remaining, "context")?;
            }
            b'-' => old_remaining = decrement(old_remaining, "deletion")?,
            b'+' => new_remaining = decrement(new_remaining, "addition")?,
            _ => {
                return Err(FormatError::PatchParse(format!(
                    "unexpected line in hunk body: {content:?}"
                )));
            }
        }

        body_lines.push(normalized.to_string());
        delimiters.push(delimiter.to_string());
    }

    // A trailing no-newline marker can follow the last counted line.
    if let Some(&(content, _)) = lines.get(consumed)
        && content.starts_with('\\')
    {
        consumed += 1;
        if let Some(last) = delimiters.last_mut() {
            last.clear();
        }
    }

    Ok(((body_lines, delimiters), consumed))
}

fn decrement(remaining: u32, kind: &str) -> Result<u32, FormatError> {
    remaining.checked_sub(1).ok_or_else(|| {
        FormatError::PatchParse(format!("{kind} line exceeds the counts declared in the hunk header"))
    })
}

fn parse_count(text: Option<&str>, missing: u32) -> Result<u32, FormatError> {
    match text {
        None => Ok(missing),
        Some(digits) => digits
            .parse()
            .map_err(|_| FormatError::PatchParse(format!("bad line count {digits:?}"))),
    }
}

/// Split text into `(content, delimiter)` pairs, where the delimiter is the
/// exact terminator (`"\n"` or `"\r\n"`) following the content. A final
/// segment without a terminator gets `""`.
fn split_keeping_delimiters(text: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            if i > start && bytes[i - 1] == b'\r' {
                out.push((&text[start..i - 1], &text[i - 1..=i]));
            } else {
                out.push((&text[start..i], &text[i..=i]));
            }
            start = i + 1;
        }
    }
    if start < text.len() {
        out.push((&text[start..], ""));
    }
    out
}
