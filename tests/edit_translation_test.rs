//! Parser + translator behavior over realistic JuliaFormatter output.

use jlfmt::diff;
use jlfmt::edits;
use pretty_assertions::assert_eq;

const FORMATTER_OUTPUT: &str = "\
--- a/bench/runner.jl
+++ b/bench/runner.jl
@@ -4,7 +4,7 @@
 using Statistics

 function run_bench(n)
-    xs=rand(n)
+    xs = rand(n)
     total = 0.0
     for x in xs
         total += x
@@ -18,5 +18,7 @@
 end

 function main()
-    run_bench(10^6); println(\"done\")
+    run_bench(10^6)
+    println(\"done\")
+    nothing
 end
";

#[test]
fn one_edit_per_hunk_with_zero_based_starts() {
    let hunks = diff::parse(FORMATTER_OUTPUT).unwrap();
    let edits = edits::translate(&hunks);

    assert_eq!(hunks.len(), edits.len());
    for (hunk, edit) in hunks.iter().zip(&edits) {
        assert_eq!(edit.range.start.line, hunk.new_start - 1);
        assert_eq!(edit.range.start.character, 0);
    }
}

#[test]
fn no_deletion_prefixed_lines_survive_translation() {
    let hunks = diff::parse(FORMATTER_OUTPUT).unwrap();
    for edit in edits::translate(&hunks) {
        for line in edit.new_text.lines() {
            assert!(!line.starts_with("-    "), "deletion leaked: {line:?}");
        }
        assert!(!edit.new_text.contains("xs=rand"));
        assert!(!edit.new_text.contains("run_bench(10^6);"));
    }
}

#[test]
fn replacement_text_matches_context_plus_additions() {
    let hunks = diff::parse(FORMATTER_OUTPUT).unwrap();
    let edits = edits::translate(&hunks);

    assert_eq!(
        edits[0].new_text,
        "using Statistics\n\nfunction run_bench(n)\n    xs = rand(n)\n    total = 0.0\n    for x in xs\n        total += x"
    );
    assert_eq!(
        edits[1].new_text,
        "end\n\nfunction main()\n    run_bench(10^6)\n    println(\"done\")\n    nothing\nend"
    );
}

#[test]
fn ranges_span_the_original_line_counts() {
    let hunks = diff::parse(FORMATTER_OUTPUT).unwrap();
    let edits = edits::translate(&hunks);

    // Hunk 1: starts at line 4, covers 7 original lines.
    assert_eq!(edits[0].range.start.line, 3);
    assert_eq!(edits[0].range.end.line, 3 + 7 - 1);
    // Hunk 2: starts at line 18, covers 5 original lines.
    assert_eq!(edits[1].range.start.line, 17);
    assert_eq!(edits[1].range.end.line, 17 + 5 - 1);
}

#[test]
fn translating_twice_is_identical() {
    let hunks = diff::parse(FORMATTER_OUTPUT).unwrap();
    assert_eq!(edits::translate(&hunks), edits::translate(&hunks));
}

#[test]
fn crlf_documents_keep_their_delimiters() {
    let diff_text = "--- a/x.jl\r\n+++ b/x.jl\r\n@@ -1,2 +1,2 @@\r\n-f(x)=x\r\n+f(x) = x\r\n x\r\n";
    let hunks = diff::parse(diff_text).unwrap();
    let edits = edits::translate(&hunks);
    assert_eq!(edits[0].new_text, "f(x) = x\r\nx");
}

#[test]
fn applying_edits_reproduces_formatter_output() {
    let document = "\
function f(x)
  x+1
end
";
    let diff_text = "\
--- a/f.jl
+++ b/f.jl
@@ -1,3 +1,3 @@
 function f(x)
-  x+1
+    x + 1
 end
";
    let hunks = diff::parse(diff_text).unwrap();
    let edits = edits::translate(&hunks);
    assert_eq!(edits.len(), 1);

    // Apply the single edit by line/character arithmetic.
    let lines: Vec<&str> = document.lines().collect();
    let edit = &edits[0];
    let start = edit.range.start.line as usize;
    let end = edit.range.end.line as usize;
    let mut result = String::new();
    result.push_str(&lines[..start].join("\n"));
    if start > 0 {
        result.push('\n');
    }
    result.push_str(&edit.new_text);
    result.push_str(&lines[end][edit.range.end.character as usize..]);
    for line in &lines[end + 1..] {
        result.push('\n');
        result.push_str(line);
    }
    result.push('\n');

    assert_eq!(result, "function f(x)\n    x + 1\nend\n");
}
