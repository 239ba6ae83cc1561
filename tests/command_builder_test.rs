//! Command construction against the documented invocation template.

use jlfmt::command::{self, FormatCommand};
use jlfmt::config::{CompileMode, FormatOptions, ToolConfig};
use pretty_assertions::assert_eq;

#[test]
fn rendered_command_matches_template_after_normalization() {
    let config = ToolConfig::default();
    let options = FormatOptions {
        margin: 100,
        indent: 2,
        always_for_in: false,
        overwrite: false,
        whitespace_typedefs: true,
        whitespace_ops_in_indices: true,
    };
    let cmd = command::format_command("julia", "/work/demo.jl", &config, &options);

    let expected = "julia --compile=min -e 'using JuliaFormatter; \
                    format(\"/work/demo.jl\"; overwrite=false, indent=2, margin=100, \
                    always_for_in=false, whitespace_typedefs=true, whitespace_ops_in_indices=true)'";
    assert_eq!(
        command::normalize_whitespace(&cmd.to_command_line()),
        command::normalize_whitespace(expected)
    );
}

#[test]
fn named_arguments_keep_the_fixed_order() {
    let cmd = command::format_command(
        "julia",
        "a.jl",
        &ToolConfig::default(),
        &FormatOptions::default(),
    );
    let expr = &cmd.args[2];
    let positions: Vec<usize> = [
        "overwrite=",
        "indent=",
        "margin=",
        "always_for_in=",
        "whitespace_typedefs=",
        "whitespace_ops_in_indices=",
    ]
    .iter()
    .map(|name| expr.find(name).unwrap_or_else(|| panic!("missing {name}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "argument order drifted: {expr}");
}

#[test]
fn command_is_rebuilt_from_current_config() {
    // A config change between two requests must show up in the second
    // command; nothing is cached.
    let options = FormatOptions::default();
    let before = command::format_command("julia", "a.jl", &ToolConfig::default(), &options);

    let changed = ToolConfig {
        compile_mode: CompileMode::All,
        ..Default::default()
    };
    let after = command::format_command("julia", "a.jl", &changed, &options);

    assert_eq!(before.args[0], "--compile=min");
    assert_eq!(after.args[0], "--compile=all");
}

#[test]
fn spaces_in_document_paths_stay_inside_the_argument() {
    let cmd = command::format_command(
        "julia",
        "/home/user/My Files/demo.jl",
        &ToolConfig::default(),
        &FormatOptions::default(),
    );
    // argv form: the path lives inside a single argument regardless of
    // spaces, no shell splitting possible.
    assert_eq!(cmd.args.len(), 3);
    assert!(cmd.args[2].contains("format(\"/home/user/My Files/demo.jl\";"));
}

#[test]
fn command_line_rendering_quotes_spaced_arguments() {
    let cmd = FormatCommand {
        program: "julia".to_string(),
        args: vec!["-e".to_string(), "using Pkg; Pkg.status()".to_string()],
    };
    assert_eq!(cmd.to_command_line(), "julia -e 'using Pkg; Pkg.status()'");
}
