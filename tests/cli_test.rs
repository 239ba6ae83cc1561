//! CLI surface tests for the jlfmt binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("jlfmt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("which"));
}

#[test]
fn which_fails_cleanly_for_a_bad_override() {
    Command::cargo_bin("jlfmt")
        .unwrap()
        .args(["--quiet", "which", "--executable", "/nonexistent/julia"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not runnable"));
}

#[test]
fn fmt_rejects_an_unknown_compile_mode() {
    Command::cargo_bin("jlfmt")
        .unwrap()
        .args(["--quiet", "fmt", "x.jl", "--compile", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid compile mode"));
}

#[cfg(unix)]
mod with_fake_julia {
    use std::os::unix::fs::PermissionsExt;

    use super::*;
    use tempfile::TempDir;

    const DIFF: &str = "\
--- a/x.jl
+++ b/x.jl
@@ -1,1 +1,1 @@
-f(x)=x
+f(x) = x
";

    fn fake_julia(dir: &TempDir) -> String {
        let path = dir.path().join("julia");
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then exit 0; fi\nprintf '%s' '{DIFF}'"
        );
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn which_prints_the_validated_override() {
        let dir = TempDir::new().unwrap();
        let julia = fake_julia(&dir);
        Command::cargo_bin("jlfmt")
            .unwrap()
            .args(["--quiet", "which", "--executable", &julia])
            .assert()
            .success()
            .stdout(predicate::str::contains(&julia));
    }

    #[test]
    fn fmt_diff_prints_the_tool_output_unmodified() {
        let dir = TempDir::new().unwrap();
        let julia = fake_julia(&dir);
        Command::cargo_bin("jlfmt")
            .unwrap()
            .args(["--quiet", "fmt", "x.jl", "--diff", "--executable", &julia])
            .assert()
            .success()
            .stdout(predicate::eq(DIFF));
    }
}
