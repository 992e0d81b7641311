use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

fn htmlnest_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_htmlnest"))
}

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn htmlnest(dir: &Path, args: &[&str]) -> Output {
    Command::new(htmlnest_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn check_clean_tree_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "index.html",
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body><p>Hi<br></p></body>\n</html>\n",
    );
    write(dir.path(), "partials/footer.html", "<footer><img src=\"a.png\"/></footer>\n");

    let output = htmlnest(dir.path(), &["check"]);

    assert!(
        output.status.success(),
        "Expected exit 0, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        stdout(&output),
        stderr(&output),
    );
    assert_eq!(stdout(&output), "No unclosed/mismatched tags found.\n");
}

#[test]
fn check_broken_tree_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.html", "<div>\n  <span>\n</div>\n");
    write(dir.path(), "a/page.html", "<p>text\n");
    write(dir.path(), "ok.html", "<p></p>\n");

    let output = htmlnest(dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "--- a/page.html ---\n\
         Unclosed <p> opened at (1, 0)\n\
         \n\
         --- b.html ---\n\
         Mismatched closing </div> at (3, 0), expected </span> from (2, 2)\n\
         Unclosed <div> opened at (1, 0)\n\
         \n"
    );
    assert!(
        stderr(&output).contains("Found 3 errors in 2 files."),
        "Expected summary on stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn check_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "site/page.html", "</p>\n");
    write(dir.path(), "drafts/wip.html", "<div>\n");

    let output = htmlnest(dir.path(), &["check", "site/"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "--- site/page.html ---\nUnexpected closing </p> at (1, 0)\n\n"
    );
}

#[test]
fn check_quiet_suppresses_summary() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.html", "<section>\n");

    let output = htmlnest(dir.path(), &["--quiet", "check"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Unclosed <section> opened at (1, 0)"));
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));
}

#[test]
fn check_parse_error_is_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.html", "<p>\n<!-- unterminated\n");
    std::fs::write(dir.path().join("b.html"), b"<p>caf\xe9</p>").unwrap();
    write(dir.path(), "c.html", "<p></p>\n");

    let output = htmlnest(dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("--- a.html ---\nUnclosed <p> opened at (1, 0)\n"));
    assert!(out.contains("--- b.html ---\nParse error: "));
    assert!(!out.contains("c.html"));
}

#[test]
fn check_stdin_detects_errors() {
    let dir = tempfile::tempdir().unwrap();

    let mut child = Command::new(htmlnest_binary())
        .args(["check", "--stdin"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<ul>\n<li>one</ul>\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "--- <stdin> ---\n\
         Mismatched closing </ul> at (2, 7), expected </li> from (2, 0)\n\
         Unclosed <ul> opened at (1, 0)\n\
         \n"
    );
}

#[test]
fn check_json_output() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.html", "<div><span></div>");

    let output = htmlnest(dir.path(), &["check", "--output-format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.trim_start().starts_with('['), "stdout: {out}");
    assert!(out.contains("\"path\": \"page.html\""));
    assert!(out.contains("\"code\": \"N101\""));
    assert!(out.contains("\"code\": \"N100\""));
}

#[test]
fn check_strict_self_closing_flag() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.html", "<div/>\n<br/>\n");

    let lenient = htmlnest(dir.path(), &["check"]);
    assert!(lenient.status.success());

    let strict = htmlnest(dir.path(), &["check", "--strict-self-closing"]);
    assert_eq!(strict.status.code(), Some(1));
    assert_eq!(
        stdout(&strict),
        "--- page.html ---\nSelf-closing non-void <div/> at (1, 0)\n\n"
    );
}

#[test]
fn check_uses_project_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "htmlnest.toml", "extensions = [\"htm\"]\n");
    write(dir.path(), "legacy.htm", "<table>\n");
    write(dir.path(), "modern.html", "<table>\n");

    let output = htmlnest(dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("--- legacy.htm ---"));
    assert!(!out.contains("modern.html"));
}

#[test]
fn check_invalid_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "htmlnest.toml", "hidden = not_a_boolean\n");
    write(dir.path(), "page.html", "<p></p>");

    let output = htmlnest(dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load settings"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn check_unquoted_href_ending_in_slash() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "nav.html",
        "<nav>\n  <a href=/>Home</a>\n  <a href=/blog/>Blog</a>\n</nav>\n",
    );

    let output = htmlnest(dir.path(), &["check"]);

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert_eq!(stdout(&output), "No unclosed/mismatched tags found.\n");
}

#[test]
fn check_empty_directory_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("templates")).unwrap();

    let output = htmlnest(dir.path(), &["check", "templates"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No unclosed/mismatched tags found.\n");
}
