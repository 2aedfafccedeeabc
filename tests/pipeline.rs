use std::fs::File;
use std::path::{Path, PathBuf};

use minish::exec::{ExitSignal, Executor, Input, Output, Streams};
use minish::history::HistoryStore;
use minish::parse::parse;
use tempfile::TempDir;

/// Result of running one line with stdout and stderr captured to files.
struct Outcome {
    signal: ExitSignal,
    stdout: String,
    stderr: String,
}

fn capture(dir: &Path, name: &str) -> (PathBuf, Output) {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    (path, Output::File(file))
}

fn run_in(dir: &TempDir, history: &mut HistoryStore, line: &str) -> Outcome {
    let (out_path, stdout) = capture(dir.path(), ".stdout");
    let (err_path, stderr) = capture(dir.path(), ".stderr");
    let streams = Streams {
        stdin: Input::File(File::open("/dev/null").unwrap()),
        stdout,
        stderr,
    };
    let pipeline = parse(line).unwrap_or_else(|e| panic!("parse failed for {line:?}: {e}"));
    let signal = Executor::default().execute_with(&pipeline, history, streams);
    Outcome {
        signal,
        stdout: std::fs::read_to_string(out_path).unwrap(),
        stderr: std::fs::read_to_string(err_path).unwrap(),
    }
}

fn run(line: &str) -> Outcome {
    let dir = tempfile::tempdir().unwrap();
    run_in(&dir, &mut HistoryStore::new(), line)
}

fn entries(history: &HistoryStore) -> Vec<String> {
    history.list(None).map(ToString::to_string).collect()
}

// ── External commands ──

#[test]
fn external_command_output() {
    let outcome = run("printf abc");
    assert_eq!(outcome.signal, ExitSignal::Continue);
    assert_eq!(outcome.stdout, "abc");
}

#[test]
fn command_not_found() {
    let outcome = run("definitely-not-a-command-xyz arg");
    assert_eq!(outcome.signal, ExitSignal::Continue);
    assert_eq!(
        outcome.stderr,
        "definitely-not-a-command-xyz: command not found\n"
    );
    assert!(outcome.stdout.is_empty());
}

// ── Pipes ──

#[test]
fn builtin_into_external() {
    assert_eq!(run("echo hello | cat").stdout, "hello\n");
}

#[test]
fn external_into_external() {
    assert_eq!(run("printf 'b\\na\\n' | sort").stdout, "a\nb\n");
}

#[test]
fn three_stage_pipeline() {
    let outcome = run("echo hello | cat | wc -c");
    assert_eq!(outcome.stdout.trim(), "6");
}

#[test]
fn builtin_as_last_stage_ignores_input() {
    assert_eq!(run("printf ignored | echo done").stdout, "done\n");
}

#[test]
fn missing_command_mid_pipeline_closes_pipe() {
    let outcome = run("echo hi | no-such-filter-xyz | wc -c");
    assert_eq!(outcome.stdout.trim(), "0");
    assert!(outcome.stderr.contains("no-such-filter-xyz: command not found"));
}

// ── Redirection ──

#[test]
fn stdout_truncate_then_append() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.txt");
    let mut history = HistoryStore::new();

    let outcome = run_in(&dir, &mut history, &format!("echo one > {}", target.display()));
    assert!(outcome.stdout.is_empty());
    run_in(&dir, &mut history, &format!("echo two >> {}", target.display()));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "one\ntwo\n");

    run_in(&dir, &mut history, &format!("echo three 1> {}", target.display()));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "three\n");
}

#[test]
fn stderr_redirect_captures_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("err.txt");
    let line = format!("ls /definitely/not/here 2> {}", target.display());
    let outcome = run_in(&dir, &mut HistoryStore::new(), &line);
    assert!(outcome.stderr.is_empty());
    assert!(!std::fs::read_to_string(&target).unwrap().is_empty());
}

#[test]
fn builtin_stderr_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("err.txt");
    let line = format!("type 2> {}", target.display());
    run_in(&dir, &mut HistoryStore::new(), &line);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "type: missing argument\n"
    );
}

#[test]
fn stdin_redirect_single_stage() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.txt");
    std::fs::write(&source, "c\na\nb\n").unwrap();
    let outcome = run_in(
        &dir,
        &mut HistoryStore::new(),
        &format!("sort < {}", source.display()),
    );
    assert_eq!(outcome.stdout, "a\nb\nc\n");
}

#[test]
fn stdin_redirect_replaces_pipe_into_last_stage() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.txt");
    std::fs::write(&source, "from-file\n").unwrap();
    let line = format!("echo from-pipe | cat < {}", source.display());
    let outcome = run_in(&dir, &mut HistoryStore::new(), &line);
    assert_eq!(outcome.stdout, "from-file\n");
    assert!(outcome.stderr.is_empty(), "stderr: {:?}", outcome.stderr);
}

#[test]
fn stdin_redirect_with_external_producer() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.txt");
    std::fs::write(&source, "c\na\nb\n").unwrap();
    let line = format!("printf ignored | sort < {}", source.display());
    let outcome = run_in(&dir, &mut HistoryStore::new(), &line);
    assert_eq!(outcome.stdout, "a\nb\nc\n");
}

#[test]
fn redirect_to_last_stage_of_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("count.txt");
    let line = format!("echo hello | wc -c > {}", target.display());
    let outcome = run_in(&dir, &mut HistoryStore::new(), &line);
    assert!(outcome.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&target).unwrap().trim(), "6");
}

#[test]
fn unopenable_target_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new();
    let line = format!("echo hi > {}/missing/out.txt", dir.path().display());
    let outcome = run_in(&dir, &mut history, &line);
    assert_eq!(outcome.signal, ExitSignal::Continue);
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.starts_with("minish: "), "stderr: {:?}", outcome.stderr);
    // The attempt is still recorded.
    assert_eq!(entries(&history), vec!["echo hi"]);
}

// ── History interaction ──

#[test]
fn pipeline_records_first_stage_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new();
    run_in(&dir, &mut history, "echo a b | wc -c");
    assert_eq!(entries(&history), vec!["echo a b"]);
}

#[test]
fn exit_is_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new();
    run_in(&dir, &mut history, "echo before");
    let outcome = run_in(&dir, &mut history, "exit 7");
    assert_eq!(outcome.signal, ExitSignal::Exit(7));
    assert_eq!(entries(&history), vec!["echo before"]);
}

#[test]
fn history_builtin_sees_itself_afterwards() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new();
    run_in(&dir, &mut history, "echo one");
    let first = run_in(&dir, &mut history, "history");
    assert_eq!(first.stdout, "    1  echo one\n");
    let second = run_in(&dir, &mut history, "history");
    assert_eq!(second.stdout, "    1  echo one\n    2  history\n");
}

#[test]
fn type_reports_without_touching_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new();
    let first = run_in(&dir, &mut history, "type echo");
    let second = run_in(&dir, &mut history, "type echo");
    assert_eq!(first.stdout, "echo is a shell builtin\n");
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(entries(&history), vec!["type echo", "type echo"]);
}
