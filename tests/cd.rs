//! `cd` changes the process-wide working directory, so every case lives in a
//! single test to keep them from racing each other.

use minish::commands::cd::Cd;
use minish::commands::{Builtin, BuiltinContext, BuiltinRegistry};
use minish::exec::{ExitSignal, SearchPath};
use minish::history::HistoryStore;

fn cd(args: &[&str], home: Option<&str>) -> String {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let registry = BuiltinRegistry::standard();
    let mut history = HistoryStore::new();
    let search_path = SearchPath::default();
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let mut ctx = BuiltinContext {
        stdout: &mut out,
        stderr: &mut err,
        history: &mut history,
        builtins: registry.names(),
        search_path: &search_path,
        home,
    };
    assert_eq!(Cd.run(&args, &mut ctx).unwrap(), ExitSignal::Continue);
    assert!(out.is_empty());
    String::from_utf8(err).unwrap()
}

fn cwd() -> std::path::PathBuf {
    std::env::current_dir().unwrap().canonicalize().unwrap()
}

#[test]
fn cd_changes_directory() {
    let root = tempfile::tempdir().unwrap();
    let root_path = root.path().canonicalize().unwrap();
    let home = root_path.join("home");
    let work = root_path.join("work");
    std::fs::create_dir_all(home.join("projects")).unwrap();
    std::fs::create_dir_all(&work).unwrap();
    let home_str = home.to_str().unwrap();

    // Absolute path
    assert_eq!(cd(&[work.to_str().unwrap()], Some(home_str)), "");
    assert_eq!(cwd(), work);

    // Relative path
    assert_eq!(cd(&[".."], Some(home_str)), "");
    assert_eq!(cwd(), root_path);

    // Tilde
    assert_eq!(cd(&["~"], Some(home_str)), "");
    assert_eq!(cwd(), home);
    assert_eq!(cd(&["~/projects"], Some(home_str)), "");
    assert_eq!(cwd(), home.join("projects"));

    // No argument goes home
    assert_eq!(cd(&[], Some(home_str)), "");
    assert_eq!(cwd(), home);

    // Missing directory leaves cwd alone
    assert_eq!(
        cd(&["/no/such/dir/xyz"], Some(home_str)),
        "cd: /no/such/dir/xyz: No such file or directory\n"
    );
    assert_eq!(cwd(), home);

    // A file is not a directory
    let file = root_path.join("plain.txt");
    std::fs::write(&file, "x").unwrap();
    let file_str = file.to_str().unwrap();
    assert_eq!(
        cd(&[file_str], Some(home_str)),
        format!("cd: {file_str}: Not a directory\n")
    );

    // No argument and no HOME
    assert_eq!(cd(&[], None), "cd: HOME not set\n");
    assert_eq!(cwd(), home);

    // Leave before the temp directory is removed.
    std::env::set_current_dir(std::env::temp_dir()).unwrap();
}
