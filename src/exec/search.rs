//! Command lookup along the `PATH` directories.

use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Ordered list of directories searched for external commands.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Read the current value of `PATH`. An unset `PATH` searches nothing.
    pub fn from_env() -> Self {
        std::env::var_os("PATH")
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }

    /// Split a path-separated list, dropping empty components.
    pub fn parse(value: &OsStr) -> Self {
        let dirs = std::env::split_paths(value)
            .filter(|d| !d.as_os_str().is_empty())
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Full path of the first executable named `name`, in directory order.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') {
            return None;
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    /// Names of every executable file in every directory, in directory order.
    ///
    /// Names found in more than one directory appear once per directory.
    pub fn executables(&self) -> Vec<String> {
        let mut names = Vec::new();
        for dir in &self.dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                if is_executable(&entry.path())
                    && let Some(name) = entry.file_name().to_str()
                {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// A regular file (after following symlinks) with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
