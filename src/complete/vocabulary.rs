use crate::exec::SearchPath;

/// Source of completion candidates.
///
/// Built-in names are tried first; executables are consulted only when no
/// built-in matches.
pub trait Vocabulary {
    fn builtins(&self) -> Vec<String>;
    fn executables(&self) -> Vec<String>;
}

/// Built-in names plus whatever is executable on `PATH` right now.
///
/// `PATH` is re-read and re-scanned on every call.
#[derive(Debug, Clone)]
pub struct PathVocabulary {
    builtins: Vec<String>,
    search_path: Option<SearchPath>,
}

impl PathVocabulary {
    pub fn new(builtins: Vec<String>) -> Self {
        Self {
            builtins,
            search_path: None,
        }
    }

    /// Scan a fixed list of directories instead of `PATH`.
    pub fn with_search_path(builtins: Vec<String>, search_path: SearchPath) -> Self {
        Self {
            builtins,
            search_path: Some(search_path),
        }
    }
}

impl Vocabulary for PathVocabulary {
    fn builtins(&self) -> Vec<String> {
        self.builtins.clone()
    }

    fn executables(&self) -> Vec<String> {
        match &self.search_path {
            Some(path) => path.executables(),
            None => SearchPath::from_env().executables(),
        }
    }
}

/// Fixed word lists.
#[derive(Debug, Clone, Default)]
pub struct StaticVocabulary {
    pub builtins: Vec<String>,
    pub executables: Vec<String>,
}

impl StaticVocabulary {
    pub fn new(builtins: &[&str], executables: &[&str]) -> Self {
        Self {
            builtins: builtins.iter().map(|s| s.to_string()).collect(),
            executables: executables.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Vocabulary for StaticVocabulary {
    fn builtins(&self) -> Vec<String> {
        self.builtins.clone()
    }

    fn executables(&self) -> Vec<String> {
        self.executables.clone()
    }
}
