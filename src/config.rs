use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_true")]
    pub bell: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            bell: true,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// History file; empty means fall back to `$HISTFILE`.
    #[serde(default)]
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            file: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub quote_aware_redirection: bool,
}

fn default_prompt() -> String {
    "$ ".into()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_capacity() -> usize {
    crate::history::HISTORY_CAPACITY
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    history: HistoryOverlay,
    #[serde(default)]
    parser: ParserOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    prompt: Option<String>,
    bell: Option<bool>,
    log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct HistoryOverlay {
    capacity: Option<usize>,
    file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ParserOverlay {
    quote_aware_redirection: Option<bool>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults with the user overlay from
    /// `~/.config/minish/config.toml` applied, if it exists and parses.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/minish/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("minish: config parse error: {e}");
                None
            }
        }
    }

    /// Scalars present in the overlay replace the current values.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.prompt {
            self.settings.prompt = v;
        }
        if let Some(v) = s.bell {
            self.settings.bell = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }

        let h = overlay.history;
        if let Some(v) = h.capacity {
            self.history.capacity = v;
        }
        if let Some(v) = h.file {
            self.history.file = v;
        }

        if let Some(v) = overlay.parser.quote_aware_redirection {
            self.parser.quote_aware_redirection = v;
        }
    }

    /// The configured history file, else `$HISTFILE`, else none.
    pub fn history_file(&self) -> Option<PathBuf> {
        if !self.history.file.is_empty() {
            let expanded = shellexpand::tilde(&self.history.file);
            return Some(PathBuf::from(expanded.as_ref()));
        }
        std::env::var_os("HISTFILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// The configured log level; unknown names fall back to `warn`.
    pub fn log_level(&self) -> log::LevelFilter {
        self.settings
            .log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }

    pub fn parse_options(&self) -> crate::parse::ParseOptions {
        crate::parse::ParseOptions {
            quote_aware_redirection: self.parser.quote_aware_redirection,
        }
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
