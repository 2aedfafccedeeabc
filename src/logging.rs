use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

/// Directory under `$HOME` that holds `minish.log`.
const LOG_DIR: &str = ".local/share/minish";

/// Route `log` records at or above `level` to ~/.local/share/minish/minish.log.
/// Best-effort: if the file can't be opened, logging stays off (logging must
/// never get between the user and the prompt).
pub fn init(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    let _ = init_at(&path, level);
}

/// Install the logger writing to `path`, creating parent directories.
pub fn init_at(path: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)?;
    Ok(())
}

fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(LOG_DIR).join("minish.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_at_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/minish.log");
        init_at(&path, LevelFilter::Info).unwrap();
        log::info!("logging smoke test");
        log::logger().flush();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("logging smoke test"));
    }
}
