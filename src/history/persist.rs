//! Plain-text history files: one command per line, words separated by spaces.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::store::HistoryStore;
use crate::parse::Command;

/// Whether a save replaces the file or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Write every held entry, replacing the file.
    Truncate,
    /// Append only entries not yet flushed.
    Append,
}

/// Append each non-empty line of `path` to the store as a whitespace-split
/// command. Returns the number of entries read.
pub fn load(store: &mut HistoryStore, path: &Path) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        let words: Vec<String> = line.split_whitespace().map(String::from).collect();
        if let Some(cmd) = Command::from_words(words) {
            store.append(cmd);
            count += 1;
        }
    }
    log::debug!("loaded {count} history entries from {}", path.display());
    Ok(count)
}

/// Write entries to `path`, one space-joined line each, and mark them flushed.
pub fn save(store: &mut HistoryStore, path: &Path, mode: SaveMode) -> io::Result<()> {
    let file = match mode {
        SaveMode::Truncate => File::create(path)?,
        SaveMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
    };
    let mut out = BufWriter::new(file);
    match mode {
        SaveMode::Truncate => {
            for entry in store.list(None) {
                writeln!(out, "{entry}")?;
            }
        }
        SaveMode::Append => {
            for entry in store.unflushed() {
                writeln!(out, "{entry}")?;
            }
        }
    }
    out.flush()?;
    store.mark_flushed();
    Ok(())
}
