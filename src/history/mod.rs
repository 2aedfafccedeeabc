pub mod persist;
pub mod store;

pub use persist::{SaveMode, load, save};
pub use store::{HISTORY_CAPACITY, HistoryEntry, HistoryStore};
