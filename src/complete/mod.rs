//! Tab completion of command names.

pub mod engine;
pub mod vocabulary;

pub use engine::{Completion, CompletionEngine, CompletionState, longest_common_prefix};
pub use vocabulary::{PathVocabulary, StaticVocabulary, Vocabulary};
