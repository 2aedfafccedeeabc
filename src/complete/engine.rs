use super::vocabulary::Vocabulary;

/// Outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing starts with the input.
    NoMatch,
    /// Exactly one candidate; the caller adds a trailing space.
    FullMatch(String),
    /// Several candidates share a prefix longer than the input.
    PartialMatch(String),
    /// Several candidates and no longer shared prefix.
    ///
    /// On the first press `listing` is `None` and `input` is returned
    /// unchanged; on a later press `listing` holds every candidate, sorted.
    MultipleMatch {
        input: String,
        listing: Option<Vec<String>>,
    },
}

/// Per-line Tab state: how many Tabs in a row were pressed on the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionState {
    candidate_prefix: String,
    tab_count: u32,
}

impl CompletionState {
    pub fn tab_count(&self) -> u32 {
        self.tab_count
    }

    /// Record a Tab press on `buffer` and return the running count.
    ///
    /// If the buffer changed since the previous press the count restarts.
    pub fn press(&mut self, buffer: &str) -> u32 {
        if self.candidate_prefix != buffer {
            self.candidate_prefix = buffer.to_string();
            self.tab_count = 0;
        }
        self.tab_count += 1;
        self.tab_count
    }

    pub fn reset(&mut self) {
        self.candidate_prefix.clear();
        self.tab_count = 0;
    }
}

/// Command-name completion over a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct CompletionEngine<V> {
    vocabulary: V,
}

impl<V: Vocabulary> CompletionEngine<V> {
    pub fn new(vocabulary: V) -> Self {
        Self { vocabulary }
    }

    /// Complete `partial` given how many times Tab has been pressed on it.
    pub fn complete(&self, partial: &str, tab_count: u32) -> Completion {
        let partial = partial.trim();
        if partial.is_empty() {
            return Completion::NoMatch;
        }

        let mut matches = prefixed(self.vocabulary.builtins(), partial);
        if matches.is_empty() {
            matches = prefixed(self.vocabulary.executables(), partial);
        }
        log::debug!(
            "completion for {partial:?} (tab {tab_count}): {} candidate(s)",
            matches.len()
        );

        match matches.len() {
            0 => Completion::NoMatch,
            1 => Completion::FullMatch(matches.swap_remove(0)),
            _ if tab_count <= 1 => {
                let prefix = longest_common_prefix(&matches);
                if prefix.len() > partial.len() {
                    Completion::PartialMatch(prefix)
                } else {
                    Completion::MultipleMatch {
                        input: partial.to_string(),
                        listing: None,
                    }
                }
            }
            _ => {
                matches.sort();
                Completion::MultipleMatch {
                    input: partial.to_string(),
                    listing: Some(matches),
                }
            }
        }
    }
}

fn prefixed(words: Vec<String>, prefix: &str) -> Vec<String> {
    words.into_iter().filter(|w| w.starts_with(prefix)).collect()
}

/// The longest string that every candidate starts with.
///
/// Seeded from the lexicographically last candidate and shortened at each
/// first mismatch; the result does not depend on input order.
pub fn longest_common_prefix(candidates: &[String]) -> String {
    let Some(seed) = candidates.iter().max() else {
        return String::new();
    };
    let mut prefix: &str = seed;
    for candidate in candidates {
        let common: usize = prefix
            .chars()
            .zip(candidate.chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        prefix = &prefix[..common];
    }
    prefix.to_string()
}
