//! Manual positional swap of two entries.

use crate::model::entry::HeatmapEntry;
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    EmptyFragment,
    /// Fragments that matched no entry, in argument order.
    NotFound { fragments: Vec<String> },
}

impl Display for SwapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFragment => write!(f, "word fragments cannot be empty"),
            Self::NotFound { fragments } => {
                let quoted: Vec<String> = fragments.iter().map(|word| format!("'{word}'")).collect();
                write!(f, "could not find entries containing {}", quoted.join(" and "))
            }
        }
    }
}

impl Error for SwapError {}

/// Word → position lookup with exact-first, substring-fallback resolution.
pub struct WordIndex<'a> {
    exact: HashMap<&'a str, usize>,
    words: Vec<&'a str>,
}

impl<'a> WordIndex<'a> {
    /// Indexes `entries`; for duplicate words the first position wins.
    pub fn new(entries: &'a [HeatmapEntry]) -> Self {
        let words: Vec<&str> = entries.iter().map(|entry| entry.word.as_str()).collect();
        let mut exact = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            exact.entry(*word).or_insert(position);
        }
        Self { exact, words }
    }

    /// Position of the entry whose word equals `fragment`, otherwise the
    /// first entry whose word contains it.
    pub fn resolve(&self, fragment: &str) -> Option<usize> {
        self.exact
            .get(fragment)
            .copied()
            .or_else(|| self.words.iter().position(|word| word.contains(fragment)))
    }
}

/// Swaps the entries matched by `first` and `second`.
///
/// Returns the two resolved positions. On error `entries` is untouched.
pub fn swap_entries(
    entries: &mut [HeatmapEntry],
    first: &str,
    second: &str,
) -> Result<(usize, usize), SwapError> {
    if first.is_empty() || second.is_empty() {
        return Err(SwapError::EmptyFragment);
    }

    let (first_position, second_position) = {
        let index = WordIndex::new(entries);
        (index.resolve(first), index.resolve(second))
    };

    match (first_position, second_position) {
        (Some(a), Some(b)) => {
            entries.swap(a, b);
            info!(
                "event=entry_swap module=transform status=ok first={} second={} positions={},{}",
                entries[b].word, entries[a].word, a, b
            );
            Ok((a, b))
        }
        _ => {
            let fragments = [(first, first_position), (second, second_position)]
                .into_iter()
                .filter(|(_, position)| position.is_none())
                .map(|(fragment, _)| fragment.to_string())
                .collect();
            Err(SwapError::NotFound { fragments })
        }
    }
}
