use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ENTRIES;
use crate::error::WheelError;
use crate::validation::validate_entry;

/// A single selectable label on the wheel, e.g. a wallet address.
///
/// Always trimmed and non-empty. Two entries with the same text are still two
/// separate segments; each copy can win once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(String);

pub type EntryList = Vec<Entry>;

impl Entry {
    pub fn new(raw: &str) -> Result<Self, WheelError> {
        let trimmed = raw.trim();
        validate_entry(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits raw textarea input into entries: one per line, trimmed, blank lines
/// dropped. Fails with `EmptyEntries` when nothing is left.
pub fn regenerate(raw_text: &str) -> Result<EntryList, WheelError> {
    let entries: EntryList = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Entry(line.to_string()))
        .collect();

    if entries.is_empty() {
        return Err(WheelError::EmptyEntries);
    }
    Ok(entries)
}

pub fn default_entries() -> EntryList {
    DEFAULT_ENTRIES
        .iter()
        .map(|label| Entry(label.to_string()))
        .collect()
}

/// Inverse of `regenerate`, used to fill the textarea.
pub fn entries_to_text(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(Entry::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::as_str).collect()
    }

    #[test]
    fn test_regenerate_strips_blank_lines_and_whitespace() {
        let entries = regenerate("  alice \n\n\tbob\r\n   \ncarol").unwrap();
        assert_eq!(labels(&entries), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_regenerate_keeps_duplicates() {
        let entries = regenerate("a\na\nb").unwrap();
        assert_eq!(labels(&entries), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_regenerate_rejects_empty_input() {
        assert_eq!(regenerate(""), Err(WheelError::EmptyEntries));
        assert_eq!(regenerate("  \n\t\n \r\n"), Err(WheelError::EmptyEntries));
    }

    #[test]
    fn test_entry_new_trims() {
        assert_eq!(Entry::new("  0xdead  ").unwrap().as_str(), "0xdead");
        assert!(matches!(Entry::new("   "), Err(WheelError::Validation(_))));
    }

    #[test]
    fn test_entries_to_text_round_trips_defaults() {
        let text = entries_to_text(&default_entries());
        assert_eq!(regenerate(&text).unwrap(), default_entries());
    }
}
