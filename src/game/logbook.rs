use serde::{Deserialize, Serialize};

/// Append-only record of everything narrated during the game.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Logbook {
    entries: Vec<String>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
