//! Current URL fragment with back/forward history.

/// Where the shareable fragment lives.
///
/// Fragments are stored without their leading `#`.
pub trait Location {
    /// Current fragment.
    fn fragment(&self) -> String;

    /// Replaces the current history entry.
    fn replace_fragment(&mut self, fragment: &str);

    /// Adds a new history entry, discarding any forward entries.
    fn push_fragment(&mut self, fragment: &str);

    /// Moves one entry back. Returns false at the start of history.
    fn back(&mut self) -> bool {
        false
    }

    /// Moves one entry forward. Returns false at the end of history.
    fn forward(&mut self) -> bool {
        false
    }
}

/// In-process location with browser-style history.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryLocation {
    /// Starts history at `fragment`.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            entries: vec![strip_hash(fragment).to_string()],
            cursor: 0,
        }
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.entries[self.cursor] = strip_hash(fragment).to_string();
    }

    fn push_fragment(&mut self, fragment: &str) {
        let fragment = strip_hash(fragment);
        if self.entries[self.cursor] == fragment {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Extracts the fragment from a full URL or a bare fragment.
///
/// `https://host/page#list=a` and `#list=a` both give `list=a`; text without
/// a `#` that looks like a URL has no fragment.
#[must_use]
pub fn fragment_of(link: &str) -> &str {
    let link = link.trim();
    match link.split_once('#') {
        Some((_, fragment)) => fragment,
        None if link.contains("://") => "",
        None => link,
    }
}
