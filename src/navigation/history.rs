//! Navigation history with browser-style back/forward semantics

use crate::routing::Resolved;

/// Stack of visited locations plus a cursor
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Resolved>,
    cursor: Option<usize>,
}

impl History {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Record a new location, discarding any forward entries
    pub fn push(&mut self, entry: Resolved) -> &Resolved {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        self.cursor = Some(last);
        &self.entries[last]
    }

    pub fn current(&self) -> Option<&Resolved> {
        self.cursor.map(|i| &self.entries[i])
    }

    pub fn back(&mut self) -> Option<&Resolved> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        Some(&self.entries[cursor])
    }

    pub fn forward(&mut self) -> Option<&Resolved> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())? + 1;
        self.cursor = Some(cursor);
        Some(&self.entries[cursor])
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> Resolved {
        Resolved::not_found(path)
    }

    #[test]
    fn test_push_and_current() {
        let mut history = History::new();
        assert!(history.current().is_none());
        history.push(entry("/a"));
        history.push(entry("/b"));
        assert_eq!(history.current().unwrap().path, "/b");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new();
        history.push(entry("/a"));
        history.push(entry("/b"));
        history.push(entry("/c"));

        assert_eq!(history.back().unwrap().path, "/b");
        assert_eq!(history.back().unwrap().path, "/a");
        assert!(history.back().is_none());
        assert_eq!(history.current().unwrap().path, "/a");

        assert_eq!(history.forward().unwrap().path, "/b");
        assert_eq!(history.forward().unwrap().path, "/c");
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = History::new();
        history.push(entry("/a"));
        history.push(entry("/b"));
        history.back();
        history.push(entry("/c"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
        assert_eq!(history.back().unwrap().path, "/a");
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.back().is_none());
        assert!(history.forward().is_none());
    }
}
