use crate::artifacts::ignore::pattern::IgnorePattern;
use std::collections::BTreeSet;
use std::path::Path;

/// Ordered, duplicate-free set of ignore patterns.
///
/// The list is a plain value: it is loaded from the ignore file, handed to the
/// scanner and the triage engine, and handed back with any new patterns.
/// Persisting additions is the caller's job (see `areas::ignore_file`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    patterns: Vec<IgnorePattern>,
    lines: BTreeSet<String>,
}

impl IgnoreList {
    pub fn parse(content: &str) -> Self {
        let mut list = IgnoreList::default();
        content
            .lines()
            .filter_map(IgnorePattern::parse)
            .for_each(|pattern| {
                list.insert(pattern);
            });
        list
    }

    /// Add `pattern`; returns `false` if an identical line is already present.
    pub fn insert(&mut self, pattern: IgnorePattern) -> bool {
        if !self.lines.insert(pattern.to_line()) {
            return false;
        }

        self.patterns.push(pattern);
        true
    }

    pub fn contains(&self, pattern: &IgnorePattern) -> bool {
        self.lines.contains(&pattern.to_line())
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &IgnorePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<IgnorePattern> for IgnoreList {
    fn from_iter<T: IntoIterator<Item = IgnorePattern>>(iter: T) -> Self {
        let mut list = IgnoreList::default();
        for pattern in iter {
            list.insert(pattern);
        }
        list
    }
}
