use crate::artifacts::ignore::ignore_list::IgnoreList;
use crate::artifacts::scan::file_entry::{FileClass, FileEntry};
use crate::artifacts::scan::working_tree::WorkingTreeStatus;
use derive_new::new;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Classifies a listing of working-tree files.
///
/// Classification order: an ignore-list match wins, then the tool's tracked
/// set, then its untracked set. A file in neither set is excluded by one of
/// git's own rules and counts as ignored.
#[derive(Debug, new)]
pub struct Scanner<'a> {
    ignore_list: &'a IgnoreList,
    status: &'a WorkingTreeStatus,
}

impl<'a> Scanner<'a> {
    pub fn classify(&self, path: &Path) -> FileClass {
        if self.ignore_list.matches(path) {
            FileClass::Ignored
        } else if self.status.is_tracked(path) {
            FileClass::Tracked
        } else if self.status.is_untracked(path) {
            FileClass::Unmanaged
        } else {
            FileClass::Ignored
        }
    }

    /// Classify `listing` lazily, in directory-then-name order.
    pub fn scan<I>(&self, listing: I) -> impl Iterator<Item = FileEntry> + use<'a, I>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut paths = listing.into_iter().collect::<Vec<_>>();
        paths.sort_by(|a, b| directory_then_name(a, b));
        paths.dedup();

        let ignore_list = self.ignore_list;
        let status = self.status;
        paths.into_iter().map(move |path| {
            let class = Scanner::new(ignore_list, status).classify(&path);
            FileEntry::new(path, class)
        })
    }
}

fn directory_then_name(a: &Path, b: &Path) -> Ordering {
    a.parent()
        .cmp(&b.parent())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}
