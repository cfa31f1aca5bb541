use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Snapshot of what the version control tool knows about the working tree.
///
/// All paths are relative to the working root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    /// Files the tool tracks
    pub tracked: BTreeSet<PathBuf>,
    /// Files the tool does not track and does not exclude by its own rules
    pub untracked: BTreeSet<PathBuf>,
}

impl WorkingTreeStatus {
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains(path)
    }

    pub fn is_untracked(&self, path: &Path) -> bool {
        self.untracked.contains(path)
    }
}
