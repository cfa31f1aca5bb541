use crate::artifacts::ignore::pattern::extension_of;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileClass {
    Tracked,
    Ignored,
    Unmanaged,
}

/// One file found under the working root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the working root
    pub path: PathBuf,
    /// Literal final suffix of the name (`.log`, `~`), if any
    pub extension: Option<String>,
    pub class: FileClass,
}

impl FileEntry {
    pub fn new(path: PathBuf, class: FileClass) -> Self {
        let extension = extension_of(&path);
        FileEntry {
            path,
            extension,
            class,
        }
    }

    pub fn is_unmanaged(&self) -> bool {
        self.class == FileClass::Unmanaged
    }
}
