//! Persistence of the ignore list
//!
//! The ignore list lives in the `.gitignore` file at the working root, so git
//! honors every decision made during triage. `vc` only ever appends to it:
//! lines it does not understand are left exactly as they are.
//!
//! ## Durability
//!
//! Each new pattern is appended and synced to disk as soon as it is chosen,
//! under an exclusive lock, so an interrupted push keeps earlier decisions.

use crate::artifacts::core::error::VcError;
use crate::artifacts::ignore::ignore_list::IgnoreList;
use crate::artifacts::ignore::pattern::IgnorePattern;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

pub const IGNORE_FILE_NAME: &str = ".gitignore";

#[derive(Debug, new)]
pub struct IgnoreFile {
    /// Path to the ignore file (typically `<root>/.gitignore`)
    path: Box<Path>,
}

impl IgnoreFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ignore list; a missing file is an empty list.
    pub fn load(&self) -> anyhow::Result<IgnoreList> {
        if !self.path.exists() {
            return Ok(IgnoreList::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ignore file: {:?}", self.path))?;
        let list = IgnoreList::parse(&content);
        debug!("loaded {} ignore patterns from {}", list.len(), self.path.display());

        Ok(list)
    }

    pub fn append(&self, pattern: &IgnorePattern) -> Result<(), VcError> {
        self.write_line(&pattern.to_line())
            .map_err(|source| VcError::PersistenceWrite {
                path: self.path.to_path_buf(),
                source,
            })
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;
        let file: &mut File = lock.deref_mut();

        let mut record = String::new();
        if !ends_with_newline(file)? {
            record.push('\n');
        }
        record.push_str(line);
        record.push('\n');

        file.write_all(record.as_bytes())?;
        file.sync_all()
    }
}

/// An empty file counts as terminated.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;

    Ok(last[0] == b'\n')
}
