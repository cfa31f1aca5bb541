//! Building blocks of the triage workflow, independent of the file system and git:
//!
//! - `core`: configuration, errors and path helpers
//! - `ignore`: ignore patterns and the ignore list
//! - `scan`: classification of working-tree files
//! - `triage`: the interactive resolution of unmanaged files

pub mod core;
pub mod ignore;
pub mod scan;
pub mod triage;
