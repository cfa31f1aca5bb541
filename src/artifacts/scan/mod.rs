//! Working-tree classification
//!
//! - `file_entry`: one file and its classification
//! - `working_tree`: the status snapshot reported by the version control tool
//! - `scanner`: turns a file listing into classified entries

pub mod file_entry;
pub mod scanner;
pub mod working_tree;
