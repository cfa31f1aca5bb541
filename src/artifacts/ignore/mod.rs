//! The ignore list
//!
//! Patterns that keep files out of version control, in the shapes git's own
//! `.gitignore` understands:
//!
//! - `pattern`: a single line (literal path, extension suffix, ancestor directory)
//! - `ignore_list`: the ordered, unique collection of patterns

pub mod ignore_list;
pub mod pattern;
