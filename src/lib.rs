//! vc - version control without the sharp edges
//!
//! A small command-line wrapper that drives git through a handful of
//! opinionated commands. The interesting part is `push`: every file git
//! neither tracks nor ignores is triaged interactively (add, ignore by path,
//! extension or folder, delete, or pass) before the commit.
//!
//! ## Layout
//!
//! - `areas`: the repository, working tree, ignore file and git collaborator
//! - `artifacts`: ignore patterns, scanning and the triage engine, free of I/O
//! - `commands`: the user-facing commands

pub mod areas;
pub mod artifacts;
pub mod commands;
