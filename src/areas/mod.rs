//! Core repository components
//!
//! This module contains the pieces that touch the outside world:
//!
//! - `ignore_file`: the `.gitignore` file holding the ignore list
//! - `repository`: coordination of one working tree for a command
//! - `vcs`: the git collaborator
//! - `workspace`: working directory file system operations

pub mod ignore_file;
pub mod repository;
pub mod vcs;
pub mod workspace;
