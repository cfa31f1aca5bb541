//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application:
//!
//! - `config`: settings read from the environment
//! - `error`: the failure taxonomy of the triage workflow

pub mod config;
pub mod error;

use std::path::{Component, Path};

/// Render a relative path with `/` separators, the form git and `.gitignore` use.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a relative path into its normal segments.
pub fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
