//! Command implementations
//!
//! Every command is an `impl Repository` block under `porcelain`; `main` picks
//! one from the parsed command line.

pub mod porcelain;
