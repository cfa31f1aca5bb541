//! Unmanaged-file triage
//!
//! During a push every file git neither tracks nor ignores is offered to the
//! operator, one prompt at a time:
//!
//! - `disposition`: the possible answers and how keystrokes map to them
//! - `operator`: the prompt/answer surface
//! - `engine`: the queue that resolves and applies one disposition per file

pub mod disposition;
pub mod engine;
pub mod operator;
