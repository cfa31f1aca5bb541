//! Porcelain commands (user-facing operations)
//!
//! Each command is a thin sequence of git invocations around the working tree.
//!
//! ## Commands
//!
//! - `push`: back up, triage unmanaged files, commit, publish
//! - `pull`: bring in changes from the remote
//! - `checkout`: clone a remote repository
//! - `new`: create a repository and connect it to a new remote
//! - `info`: show remote, branch and status
//! - `mv`: move a tracked path

pub mod checkout;
pub mod info;
pub mod mv;
pub mod new;
pub mod pull;
pub mod push;
