use std::path::PathBuf;
use thiserror::Error;

/// Failures the triage workflow and its collaborators distinguish between.
///
/// Most call sites carry these inside `anyhow::Error`; the triage engine
/// downcasts where a variant is recoverable.
#[derive(Error, Debug)]
pub enum VcError {
    /// The operator typed something that is not a valid response.
    #[error("unrecognized response {0:?}")]
    InvalidInput(String),
    /// The operator answered "no" to a confirmation.
    #[error("{0} was not confirmed")]
    ConfirmationDeclined(String),
    /// A file could not be removed or copied.
    #[error("cannot access {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The version control tool exited unsuccessfully; `stderr` is its own diagnostic.
    #[error("`{command}` failed ({status}){}", if stderr.is_empty() { String::new() } else { format!(":\n{stderr}") })]
    Subprocess {
        command: String,
        status: String,
        stderr: String,
    },
    /// The ignore file could not be written.
    #[error("cannot save ignore list to {}: {source}", path.display())]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Standard input was closed while a prompt was waiting for an answer.
    #[error("input closed while waiting for a response")]
    InputClosed,
    #[error("not inside a git working tree: {0}")]
    NotARepository(String),
}
