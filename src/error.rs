//! Error types for the walker.
//!
//! None of these are fatal to a walk: each one is handed to the
//! [`ErrorReporter`](crate::walker::ErrorReporter) and traversal moves on.

use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Boxed error returned by a visitor.
pub type VisitorError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum WalkError {
    /// Metadata query on a root path failed (vanished, permission denied, invalid path)
    #[error("'{}': {source}", .path.display())]
    PathUnresolvable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory node could not be opened for enumeration
    #[error("cannot open directory '{}': {source}", .path.display())]
    DirectoryUnopenable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Enumeration failed before reaching the end of entries
    #[error("error reading directory '{}': {source}", .path.display())]
    DirectoryEnumerationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fallback `lstat` for an entry with an unknown type tag failed; the entry is still visited
    #[error("cannot determine type of '{}': {source}", .path.display())]
    ClassificationFallback {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The caller's visitor returned an error
    #[error("visitor aborted at '{}': {source}", .path.display())]
    VisitorAborted {
        path: PathBuf,
        #[source]
        source: VisitorError,
    },
}

impl WalkError {
    /// The path the failure is attached to.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::PathUnresolvable { path, .. }
            | WalkError::DirectoryUnopenable { path, .. }
            | WalkError::DirectoryEnumerationFailed { path, .. }
            | WalkError::ClassificationFallback { path, .. }
            | WalkError::VisitorAborted { path, .. } => path,
        }
    }
}

/// Result type alias for walker operations
pub type Result<T> = std::result::Result<T, WalkError>;
