//! Recursive filesystem tree walker.
//!
//! [`Walker::walk`] visits every entry reachable from a list of starting
//! paths exactly once, in pre-order, classifying each one as a [`NodeKind`]
//! and handing it to a caller-supplied visitor. Symlinks are reported, never
//! followed.

pub mod classify;
pub mod error;
pub mod fs;
pub mod node;
pub mod types;
pub mod walker;

pub use error::{VisitorError, WalkError};
pub use node::{Node, NodeKind};
pub use types::WalkStats;
pub use walker::{ErrorReporter, LogReporter, Visitor, Walker};
