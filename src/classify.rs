//! Node classification.
//!
//! Entries discovered through directory enumeration carry a `d_type` tag that
//! is usually enough to decide the kind. Some filesystems report `DT_UNKNOWN`
//! for everything, so an unknown tag triggers a second `lstat` on the full
//! path and the kind is taken from the mode bits instead. Classification
//! itself never fails: anything unresolvable becomes [`NodeKind::Unknown`],
//! and a failed fallback `lstat` is passed back for reporting.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::fs::Filesystem;
use crate::node::{Node, NodeKind};

/// BSD whiteout `d_type`; not every libc target defines it.
pub const DT_WHT: u8 = 14;

/// BSD whiteout file-type bits in `st_mode`.
pub const S_IFWHT: u32 = 0o160000;

const S_IFMT: u32 = libc::S_IFMT as u32;

/// Maps a directory-enumeration tag to a kind, or `None` if the tag is not informative.
pub fn classify_tag(d_type: u8) -> Option<NodeKind> {
    match d_type {
        libc::DT_BLK => Some(NodeKind::BlockDevice),
        libc::DT_CHR => Some(NodeKind::CharDevice),
        libc::DT_DIR => Some(NodeKind::Directory),
        libc::DT_FIFO => Some(NodeKind::Fifo),
        libc::DT_LNK => Some(NodeKind::SymLink),
        libc::DT_REG => Some(NodeKind::Regular),
        libc::DT_SOCK => Some(NodeKind::Socket),
        DT_WHT => Some(NodeKind::Whiteout),
        _ => None,
    }
}

/// Maps the file-type bits of an `st_mode` to a kind.
pub fn classify_mode(mode: u32) -> NodeKind {
    match mode & S_IFMT {
        m if m == libc::S_IFDIR as u32 => NodeKind::Directory,
        m if m == libc::S_IFREG as u32 => NodeKind::Regular,
        m if m == libc::S_IFBLK as u32 => NodeKind::BlockDevice,
        m if m == libc::S_IFCHR as u32 => NodeKind::CharDevice,
        m if m == libc::S_IFLNK as u32 => NodeKind::SymLink,
        m if m == libc::S_IFSOCK as u32 => NodeKind::Socket,
        m if m == libc::S_IFIFO as u32 => NodeKind::Fifo,
        S_IFWHT => NodeKind::Whiteout,
        _ => NodeKind::Unknown,
    }
}

/// Classifies an enumerated entry, falling back to `lstat` on `path` when the tag is unknown.
///
/// A failed fallback still yields [`NodeKind::Unknown`]; its error is handed back
/// so the caller can report it.
pub fn classify_entry<F: Filesystem>(
    fs: &F,
    path: &Path,
    d_type: u8,
) -> (NodeKind, Option<io::Error>) {
    if let Some(kind) = classify_tag(d_type) {
        return (kind, None);
    }
    match fs.symlink_mode(path) {
        Ok(mode) => (classify_mode(mode), None),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "fallback lstat failed");
            (NodeKind::Unknown, Some(err))
        }
    }
}

/// Resolves a root path into a node with an explicit `lstat`.
///
/// # Errors
/// Returns the underlying I/O error if the metadata query fails.
pub fn resolve<F: Filesystem>(fs: &F, path: &Path) -> io::Result<Node> {
    let mode = fs.symlink_mode(path)?;
    Ok(Node::for_path(path, classify_mode(mode)))
}
