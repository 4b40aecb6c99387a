use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

/// The closed set of filesystem entry types the walker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    BlockDevice,
    CharDevice,
    Directory,
    Fifo,
    SymLink,
    Regular,
    Socket,
    /// BSD union-filesystem marker for a deleted entry.
    Whiteout,
    Unknown,
}

impl NodeKind {
    /// Three-letter tag used in the listing output.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::BlockDevice => "BLK",
            NodeKind::CharDevice => "CHR",
            NodeKind::Directory => "DIR",
            NodeKind::Fifo => "FIO",
            NodeKind::SymLink => "LNK",
            NodeKind::Regular => "REG",
            NodeKind::Socket => "SCK",
            NodeKind::Whiteout => "WHT",
            NodeKind::Unknown => "UNK",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// One classified filesystem entry: its final path component and its kind.
///
/// A node is built once when the entry is discovered and never reclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: OsString,
    kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<OsString>, kind: NodeKind) -> Self {
        Node {
            name: name.into(),
            kind,
        }
    }

    /// Builds the node for a root path, naming it after the path's final component.
    ///
    /// Paths without one (`/`, `.`, `..`) keep the whole path as their name.
    pub fn for_path(path: &Path, kind: NodeKind) -> Self {
        Node::new(node_name(path), kind)
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

fn node_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
