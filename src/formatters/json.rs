use std::io::{self, Write};
use std::path::Path;

use nodewalk::types::Summary;
use nodewalk::{Node, NodeKind, WalkStats};
use serde::Serialize;

#[derive(Serialize)]
struct Entry<'a> {
    kind: NodeKind,
    path: &'a str,
}

/// Writes one entry as a JSON line. Non-UTF-8 paths are written lossily.
pub fn write_entry<W: Write + ?Sized>(out: &mut W, path: &Path, node: &Node) -> io::Result<()> {
    let path = path.to_string_lossy();
    let entry = Entry {
        kind: node.kind(),
        path: &path,
    };
    serde_json::to_writer(&mut *out, &entry)?;
    out.write_all(b"\n")
}

pub fn summary(stats: &WalkStats) -> serde_json::Result<String> {
    serde_json::to_string(&Summary::from(stats))
}
