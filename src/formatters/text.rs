use std::io::{self, Write};
use std::path::Path;

use nodewalk::{Node, WalkStats};

/// Writes one listing line: `[REG] path`.
pub fn write_entry<W: Write + ?Sized>(out: &mut W, path: &Path, node: &Node) -> io::Result<()> {
    writeln!(out, "[{}] {}", node.kind(), path.display())
}

pub fn summary(stats: &WalkStats) -> String {
    format!(
        "\nTotal: {} nodes, {} directories, {} others",
        stats.nodes,
        stats.dirs,
        stats.others()
    )
}
