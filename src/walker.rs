//! Sequential pre-order tree walker.
//!
//! Every root path is resolved with `lstat`, handed to the visitor, and, if it
//! is a directory, enumerated and recursed into. Children are visited in the
//! order the directory handle returns them. Failures are isolated: a root
//! that cannot be resolved, a directory that cannot be read, or a visitor
//! error only stops that one entry's subtree. Everything else keeps going.
//!
//! ```text
//! walk(paths)
//! └── visit_path(root, None)          lstat + classify, count, visit
//!     └── visit_directory(root)       open, drain to End/Error, close
//!         ├── visit_path(child, Some) classify from d_type (lstat if unknown)
//!         └── ...
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use crate::classify;
use crate::error::{Result, WalkError};
use crate::fs::{DirHandle, DirStep, Filesystem, LocalFs, RawEntry};
use crate::node::Node;
use crate::types::WalkStats;

/// Called once per visited entry. An error stops that entry's subtree.
pub trait Visitor {
    fn visit(&mut self, path: &Path, node: &Node) -> anyhow::Result<()>;
}

impl<F> Visitor for F
where
    F: FnMut(&Path, &Node) -> anyhow::Result<()>,
{
    fn visit(&mut self, path: &Path, node: &Node) -> anyhow::Result<()> {
        self(path, node)
    }
}

/// Receives every recoverable failure, tagged with the path it happened at.
pub trait ErrorReporter {
    fn report(&mut self, context: &Path, error: &WalkError);
}

impl<F> ErrorReporter for F
where
    F: FnMut(&Path, &WalkError),
{
    fn report(&mut self, context: &Path, error: &WalkError) {
        self(context, error)
    }
}

/// Emits each failure as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, _context: &Path, error: &WalkError) {
        warn!("{error}");
    }
}

/// Walks filesystem trees rooted at caller-supplied paths.
#[derive(Debug, Clone, Default)]
pub struct Walker<F = LocalFs> {
    fs: F,
}

impl Walker<LocalFs> {
    pub fn new() -> Self {
        Walker { fs: LocalFs }
    }
}

impl<F: Filesystem> Walker<F> {
    pub fn with_filesystem(fs: F) -> Self {
        Walker { fs }
    }

    /// Walks every path in order, calling `visitor` once per entry.
    ///
    /// A failure on one root is reported and the next root is walked. The
    /// returned counters cover this call only.
    pub fn walk<P, V, R>(&self, paths: &[P], visitor: &mut V, reporter: &mut R) -> WalkStats
    where
        P: AsRef<Path>,
        V: Visitor + ?Sized,
        R: ErrorReporter + ?Sized,
    {
        let mut total = WalkStats::default();

        for path in paths {
            let path = path.as_ref();
            let mut traversal = Traversal {
                fs: &self.fs,
                visitor: &mut *visitor,
                reporter: &mut *reporter,
                stats: WalkStats::default(),
            };
            if let Err(err) = traversal.visit_path(path, None) {
                traversal.report(path, &err);
            }
            debug!(
                root = %path.display(),
                nodes = traversal.stats.nodes,
                errors = traversal.stats.errors,
                "root finished"
            );
            total.merge(&traversal.stats);
        }

        info!(
            nodes = total.nodes,
            dirs = total.dirs,
            errors = total.errors,
            "walk finished"
        );
        total
    }
}

/// State for walking one root.
struct Traversal<'w, F, V: ?Sized, R: ?Sized> {
    fs: &'w F,
    visitor: &'w mut V,
    reporter: &'w mut R,
    stats: WalkStats,
}

impl<F, V, R> Traversal<'_, F, V, R>
where
    F: Filesystem,
    V: Visitor + ?Sized,
    R: ErrorReporter + ?Sized,
{
    fn report(&mut self, context: &Path, err: &WalkError) {
        self.stats.errors += 1;
        self.reporter.report(context, err);
    }

    fn visit_path(&mut self, path: &Path, known: Option<Node>) -> Result<()> {
        let node = match known {
            Some(node) => node,
            None => classify::resolve(self.fs, path).map_err(|source| {
                WalkError::PathUnresolvable {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
        };

        // Counted only once resolved, so `nodes` always equals the number of visitor calls.
        self.stats.nodes += 1;
        if node.is_dir() {
            self.stats.dirs += 1;
        }

        trace!(path = %path.display(), kind = %node.kind(), "visit");
        self.visitor.visit(path, &node).map_err(|e| WalkError::VisitorAborted {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if node.is_dir() {
            self.visit_directory(path)?;
        }
        Ok(())
    }

    fn visit_directory(&mut self, path: &Path) -> Result<()> {
        // The handle is closed before any child is visited.
        let (children, failure) = self.read_children(path)?;
        debug!(path = %path.display(), entries = children.len(), "read directory");

        for raw in children {
            let child = join_path(path, &raw);
            let (kind, fallback_err) = classify::classify_entry(self.fs, &child, raw.d_type);
            if let Some(source) = fallback_err {
                let err = WalkError::ClassificationFallback {
                    path: child.clone(),
                    source,
                };
                self.report(&child, &err);
            }
            let node = Node::new(raw.name, kind);
            if let Err(err) = self.visit_path(&child, Some(node)) {
                self.report(&child, &err);
            }
        }

        match failure {
            Some(source) => Err(WalkError::DirectoryEnumerationFailed {
                path: path.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }

    /// Drains a directory handle into its child list.
    ///
    /// A read error ends enumeration; the entries read before it are returned alongside it.
    fn read_children(&self, path: &Path) -> Result<(Vec<RawEntry>, Option<io::Error>)> {
        let mut dir = self
            .fs
            .open_dir(path)
            .map_err(|source| WalkError::DirectoryUnopenable {
                path: path.to_path_buf(),
                source,
            })?;

        let mut children = Vec::new();
        loop {
            match dir.next_step() {
                DirStep::Entry(raw) if raw.is_dots() => {}
                DirStep::Entry(raw) => children.push(raw),
                DirStep::End => return Ok((children, None)),
                DirStep::Error(err) => return Ok((children, Some(err))),
            }
        }
    }
}

/// Builds a child path from its parent and the enumerated name.
pub fn join_path(parent: &Path, entry: &RawEntry) -> PathBuf {
    parent.join(&entry.name)
}
