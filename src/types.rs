use serde::Serialize;

/// Counters accumulated over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Every visited entry, roots included.
    pub nodes: u64,
    pub dirs: u64,
    /// Errors handed to the reporter.
    pub errors: u64,
}

impl WalkStats {
    /// Entries that are not directories.
    pub fn others(&self) -> u64 {
        self.nodes - self.dirs
    }

    pub fn merge(&mut self, other: &WalkStats) {
        self.nodes += other.nodes;
        self.dirs += other.dirs;
        self.errors += other.errors;
    }
}

/// Summary as written by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub nodes: u64,
    pub dirs: u64,
    pub others: u64,
    pub errors: u64,
}

impl From<&WalkStats> for Summary {
    fn from(s: &WalkStats) -> Self {
        Summary {
            nodes: s.nodes,
            dirs: s.dirs,
            others: s.others(),
            errors: s.errors,
        }
    }
}
