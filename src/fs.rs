//! Filesystem access used by the walker.
//!
//! The walker only needs two primitives: an `lstat`-style mode query and a
//! directory enumeration. Both sit behind [`Filesystem`] so traversal can run
//! against the local disk ([`LocalFs`]) or an in-memory tree in tests.

use std::ffi::OsString;
use std::fs::{self, FileType, ReadDir};
use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;

/// One raw directory-enumeration record: the entry name and its `d_type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: OsString,
    pub d_type: u8,
}

impl RawEntry {
    pub fn new(name: impl Into<OsString>, d_type: u8) -> Self {
        RawEntry {
            name: name.into(),
            d_type,
        }
    }

    pub fn is_dots(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Result of advancing a directory handle.
///
/// Clean end of entries and a read failure are separate outcomes.
#[derive(Debug)]
pub enum DirStep {
    Entry(RawEntry),
    End,
    Error(io::Error),
}

/// An open directory. Dropping it releases the handle.
pub trait DirHandle {
    fn next_step(&mut self) -> DirStep;
}

pub trait Filesystem {
    type Dir: DirHandle;

    /// Returns the `st_mode` of `path` without following a final symlink.
    fn symlink_mode(&self, path: &Path) -> io::Result<u32>;

    fn open_dir(&self, path: &Path) -> io::Result<Self::Dir>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    type Dir = F::Dir;

    fn symlink_mode(&self, path: &Path) -> io::Result<u32> {
        (**self).symlink_mode(path)
    }

    fn open_dir(&self, path: &Path) -> io::Result<Self::Dir> {
        (**self).open_dir(path)
    }
}

/// The local filesystem, through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    type Dir = LocalDir;

    fn symlink_mode(&self, path: &Path) -> io::Result<u32> {
        fs::symlink_metadata(path).map(|md| md.mode())
    }

    fn open_dir(&self, path: &Path) -> io::Result<LocalDir> {
        fs::read_dir(path).map(|inner| LocalDir { inner })
    }
}

pub struct LocalDir {
    inner: ReadDir,
}

impl DirHandle for LocalDir {
    fn next_step(&mut self) -> DirStep {
        match self.inner.next() {
            None => DirStep::End,
            Some(Err(e)) => DirStep::Error(e),
            Some(Ok(dent)) => {
                // A failed type lookup leaves the tag unknown; the classifier retries with lstat.
                let d_type = dent.file_type().map_or(libc::DT_UNKNOWN, d_type_of);
                DirStep::Entry(RawEntry::new(dent.file_name(), d_type))
            }
        }
    }
}

fn d_type_of(ft: FileType) -> u8 {
    if ft.is_dir() {
        libc::DT_DIR
    } else if ft.is_file() {
        libc::DT_REG
    } else if ft.is_symlink() {
        libc::DT_LNK
    } else if ft.is_block_device() {
        libc::DT_BLK
    } else if ft.is_char_device() {
        libc::DT_CHR
    } else if ft.is_fifo() {
        libc::DT_FIFO
    } else if ft.is_socket() {
        libc::DT_SOCK
    } else {
        libc::DT_UNKNOWN
    }
}
