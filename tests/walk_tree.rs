use std::fs;
use std::path::{Path, PathBuf};

use nodewalk::{Node, NodeKind, WalkError, Walker};

/// Builds `<tmp>/root/{a.txt, sub/{b.txt}}`.
fn sample_tree() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "a\n").unwrap();
    fs::write(root.join("sub/b.txt"), "b\n").unwrap();
    (dir, root)
}

fn collect(roots: &[PathBuf]) -> (nodewalk::WalkStats, Vec<(PathBuf, NodeKind)>, Vec<PathBuf>) {
    let mut visited = Vec::new();
    let mut errors = Vec::new();
    let mut reporter = |ctx: &Path, _err: &WalkError| errors.push(ctx.to_path_buf());
    let mut record = |path: &Path, node: &Node| -> anyhow::Result<()> {
        visited.push((path.to_path_buf(), node.kind()));
        Ok(())
    };
    let stats = Walker::new().walk(roots, &mut record, &mut reporter);
    (stats, visited, errors)
}

#[test]
fn walks_sample_tree_in_pre_order() {
    let (_dir, root) = sample_tree();
    let (stats, visited, errors) = collect(&[root.clone()]);

    assert!(errors.is_empty());
    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.dirs, 2);
    assert_eq!(stats.others(), 2);
    assert_eq!(visited[0], (root.clone(), NodeKind::Directory));

    let pos = |p: PathBuf| visited.iter().position(|(v, _)| *v == p).unwrap();
    assert!(pos(root.join("sub")) < pos(root.join("sub/b.txt")));
    assert!(visited.contains(&(root.join("a.txt"), NodeKind::Regular)));
    assert!(visited.contains(&(root.join("sub/b.txt"), NodeKind::Regular)));
}

#[test]
fn missing_root_does_not_stop_others() {
    let (dir, root) = sample_tree();
    let missing = dir.path().join("does-not-exist");
    let (stats, visited, errors) = collect(&[missing.clone(), root]);

    assert_eq!(errors, vec![missing.clone()]);
    assert!(visited.iter().all(|(p, _)| *p != missing));
    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.errors, 1);
}

#[test]
fn symlinks_are_listed_not_followed() {
    let (dir, root) = sample_tree();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&root, &link).unwrap();
    fs::create_dir(dir.path().join("holder")).unwrap();
    std::os::unix::fs::symlink(&root, dir.path().join("holder/inner")).unwrap();

    let (stats, visited, _) = collect(&[link.clone(), dir.path().join("holder")]);
    assert_eq!(visited[0], (link, NodeKind::SymLink));
    assert!(visited.contains(&(dir.path().join("holder/inner"), NodeKind::SymLink)));
    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.dirs, 1);
}

#[test]
fn fifo_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let fifo = dir.path().join("pipe");
    let c_path = std::ffi::CString::new(fifo.as_os_str().as_encoded_bytes()).unwrap();
    // SAFETY: `c_path` is a valid NUL-terminated path.
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) };
    assert_eq!(rc, 0);

    let (_, visited, _) = collect(&[dir.path().to_path_buf()]);
    assert!(visited.contains(&(fifo, NodeKind::Fifo)));
}

#[test]
fn repeated_walks_agree() {
    let (_dir, root) = sample_tree();
    let (first, mut a, _) = collect(&[root.clone()]);
    let (second, mut b, _) = collect(&[root]);
    a.sort();
    b.sort();
    assert_eq!(first, second);
    assert_eq!(a, b);
}
