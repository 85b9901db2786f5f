//! Scratch repositories for tests.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

pub fn create_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();

    (dir, repo)
}

/// Write `files` into the work tree, stage them and commit at `epoch`.
pub fn make_commit_at(repo: &Repository, files: &[(&str, &str)], message: &str, epoch: i64) -> Oid {
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }

    commit_index(repo, &mut index, message, epoch)
}

pub fn make_commit(repo: &Repository, files: &[(&str, &str)], message: &str) -> Oid {
    make_commit_at(repo, files, message, 1_700_000_000)
}

/// Rename `from` to `to` in the work tree and commit at `epoch`.
pub fn rename_at(repo: &Repository, from: &str, to: &str, epoch: i64) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let dest = workdir.join(to);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::rename(workdir.join(from), &dest).unwrap();

    let mut index = repo.index().unwrap();
    index.remove_path(Path::new(from)).unwrap();
    index.add_path(Path::new(to)).unwrap();
    commit_index(repo, &mut index, &format!("rename {from} -> {to}"), epoch)
}

fn commit_index(repo: &Repository, index: &mut git2::Index, message: &str, epoch: i64) -> Oid {
    let sig = Signature::new("Test", "test@test.com", &Time::new(epoch, 0)).unwrap();
    index.write().unwrap();
    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
