use super::fixture::{create_test_repo, make_commit, make_commit_at, rename_at};
use super::*;
use std::fs;

const NOV_14_2023: i64 = 1_700_000_000;
const DAY: i64 = 86_400;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── DateRange ────────────────────────────────────────────────────────

#[test]
fn date_range_is_half_open() {
    let nov = DateRange::new(date(2023, 11, 1), date(2023, 12, 1));
    let nov_1_midnight = 1_698_796_800;
    let dec_1_midnight = 1_701_388_800;
    assert!(nov.contains(nov_1_midnight));
    assert!(nov.contains(NOV_14_2023));
    assert!(nov.contains(dec_1_midnight - 1));
    assert!(!nov.contains(dec_1_midnight));
    assert!(!nov.contains(nov_1_midnight - 1));
}

// ── GitRepo ──────────────────────────────────────────────────────────

#[test]
fn open_repo() {
    let (dir, _repo) = create_test_repo();
    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert_eq!(git_repo.root, dir.path().canonicalize().unwrap());
}

#[test]
fn open_not_repo() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("not_a_repo");
    fs::create_dir_all(&sub).unwrap();
    assert!(GitRepo::open(&sub).is_err());
}

#[test]
fn relative_path_from_absolute() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("src/a.rs", "fn a() {}")], "add a");
    let git_repo = GitRepo::open(dir.path()).unwrap();
    let rel = git_repo.relative_path(&dir.path().join("src/a.rs")).unwrap();
    assert_eq!(rel, Path::new("src/a.rs"));
}

#[test]
fn relative_path_outside_root() {
    let (dir, _repo) = create_test_repo();
    let other = tempfile::tempdir().unwrap();
    let stray = other.path().join("x.rs");
    fs::write(&stray, "").unwrap();
    let git_repo = GitRepo::open(dir.path()).unwrap();
    let err = git_repo.relative_path(&stray).unwrap_err();
    assert!(err.to_string().contains("outside git root"), "got: {err}");
}

#[test]
fn count_commits_per_file() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("a.rs", "fn a() {}")], "add a");
    make_commit(&repo, &[("b.rs", "fn b() {}")], "add b");
    make_commit(&repo, &[("a.rs", "fn a() { 1 }")], "modify a");

    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert_eq!(git_repo.count_commits(Path::new("a.rs"), None).unwrap(), 2);
    assert_eq!(git_repo.count_commits(Path::new("b.rs"), None).unwrap(), 1);
    assert_eq!(git_repo.count_commits(Path::new("c.rs"), None).unwrap(), 0);
}

#[test]
fn count_commits_within_range() {
    let (dir, repo) = create_test_repo();
    make_commit_at(&repo, &[("a.rs", "v1")], "oct", NOV_14_2023 - 30 * DAY);
    make_commit_at(&repo, &[("a.rs", "v2")], "nov 1", NOV_14_2023);
    make_commit_at(&repo, &[("a.rs", "v3")], "nov 2", NOV_14_2023 + DAY);

    let git_repo = GitRepo::open(dir.path()).unwrap();
    let nov = DateRange::new(date(2023, 11, 1), date(2023, 12, 1));
    let oct = DateRange::new(date(2023, 10, 1), date(2023, 11, 1));
    assert_eq!(git_repo.count_commits(Path::new("a.rs"), Some(&nov)).unwrap(), 2);
    assert_eq!(git_repo.count_commits(Path::new("a.rs"), Some(&oct)).unwrap(), 1);
    assert_eq!(git_repo.count_commits(Path::new("a.rs"), None).unwrap(), 3);
}

#[test]
fn count_commits_follows_renames() {
    let (dir, repo) = create_test_repo();
    let body = "fn main() {\n    println!(\"one\");\n    println!(\"two\");\n}\n";
    make_commit_at(&repo, &[("old.rs", body)], "add", NOV_14_2023);
    make_commit_at(&repo, &[("old.rs", &format!("{body}// edit\n"))], "edit", NOV_14_2023 + 10);
    rename_at(&repo, "old.rs", "src/new.rs", NOV_14_2023 + 20);
    make_commit_at(
        &repo,
        &[("src/new.rs", &format!("{body}// edit\n// again\n"))],
        "edit again",
        NOV_14_2023 + 30,
    );

    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert_eq!(git_repo.count_commits(Path::new("src/new.rs"), None).unwrap(), 4);
}

#[test]
fn count_commits_skips_unchanged_commits() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("a.rs", "same")], "add");
    make_commit(&repo, &[("a.rs", "same"), ("b.rs", "other")], "rewrite same content");

    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert_eq!(git_repo.count_commits(Path::new("a.rs"), None).unwrap(), 1);
}

#[test]
fn count_commits_empty_repo_fails() {
    let (dir, _repo) = create_test_repo();
    let git_repo = GitRepo::open(dir.path()).unwrap();
    // no HEAD yet, so the walk cannot start
    assert!(git_repo.count_commits(Path::new("a.rs"), None).is_err());
}

// ── GitHistory ───────────────────────────────────────────────────────

#[test]
fn history_outside_repo() {
    let dir = tempfile::tempdir().unwrap();
    let history = GitHistory::discover(dir.path());
    assert!(!history.is_repository());
    assert!(history.commit_count(&dir.path().join("a.rs"), None).is_err());
}

#[test]
fn history_counts_by_absolute_path() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("pkg/a.go", "package a")], "add");
    make_commit(&repo, &[("pkg/a.go", "package a\n")], "edit");

    let history = GitHistory::discover(&dir.path().join("pkg"));
    assert!(history.is_repository());
    let count = history
        .commit_count(&dir.path().join("pkg/a.go"), None)
        .unwrap();
    assert_eq!(count, 2);
}
