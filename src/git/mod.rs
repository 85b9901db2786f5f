//! Version-control history behind a narrow provider interface.
//!
//! The churn analyzer only needs two questions answered: "is there a
//! repository here?" and "how many commits touched this path, optionally
//! within a date range?". [`GitHistory`] answers them with libgit2; tests
//! and alternative strategies (caching, batching) plug in through
//! [`HistoryProvider`].

#[cfg(test)]
pub(crate) mod fixture;

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use git2::{Commit, DiffFindOptions, DiffOptions, Repository, Sort, Tree};

/// Half-open calendar-date range `[start, end)`, evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a Unix timestamp falls inside the range.
    pub fn contains(&self, seconds: i64) -> bool {
        let start = self.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end = self.end.and_time(NaiveTime::MIN).and_utc().timestamp();
        seconds >= start && seconds < end
    }
}

/// Source of per-file commit counts.
pub trait HistoryProvider {
    /// Whether the scan root lives inside a version-controlled working tree.
    fn is_repository(&self) -> bool;

    /// Number of commits touching `path` (absolute), following renames.
    /// With a range, only commits whose time falls inside it are counted.
    fn commit_count(&self, path: &Path, range: Option<&DateRange>)
    -> Result<usize, Box<dyn Error>>;
}

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

/// How a single commit changed the followed path.
#[derive(Debug, PartialEq, Eq)]
enum Touch {
    Modified,
    Added,
    RenamedFrom(PathBuf),
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let repo = Repository::discover(path)?;
        let root = repo
            .workdir()
            .ok_or("bare repositories are not supported")?
            .canonicalize()?;
        Ok(Self { repo, root })
    }

    /// Convert an on-disk path to the repository-relative form git uses.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf, Box<dyn Error>> {
        let abs = path.canonicalize()?;
        let rel = abs
            .strip_prefix(&self.root)
            .map_err(|_| format!("file outside git root: {}", path.display()))?;
        Ok(rel.to_path_buf())
    }

    /// Count non-merge commits reachable from `HEAD` that touched `rel_path`,
    /// walking newest first and switching to the old name whenever a commit
    /// renamed the file.
    pub fn count_commits(
        &self,
        rel_path: &Path,
        range: Option<&DateRange>,
    ) -> Result<usize, Box<dyn Error>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut current = rel_path.to_path_buf();
        let mut count = 0;

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                continue;
            }

            let Some(touch) = self.touch(&commit, &current)? else {
                continue;
            };

            if range.is_none_or(|r| r.contains(commit.time().seconds())) {
                count += 1;
            }

            if let Touch::RenamedFrom(old) = touch {
                current = old;
            }
        }

        Ok(count)
    }

    fn touch(&self, commit: &Commit, path: &Path) -> Result<Option<Touch>, git2::Error> {
        let tree = commit.tree()?;
        let Ok(entry) = tree.get_path(path) else {
            return Ok(None);
        };

        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let old_id = parent_tree
            .as_ref()
            .and_then(|t| t.get_path(path).ok())
            .map(|e| e.id());

        match (old_id, parent_tree) {
            (Some(id), _) if id == entry.id() => Ok(None),
            (Some(_), _) => Ok(Some(Touch::Modified)),
            (None, Some(parent)) => Ok(Some(
                match self.rename_source(&parent, &tree, path)? {
                    Some(old) => Touch::RenamedFrom(old),
                    None => Touch::Added,
                },
            )),
            (None, None) => Ok(Some(Touch::Added)),
        }
    }

    /// Find the path `path` was renamed from between `parent` and `tree`.
    fn rename_source(
        &self,
        parent: &Tree,
        tree: &Tree,
        path: &Path,
    ) -> Result<Option<PathBuf>, git2::Error> {
        let mut opts = DiffOptions::new();
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(parent), Some(tree), Some(&mut opts))?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        Ok(diff
            .deltas()
            .filter(|d| d.status() == git2::Delta::Renamed)
            .find(|d| d.new_file().path() == Some(path))
            .and_then(|d| d.old_file().path().map(Path::to_path_buf)))
    }
}

/// [`HistoryProvider`] backed by the git repository enclosing the scan root,
/// if there is one.
pub struct GitHistory {
    repo: Option<GitRepo>,
}

impl GitHistory {
    pub fn discover(root: &Path) -> Self {
        let repo = match GitRepo::open(root) {
            Ok(r) => Some(r),
            Err(err) => {
                tracing::debug!("no git history for {}: {err}", root.display());
                None
            }
        };
        Self { repo }
    }
}

impl HistoryProvider for GitHistory {
    fn is_repository(&self) -> bool {
        self.repo.is_some()
    }

    fn commit_count(
        &self,
        path: &Path,
        range: Option<&DateRange>,
    ) -> Result<usize, Box<dyn Error>> {
        let repo = self.repo.as_ref().ok_or("not a git repository")?;
        let rel = repo.relative_path(path)?;
        repo.count_commits(&rel, range)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
