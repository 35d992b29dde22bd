use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use filetime::{set_file_times, FileTime};
use log::{debug, trace};
use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors returned by the fixture helpers.
///
/// Filesystem failures are wrapped unmodified; fixtures are fail-fast and
/// perform no retries or recovery.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A relative name resolved outside the fixture root (absolute path
    /// or `..` component).
    #[error("path escapes fixture root: {0}")]
    OutsideRoot(String),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A temporary directory owned by a single test, with helpers to seed and
/// inspect files under it.
///
/// The directory is created fresh at construction and removed recursively
/// when the fixture is dropped, on every exit path including panics. Tests
/// that need to observe the removal error use [`TempTree::close`].
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create a fixture with an empty root.
    pub fn new() -> Result<Self, FixtureError> {
        let dir = TempDir::new()?;
        debug!("fixture root created at {}", dir.path().display());
        Ok(TempTree { dir })
    }

    /// Create a fixture and seed it from `files`, a set of
    /// (relative path, content) pairs.
    pub fn with_files<I, K, V>(files: I) -> Result<Self, FixtureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let tree = TempTree::new()?;
        tree.create_files(files)?;
        Ok(tree)
    }

    /// The fixture's root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Join `name` to the fixture root. Pure path arithmetic, no I/O and
    /// no validation.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Whether `name` exists under the fixture root.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Return the contents of the file at `name`.
    pub fn get(&self, name: &str) -> Result<String, FixtureError> {
        Ok(fs::read_to_string(self.path(name))?)
    }

    /// Write each (relative path, content) pair under the fixture root,
    /// creating missing parent directories and overwriting existing files.
    pub fn create_files<I, K, V>(&self, files: I) -> Result<(), FixtureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, content) in files {
            let target = self.checked(name.as_ref())?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            trace!("seeding {}", target.display());
            fs::write(&target, content.as_ref())?;
        }
        Ok(())
    }

    /// Create each named directory under the fixture root, with missing
    /// parents created on demand. Fails if a named directory already
    /// exists; there is no idempotence guarantee.
    pub fn create_dirs<I, S>(&self, names: I) -> Result<(), FixtureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let target = self.checked(name.as_ref())?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::create_dir(&target)?;
        }
        Ok(())
    }

    /// Set access and modification time of each named file.
    ///
    /// Pass a [`FileTime`] to pin the timestamp, or `None` to use the
    /// current time. Returns the timestamp actually applied, so tests can
    /// assert against it.
    pub fn set_mtimes<I, S, M>(&self, names: I, mtime: M) -> Result<FileTime, FixtureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        M: Into<Option<FileTime>>,
    {
        let mtime = mtime
            .into()
            .unwrap_or_else(|| FileTime::from_system_time(SystemTime::now()));
        for name in names {
            let target = self.checked(name.as_ref())?;
            set_file_times(&target, mtime, mtime)?;
        }
        Ok(mtime)
    }

    /// Sorted relative paths of every regular file under the root, for
    /// whole-tree assertions.
    pub fn entries(&self) -> Result<Vec<PathBuf>, FixtureError> {
        let root = self.dir.path();
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let rel = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or_else(|_| entry.path());
                found.push(rel.to_path_buf());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Print the contents of the named files to stdout; useful for quick
    /// debugging of a failing test.
    pub fn dump<I, S>(&self, names: I) -> Result<(), FixtureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            println!("{}", name);
            println!("{}", "-".repeat(name.len()));
            println!("{}", self.get(name)?);
            println!();
        }
        Ok(())
    }

    /// Remove the fixture root now, propagating the removal error.
    /// Dropping the fixture removes the root too, but swallows errors.
    pub fn close(self) -> Result<(), FixtureError> {
        debug!("removing fixture root at {}", self.dir.path().display());
        self.dir.close()?;
        Ok(())
    }

    // Resolve a relative name for a mutating operation, rejecting names
    // that lexically leave the root.
    fn checked(&self, name: &str) -> Result<PathBuf, FixtureError> {
        let rel = Path::new(name);
        if rel.is_absolute() {
            return Err(FixtureError::OutsideRoot(name.to_string()));
        }
        for component in rel.components() {
            if matches!(component, Component::ParentDir) {
                return Err(FixtureError::OutsideRoot(name.to_string()));
            }
        }
        Ok(self.dir.path().join(rel))
    }
}
