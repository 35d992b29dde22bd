use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration root shared by bundles: a base directory assets are
/// resolved against, a base URL they are served under, and the cache
/// policy applied when building.
///
/// `Environment` is a handle; cloning it yields another handle to the
/// same underlying state, and equality compares handle identity. A
/// bundle bound to an environment therefore compares equal to every
/// other handle of that environment.
#[derive(Debug, Clone)]
pub struct Environment {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    directory: PathBuf,
    url: String,
    cache: AtomicBool,
}

impl Environment {
    /// Create an environment rooted at `directory`, served under `url`.
    /// The build cache starts enabled.
    pub fn new(directory: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Environment {
            inner: Arc::new(Inner {
                directory: directory.into(),
                url: url.into(),
                cache: AtomicBool::new(true),
            }),
        }
    }

    /// Base directory source paths are resolved against.
    pub fn directory(&self) -> &Path {
        &self.inner.directory
    }

    /// Base URL built assets are served under.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn cache_enabled(&self) -> bool {
        self.inner.cache.load(Ordering::Relaxed)
    }

    /// Toggle the build cache. Visible through every handle of this
    /// environment.
    pub fn set_cache(&self, enabled: bool) {
        self.inner.cache.store(enabled, Ordering::Relaxed);
    }

    /// Resolve a relative asset name against the base directory.
    pub fn abspath(&self, name: &str) -> PathBuf {
        self.inner.directory.join(name)
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Environment {}
