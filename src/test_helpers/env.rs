use std::ops::Deref;

use log::debug;

use super::tree::{FixtureError, TempTree};
use crate::bundle::Bundle;
use crate::env::Environment;

/// Seed files shared by most bundle tests: four single-character inputs
/// with deterministic content.
const DEFAULT_FILES: [(&str, &str); 4] = [("in1", "A"), ("in2", "B"), ("in3", "C"), ("in4", "D")];

/// A [`TempTree`] with a bundling [`Environment`] rooted in it.
///
/// The environment's cache is disabled at construction; tests exercising
/// cache behavior opt in with `fixture.env().set_cache(true)`. Derefs to
/// the underlying directory fixture, so all of its file helpers are
/// available directly.
pub struct TempEnv {
    tree: TempTree,
    env: Environment,
}

impl TempEnv {
    /// Fixture seeded with the default `in1..in4` file set.
    pub fn new() -> Result<Self, FixtureError> {
        TempEnv::with_files(DEFAULT_FILES)
    }

    /// Fixture seeded from a custom file set.
    pub fn with_files<I, K, V>(files: I) -> Result<Self, FixtureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let tree = TempTree::with_files(files)?;
        let env = Environment::new(tree.root(), "");
        env.set_cache(false);
        debug!("test environment rooted at {}", tree.root().display());
        Ok(TempEnv { tree, env })
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn tree(&self) -> &TempTree {
        &self.tree
    }

    /// Construct a bundle over `contents` bound to the fixture's
    /// environment.
    pub fn make_bundle<I, S>(&self, contents: I) -> Bundle
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adopt(Bundle::new(contents))
    }

    /// Bind the fixture's environment onto an already-configured bundle,
    /// e.g. one carrying filters or an output name.
    pub fn adopt(&self, mut bundle: Bundle) -> Bundle {
        bundle.bind(self.env.clone());
        bundle
    }
}

impl Deref for TempEnv {
    type Target = TempTree;

    fn deref(&self) -> &TempTree {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_files_are_present() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TempEnv::new()?;
        for (name, content) in [("in1", "A"), ("in2", "B"), ("in3", "C"), ("in4", "D")] {
            assert!(fixture.exists(name));
            assert_eq!(fixture.get(name)?, content);
        }
        Ok(())
    }

    #[test]
    fn environment_is_rooted_at_the_tree_with_cache_off() -> Result<(), Box<dyn std::error::Error>>
    {
        let fixture = TempEnv::new()?;
        assert_eq!(fixture.env().directory(), fixture.root());
        assert!(!fixture.env().cache_enabled());
        Ok(())
    }

    #[test]
    fn make_bundle_binds_the_fixture_environment() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TempEnv::new()?;
        let bundle = fixture.make_bundle(["in1", "in2"]);
        assert_eq!(bundle.env(), Some(fixture.env()));
        assert_eq!(bundle.contents(), ["in1", "in2"]);
        Ok(())
    }

    #[test]
    fn custom_seed_replaces_the_default_set() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TempEnv::with_files([("main.css", "body {}")])?;
        assert!(fixture.exists("main.css"));
        assert!(!fixture.exists("in1"));
        Ok(())
    }
}
