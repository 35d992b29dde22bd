// Fixture scaffolding used by the test-suite. This module is gated behind
// the `test-helpers` cargo feature so it is not included in production
// builds.
//
// Purpose: provide a temporary-directory fixture (created at setup,
// recursively deleted on teardown) and a pre-wired bundling environment
// rooted in it, so tests don't duplicate filesystem plumbing.

mod env;
mod tree;

pub use self::env::TempEnv;
pub use self::tree::{FixtureError, TempTree};

use std::io::{self, Read, Write};

use crate::filter::Filter;

/// Filter that copies its input through unchanged. Some tests need a
/// filter present in the pipeline without altering content.
pub struct Noop;

impl Filter for Noop {
    fn name(&self) -> &str {
        "noop"
    }

    fn apply(&self, input: &mut dyn Read, output: &mut dyn Write) -> io::Result<()> {
        io::copy(input, output)?;
        Ok(())
    }
}
