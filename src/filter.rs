use std::io::{self, Read, Write};

/// A content transform applied to bundle sources during a build.
///
/// Filters stream: they read the source from `input` and write the
/// transformed result to `output`. Implementations must not assume the
/// input is seekable.
pub trait Filter: Send + Sync {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &str;

    fn apply(&self, input: &mut dyn Read, output: &mut dyn Write) -> io::Result<()>;
}
