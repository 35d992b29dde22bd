use std::fmt;
use std::sync::Arc;

use crate::env::Environment;
use crate::filter::Filter;

/// A named group of source assets plus the filters that process them.
///
/// A bundle starts unbound; associating it with an [`Environment`] via
/// [`Bundle::bind`] determines the directory its contents are resolved
/// against.
pub struct Bundle {
    contents: Vec<String>,
    filters: Vec<Arc<dyn Filter>>,
    output: Option<String>,
    env: Option<Environment>,
}

impl Bundle {
    pub fn new<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Bundle {
            contents: contents.into_iter().map(Into::into).collect(),
            filters: Vec::new(),
            output: None,
            env: None,
        }
    }

    /// Set the output name the built bundle is written to.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Append a filter to the processing pipeline.
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Relative names of the bundle's source assets.
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// The environment this bundle is bound to, if any.
    pub fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Bind this bundle to `env`. Rebinding replaces the previous
    /// environment.
    pub fn bind(&mut self, env: Environment) {
        self.env = Some(env);
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("contents", &self.contents)
            .field(
                "filters",
                &self.filters.iter().map(|fl| fl.name()).collect::<Vec<_>>(),
            )
            .field("output", &self.output)
            .field("bound", &self.env.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bundle_is_unbound() {
        let b = Bundle::new(["in1", "in2"]);
        assert_eq!(b.contents(), ["in1", "in2"]);
        assert!(b.env().is_none());
        assert!(b.output().is_none());
    }

    #[test]
    fn bind_attaches_environment_handle() {
        let env = Environment::new("/srv/assets", "");
        let mut b = Bundle::new(["in1"]);
        b.bind(env.clone());
        assert_eq!(b.env(), Some(&env));
    }

    #[test]
    fn builder_sets_output() {
        let b = Bundle::new(["a.js", "b.js"]).with_output("bundle.js");
        assert_eq!(b.output(), Some("bundle.js"));
    }
}
