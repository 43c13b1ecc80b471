// Copyright @yucwang 2026

/// What the loader does with a line whose keyword is not a known directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownDirectivePolicy {
    Ignore,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSettings {
    pub unknown_directives: UnknownDirectivePolicy,
    /// Abort on the first directive that fails instead of skipping it.
    pub fail_fast: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            unknown_directives: UnknownDirectivePolicy::Ignore,
            fail_fast: false,
        }
    }
}

impl LoaderSettings {
    /// Unknown directives fail the load. Directive errors are still skipped.
    pub fn strict() -> Self {
        Self {
            unknown_directives: UnknownDirectivePolicy::Error,
            ..Self::default()
        }
    }
}
