//! Ordered fallback chains.
//!
//! Every operation that takes a default resolves its result the same way: try
//! the primary source, then the caller's default, then a label from the phrase
//! book. `FallbackChain` keeps that precedence in one place, in source order.

use std::borrow::Cow;

/// Candidates are consulted in the order they are added; the first one that is
/// present wins and later candidates are not evaluated.
#[derive(Debug, Default)]
pub struct FallbackChain<'a> {
    resolved: Option<Cow<'a, str>>,
}

impl<'a> FallbackChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate that counts as present whenever it is `Some`, even if empty.
    pub fn then<S>(mut self, candidate: Option<S>) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        if self.resolved.is_none() {
            self.resolved = candidate.map(Into::into);
        }
        self
    }

    /// Add a candidate that only counts as present when it is a non-empty string.
    pub fn then_non_empty<S>(mut self, candidate: Option<S>) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        if self.resolved.is_none() {
            self.resolved = candidate.map(Into::into).filter(|s| !s.is_empty());
        }
        self
    }

    /// Add a lazily computed candidate; `f` runs only if nothing earlier resolved.
    pub fn then_with<S, F>(self, f: F) -> Self
    where
        S: Into<Cow<'a, str>>,
        F: FnOnce() -> Option<S>,
    {
        if self.resolved.is_some() {
            return self;
        }
        self.then(f())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Finish the chain with a value that is always present.
    pub fn or<S>(self, last: S) -> String
    where
        S: Into<Cow<'a, str>>,
    {
        self.resolved.unwrap_or_else(|| last.into()).into_owned()
    }
}
