//! Run-once cleanup of resources acquired during assembly.

use std::fmt;

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Cleanup bound to the resources an assembler acquired.
///
/// The callback runs exactly once: either through [`Release::run`] or when the
/// value is dropped. Holding a `Release` in a local therefore guarantees the
/// cleanup on every exit path of the enclosing scope, including early returns
/// and panics.
pub struct Release {
    callback: Option<Callback>,
}

impl Release {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A release with nothing to clean up.
    pub fn noop() -> Self {
        Self { callback: None }
    }

    /// Combine releases into one that runs them in reverse order, so the
    /// last resource acquired is the first one freed.
    pub fn chain<I>(releases: I) -> Self
    where
        I: IntoIterator<Item = Release>,
    {
        let releases: Vec<Release> = releases.into_iter().collect();
        if releases.iter().all(|r| !r.is_pending()) {
            return Self::noop();
        }
        Self::new(move || {
            for release in releases.into_iter().rev() {
                release.run();
            }
        })
    }

    /// Whether the callback has yet to run.
    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }

    /// Run the cleanup now.
    pub fn run(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl Default for Release {
    fn default() -> Self {
        Self::noop()
    }
}

impl Drop for Release {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Release")
            .field("pending", &self.is_pending())
            .finish()
    }
}
