//! Mock registration and management.

use crate::matcher::{Matcher, Pattern, RequestMatcher};
use crate::options::MockOptions;
use crate::request::Request;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// A registered mock: what it matches, how it responds, how often it was hit.
struct MockEntry {
    matcher: RequestMatcher,
    options: MockOptions,
    times_called: AtomicUsize,
}

/// Handle to a registered mock.
///
/// Cloning the handle does not duplicate the mock.
#[derive(Clone)]
pub struct Mock {
    entry: Arc<MockEntry>,
    registry: Weak<MockRegistry>,
}

impl Mock {
    /// Number of requests this mock has answered.
    pub fn times_called(&self) -> usize {
        self.entry.times_called.load(Ordering::SeqCst)
    }

    /// Whether this mock has answered at least one request.
    pub fn called(&self) -> bool {
        self.times_called() > 0
    }

    pub fn pattern(&self) -> &Pattern {
        self.entry.matcher.pattern()
    }

    /// Upper-cased request method this mock accepts.
    pub fn method(&self) -> &str {
        self.entry.matcher.method()
    }

    pub fn options(&self) -> &MockOptions {
        &self.entry.options
    }

    /// Unregister this mock. Later requests no longer match it.
    pub fn clear(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.entry.matcher);
        }
    }

    /// Whether this mock is still registered.
    pub fn is_registered(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.mocks.read().iter().any(|e| Arc::ptr_eq(e, &self.entry)))
    }

    pub(crate) fn record_call(&self) {
        self.entry.times_called.fetch_add(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mock")
            .field("pattern", &self.entry.matcher.pattern().as_str())
            .field("method", &self.entry.matcher.method())
            .field("headers", self.entry.matcher.headers())
            .field("times_called", &self.times_called())
            .finish()
    }
}

/// Outcome of registering a mock.
#[derive(Debug, Clone)]
pub enum Registration {
    /// A new mock was registered.
    New(Mock),
    /// A mock with the same pattern, method and headers was already
    /// registered. It is returned unchanged.
    Existing(Mock),
}

impl Registration {
    pub fn is_new(&self) -> bool {
        matches!(self, Registration::New(_))
    }

    pub fn mock(&self) -> &Mock {
        match self {
            Registration::New(mock) | Registration::Existing(mock) => mock,
        }
    }

    pub fn into_mock(self) -> Mock {
        match self {
            Registration::New(mock) | Registration::Existing(mock) => mock,
        }
    }
}

/// Registry of mocks, kept in registration order.
///
/// Registration order is the only precedence: the first registered mock
/// that matches a request answers it.
#[derive(Default)]
pub(crate) struct MockRegistry {
    mocks: RwLock<Vec<Arc<MockEntry>>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mock unless one with the same identity exists.
    pub fn register(self: &Arc<Self>, pattern: Pattern, options: MockOptions) -> Registration {
        let matcher = RequestMatcher::new(pattern, &options.method, &options.headers);

        let mut mocks = self.mocks.write();
        if let Some(existing) = mocks.iter().find(|e| e.matcher == matcher) {
            return Registration::Existing(self.handle(existing.clone()));
        }

        let entry = Arc::new(MockEntry {
            matcher,
            options,
            times_called: AtomicUsize::new(0),
        });
        mocks.push(entry.clone());
        Registration::New(self.handle(entry))
    }

    /// Find the first mock that matches the given request.
    pub fn find_match(self: &Arc<Self>, request: &Request) -> Option<Mock> {
        let mocks = self.mocks.read();
        mocks
            .iter()
            .find(|e| e.matcher.matches(request))
            .map(|e| self.handle(e.clone()))
    }

    /// All registered mocks, in registration order.
    pub fn mocks(self: &Arc<Self>) -> Vec<Mock> {
        let mocks = self.mocks.read();
        mocks.iter().map(|e| self.handle(e.clone())).collect()
    }

    pub fn remove(&self, matcher: &RequestMatcher) -> bool {
        let mut mocks = self.mocks.write();
        let before = mocks.len();
        mocks.retain(|e| &e.matcher != matcher);
        mocks.len() != before
    }

    /// Clear all registered mocks.
    pub fn clear(&self) {
        self.mocks.write().clear();
    }

    fn handle(self: &Arc<Self>, entry: Arc<MockEntry>) -> Mock {
        Mock {
            entry,
            registry: Arc::downgrade(self),
        }
    }
}
