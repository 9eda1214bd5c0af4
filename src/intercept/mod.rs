//! Interception of a transport slot.
//!
//! A [`FetchMock`] installs itself into a [`TransportSlot`] on its first
//! registration. From then on every request sent through the slot is checked
//! against the registered mocks: a match is answered by the mock, anything
//! else goes to the transport that was in the slot before (or is rejected when
//! real requests are disabled). [`FetchMock::clear_all`] puts the original
//! transport back. Mock sets sharing a slot may be cleared in any order: a set
//! cleared while another one sits on top of it is unlinked from the chain and
//! the slot is restored by whichever set is cleared last.

pub mod global;

use crate::config::{FetchMockBuilder, Settings};
use crate::matcher::IntoPattern;
use crate::mock::{Mock, MockRegistry, Registration};
use crate::options::MockOptions;
use crate::request::Request;
use crate::responder::{synthesize, Response};
use crate::transport::{Transport, TransportSlot};
use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// A set of mocks bound to one transport slot.
///
/// Dropping it clears its mocks and restores the slot.
pub struct FetchMock {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Arc<MockRegistry>,
    slot: Arc<TransportSlot>,
    /// `Some` iff installed.
    installed: Mutex<Option<Installed>>,
    real_requests_disabled: AtomicBool,
    settings: Settings,
}

struct Installed {
    /// The transport replaced on install.
    original: Arc<dyn Transport>,
    interceptor: Weak<dyn Transport>,
}

/// The transport a [`FetchMock`] puts into its slot.
struct Interceptor {
    inner: Arc<Inner>,
}

impl FetchMock {
    /// Mock requests sent through `slot`.
    pub fn new(slot: Arc<TransportSlot>) -> Self {
        Self::builder().slot(slot).build()
    }

    /// Create a builder for configuring a mock set.
    pub fn builder() -> FetchMockBuilder {
        FetchMockBuilder::default()
    }

    pub(crate) fn from_parts(
        slot: Arc<TransportSlot>,
        settings: Settings,
        disable_real_requests: bool,
    ) -> Self {
        FetchMock {
            inner: Arc::new(Inner {
                registry: Arc::new(MockRegistry::new()),
                slot,
                installed: Mutex::new(None),
                real_requests_disabled: AtomicBool::new(disable_real_requests),
                settings,
            }),
        }
    }

    /// Register a mock.
    ///
    /// Returns [`Registration::Existing`] without changing anything when a
    /// mock with the same pattern, method and headers is already registered.
    /// A new registration installs the interceptor if it is not installed.
    pub fn mock(
        &self,
        pattern: impl IntoPattern,
        options: impl Into<MockOptions>,
    ) -> Result<Registration> {
        let pattern = pattern.into_pattern()?;
        let options = options.into();
        let registration = self.inner.registry.register(pattern, options);

        if self.inner.settings.is_verbose() {
            let mock = registration.mock();
            tracing::debug!(
                pattern = %mock.pattern(),
                method = mock.method(),
                status = mock.options().status(),
                new = registration.is_new(),
                "Registered mocked request"
            );
        }

        if registration.is_new() {
            self.inner.install();
        }
        Ok(registration)
    }

    /// Remove every mock and restore the original transport.
    pub fn clear_all(&self) {
        self.inner.registry.clear();
        self.inner.uninstall();
    }

    /// Let unmatched requests through to the original transport.
    pub fn enable_real_requests(&self) {
        self.inner
            .real_requests_disabled
            .store(false, Ordering::SeqCst);
    }

    /// Reject unmatched requests with [`Error::NotMocked`].
    pub fn disable_real_requests(&self) {
        self.inner.real_requests_disabled.store(true, Ordering::SeqCst);
    }

    pub fn real_requests_enabled(&self) -> bool {
        !self.inner.real_requests_disabled.load(Ordering::SeqCst)
    }

    /// Whether the interceptor is currently in the slot.
    pub fn is_installed(&self) -> bool {
        self.inner.installed.lock().is_some()
    }

    /// The transport that was in the slot before installation.
    pub fn original_transport(&self) -> Option<Arc<dyn Transport>> {
        self.inner
            .installed
            .lock()
            .as_ref()
            .map(|installed| installed.original.clone())
    }

    /// All registered mocks, in registration order.
    pub fn mocks(&self) -> Vec<Mock> {
        self.inner.registry.mocks()
    }

    pub fn slot(&self) -> &Arc<TransportSlot> {
        &self.inner.slot
    }

    /// Send a request through this mock set's slot.
    pub async fn fetch(&self, request: impl Into<Request>) -> Result<Response> {
        self.inner.slot.fetch(request).await
    }
}

impl Drop for FetchMock {
    fn drop(&mut self) {
        self.clear_all();
    }
}

impl std::fmt::Debug for FetchMock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchMock")
            .field("mocks", &self.mocks())
            .field("installed", &self.is_installed())
            .field("real_requests_enabled", &self.real_requests_enabled())
            .finish()
    }
}

impl Inner {
    fn install(self: &Arc<Self>) {
        let mut installed = self.installed.lock();
        if installed.is_some() {
            return;
        }
        let interceptor: Arc<dyn Transport> = Arc::new(Interceptor {
            inner: self.clone(),
        });
        let weak = Arc::downgrade(&interceptor);
        *installed = Some(Installed {
            original: self.slot.replace(interceptor),
            interceptor: weak,
        });
        if self.settings.is_verbose() {
            tracing::debug!("Installed fetch interceptor");
        }
    }

    fn uninstall(&self) {
        let Some(installed) = self.installed.lock().take() else {
            return;
        };
        let restored = self
            .slot
            .release(&installed.interceptor, installed.original);
        if self.settings.is_verbose() {
            if restored {
                tracing::debug!("Restored original transport");
            } else {
                tracing::debug!("Unlinked fetch interceptor covered by another transport");
            }
        }
    }

    async fn handle(&self, request: Request) -> Result<Response> {
        let Some(mock) = self.registry.find_match(&request) else {
            return self.pass_through(request).await;
        };

        mock.record_call();
        if self.settings.is_verbose() {
            tracing::debug!(
                url = request.url(),
                pattern = %mock.pattern(),
                times_called = mock.times_called(),
                "Mocked fetch called"
            );
        }

        let options = mock.options();
        if let Some(error) = &options.throw {
            return Err(Error::Thrown(error.clone()));
        }

        let status = StatusCode::from_u16(options.status())
            .map_err(|_| Error::InvalidStatus(options.status()))?;
        synthesize(status, request.url(), options).await
    }

    async fn pass_through(&self, request: Request) -> Result<Response> {
        let original = if self.real_requests_disabled.load(Ordering::SeqCst) {
            None
        } else {
            let installed = self.installed.lock();
            installed
                .as_ref()
                .map(|installed| self.slot.resolve(installed.original.clone()))
        };

        match original {
            Some(transport) => {
                if self.settings.is_verbose() {
                    tracing::debug!(url = request.url(), "Passing unmatched request through");
                }
                transport.fetch(request).await
            }
            None => {
                if self.settings.is_verbose() {
                    tracing::debug!(
                        url = request.url(),
                        method = %request.method(),
                        "Rejected unmatched request"
                    );
                }
                Err(Error::NotMocked {
                    method: request.method().clone(),
                    url: request.url().to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl Transport for Interceptor {
    async fn fetch(&self, request: Request) -> Result<Response> {
        self.inner.handle(request).await
    }
}
