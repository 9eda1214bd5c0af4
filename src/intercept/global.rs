//! The process-wide transport slot.
//!
//! For code that cannot be handed a [`TransportSlot`], requests go through
//! [`fetch`] and mocks are registered with [`mock`]. The slot starts out with
//! an [`HttpTransport`]; [`clear_mocks`] restores whatever transport was in
//! the slot when the first mock was registered.
//!
//! Tests that use these functions share state and should not run in
//! parallel with each other.

use super::FetchMock;
use crate::matcher::IntoPattern;
use crate::mock::Registration;
use crate::options::MockOptions;
use crate::request::Request;
use crate::responder::Response;
use crate::transport::{HttpTransport, TransportSlot};
use crate::Result;
use std::sync::{Arc, LazyLock};

static SLOT: LazyLock<Arc<TransportSlot>> =
    LazyLock::new(|| Arc::new(TransportSlot::new(Arc::new(HttpTransport::default()))));

static MOCKS: LazyLock<FetchMock> = LazyLock::new(|| FetchMock::new(SLOT.clone()));

/// The process-wide slot.
pub fn slot() -> &'static Arc<TransportSlot> {
    &SLOT
}

/// The mock set bound to the process-wide slot.
pub fn mocks() -> &'static FetchMock {
    &MOCKS
}

/// Send a request through the process-wide slot.
pub async fn fetch(request: impl Into<Request>) -> Result<Response> {
    SLOT.fetch(request).await
}

/// Register a mock on the process-wide slot.
pub fn mock(pattern: impl IntoPattern, options: impl Into<MockOptions>) -> Result<Registration> {
    MOCKS.mock(pattern, options)
}

/// Remove all process-wide mocks and restore the original transport.
pub fn clear_mocks() {
    MOCKS.clear_all();
}

/// Let unmatched requests reach the network.
pub fn enable_real_requests() {
    MOCKS.enable_real_requests();
}

/// Reject unmatched requests once a mock is registered.
pub fn disable_real_requests() {
    MOCKS.disable_real_requests();
}
