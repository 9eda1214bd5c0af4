//! Transports: the thing that actually answers a fetch.
//!
//! Code under test sends requests through a [`TransportSlot`]. Mocking swaps
//! the transport held by the slot and swaps it back when done.

mod http;

pub use http::HttpTransport;

use crate::request::Request;
use crate::responder::Response;
use crate::Result;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};

/// Something that can perform a fetch.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: Request) -> Result<Response>;
}

/// A replaceable reference to the current transport.
///
/// Share it (as `Arc<TransportSlot>`) with the code under test; a
/// [`FetchMock`](crate::FetchMock) installs itself into the same slot.
pub struct TransportSlot {
    current: RwLock<Arc<dyn Transport>>,
    /// Transports released while something else sat on top of them, each
    /// paired with the transport it had replaced.
    released: Mutex<Vec<(Weak<dyn Transport>, Arc<dyn Transport>)>>,
}

impl TransportSlot {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        TransportSlot {
            current: RwLock::new(transport),
            released: Mutex::new(Vec::new()),
        }
    }

    /// The transport currently in the slot.
    pub fn current(&self) -> Arc<dyn Transport> {
        self.current.read().clone()
    }

    /// Put `transport` in the slot and return the one it replaced.
    pub fn replace(&self, transport: Arc<dyn Transport>) -> Arc<dyn Transport> {
        std::mem::replace(&mut *self.current.write(), transport)
    }

    /// Take `transport` out of the slot, putting `replaced` back in its place.
    ///
    /// When `transport` is no longer the current one (another transport was
    /// installed over it), the slot is left alone and `transport` is only
    /// unlinked: whoever captured it is sent to `replaced` from then on.
    /// Returns whether the slot itself was restored.
    pub(crate) fn release(
        &self,
        transport: &Weak<dyn Transport>,
        replaced: Arc<dyn Transport>,
    ) -> bool {
        let mut current = self.current.write();
        let mut released = self.released.lock();

        if !std::ptr::addr_eq(Arc::as_ptr(&*current), transport.as_ptr()) {
            if transport.strong_count() > 0 {
                released.push((transport.clone(), replaced));
            }
            return false;
        }

        let restored = follow(&released[..], replaced);
        let previous = std::mem::replace(&mut *current, restored);
        drop(released);
        drop(current);
        drop(previous);

        self.released.lock().retain(|(t, _)| t.strong_count() > 0);
        true
    }

    /// The live transport that `transport` stands for, skipping over
    /// transports that were released out of order.
    pub(crate) fn resolve(&self, transport: Arc<dyn Transport>) -> Arc<dyn Transport> {
        follow(&self.released.lock(), transport)
    }

    /// Send a request through the current transport.
    pub async fn fetch(&self, request: impl Into<Request>) -> Result<Response> {
        let transport = self.current();
        transport.fetch(request.into()).await
    }
}

fn follow(
    released: &[(Weak<dyn Transport>, Arc<dyn Transport>)],
    mut transport: Arc<dyn Transport>,
) -> Arc<dyn Transport> {
    loop {
        let replaced = released
            .iter()
            .find(|(t, _)| std::ptr::addr_eq(t.as_ptr(), Arc::as_ptr(&transport)))
            .map(|(_, replaced)| replaced.clone());
        match replaced {
            Some(replaced) => transport = replaced,
            None => return transport,
        }
    }
}

impl Default for TransportSlot {
    fn default() -> Self {
        TransportSlot::new(Arc::new(HttpTransport::default()))
    }
}

impl std::fmt::Debug for TransportSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSlot").finish_non_exhaustive()
    }
}
