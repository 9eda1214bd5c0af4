//! # mock-fetch
//!
//! In-process fetch mocking for tests. Register a URL pattern with a canned
//! response; matching requests get the canned response, everything else goes
//! to the real transport (or is rejected). Clearing the mocks puts the real
//! transport back.
//!
//! ## Example
//!
//! ```no_run
//! use mock_fetch::{FetchMock, MockOptions, TransportSlot};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_get_user() {
//!     // The slot is what the code under test sends its requests through.
//!     let slot = Arc::new(TransportSlot::default());
//!     let mocks = FetchMock::new(slot.clone());
//!
//!     mocks
//!         .mock(
//!             "https://api.example.com/users/*",
//!             MockOptions::new().with_body(json!({ "id": 1, "name": "John" })),
//!         )
//!         .unwrap();
//!
//!     let response = slot.fetch("https://api.example.com/users/1").await.unwrap();
//!     assert_eq!(response.status(), 200);
//! }
//! ```
//!
//! Code that cannot be handed a slot can use the process-wide one through
//! [`fetch`], [`mock`] and [`clear_mocks`].
//!
//! Set `VERBOSE=1` to log registrations and mocked calls through `tracing`.

pub mod body;
pub mod config;
pub mod error;
pub mod intercept;
pub mod matcher;
pub mod mock;
pub mod options;
pub mod request;
pub mod responder;
pub mod transport;

// Re-exports for convenience
pub use body::Body;
pub use config::{FetchMockBuilder, Settings};
pub use error::{Error, Result};
pub use intercept::global::{
    clear_mocks, disable_real_requests, enable_real_requests, fetch, mock,
};
pub use intercept::FetchMock;
pub use matcher::{IntoPattern, Matcher, Pattern, RequestMatcher};
pub use mock::{Mock, Registration};
pub use options::{MockOptions, ResponseOptions};
pub use request::Request;
pub use responder::Response;
pub use transport::{HttpTransport, Transport, TransportSlot};
