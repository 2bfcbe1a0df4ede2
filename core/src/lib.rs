//! Client core for the recharge platform's admin API.
//!
//! # Overview
//! Endpoint functions in [`api`] build `Call` values (a request descriptor
//! plus an error policy) without touching the network. [`AdminClient`]
//! executes them: the auth interceptor injects the bearer token, the
//! transport sends, a 401 clears the session and redirects to login, and the
//! normalizer unwraps the `{code, message, data}` envelope into the typed
//! `data`.
//!
//! # Design
//! - Calls resolve with the unwrapped `data`, never the raw envelope.
//! - Degrade-vs-propagate is a per-call flag (`Call::policy`), not a catch
//!   block hidden inside the endpoint.
//! - Token state lives behind `SessionStore` and is injected into the client.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod isp;
pub mod notify;
pub mod session;
pub mod storage;
pub mod transport;
pub mod ui;

pub use client::{AdminClient, AdminClientBuilder, Call, ErrorPolicy};
pub use config::ClientConfig;
pub use envelope::{Envelope, ResponseNormalizer, FALLBACK_MESSAGE, SUCCESS_CODE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::AuthInterceptor;
pub use notify::{LogNavigator, LogNotifier, MessageLog, Navigator, Notifier};
pub use session::{Preferences, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{Transport, UreqTransport};
