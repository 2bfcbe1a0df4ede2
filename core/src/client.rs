//! The admin API client: interceptor chain, transport and normalizer wired
//! together, plus the `Call` type every endpoint function returns.
//!
//! # Design
//! Endpoint functions are pure: they produce a `Call<T>` holding the request
//! descriptor and the call's error policy. `AdminClient::execute` is the
//! single place where a call meets the network, so the request a function
//! builds can be asserted on without I/O.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::envelope::ResponseNormalizer;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::interceptor::AuthInterceptor;
use crate::notify::{LogNavigator, LogNotifier, Navigator, Notifier};
use crate::session::SessionStore;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::transport::{Transport, UreqTransport};

/// What a call does when it fails after the normalizer has reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error to the caller.
    Propagate,
    /// Log the error and resolve with the call's fallback value. A 401 is
    /// never degraded.
    Degrade,
}

/// A typed request: the descriptor to send and how to treat failures.
pub struct Call<T> {
    request: HttpRequest,
    fallback: Option<fn() -> T>,
    _output: PhantomData<fn() -> T>,
}

impl<T> Call<T> {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            fallback: None,
            _output: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpRequest::new(HttpMethod::Get, path))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpRequest::new(HttpMethod::Delete, path))
    }

    pub fn get_with<Q: Serialize + ?Sized>(path: impl Into<String>, params: &Q) -> Result<Self, ApiError> {
        Ok(Self::new(HttpRequest::new(HttpMethod::Get, path).with_query(params)?))
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self::new(HttpRequest::new(HttpMethod::Post, path).with_json(body)?))
    }

    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self::new(HttpRequest::new(HttpMethod::Put, path).with_json(body)?))
    }

    /// POST without a body.
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self::new(HttpRequest::new(HttpMethod::Post, path))
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn into_request(self) -> HttpRequest {
        self.request
    }

    pub fn policy(&self) -> ErrorPolicy {
        match self.fallback {
            Some(_) => ErrorPolicy::Degrade,
            None => ErrorPolicy::Propagate,
        }
    }

    /// Resolve with `fallback()` instead of failing.
    pub fn degrade_to(mut self, fallback: fn() -> T) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<T: Default> Call<T> {
    /// Resolve with `T::default()` (an empty list, usually) instead of failing.
    pub fn degrade(self) -> Self {
        self.degrade_to(T::default)
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("request", &self.request)
            .field("policy", &self.policy())
            .finish()
    }
}

/// Sends calls through auth injection, the transport and envelope
/// normalization.
#[derive(Clone)]
pub struct AdminClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    interceptor: AuthInterceptor,
    normalizer: ResponseNormalizer,
}

impl AdminClient {
    pub fn builder(config: ClientConfig) -> AdminClientBuilder {
        AdminClientBuilder::new(config)
    }

    /// A client talking to `config.origin` with an in-memory session and
    /// log-only notifications.
    pub fn new(config: ClientConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        self.interceptor.session()
    }

    pub fn execute<T: DeserializeOwned>(&self, call: Call<T>) -> Result<T, ApiError> {
        let Call { request, fallback, .. } = call;
        let path = request.path.clone();
        match self.dispatch(request) {
            Ok(value) => Ok(value),
            Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
            Err(err) => match fallback {
                Some(fallback) => {
                    tracing::warn!(%path, error = %err, "degrading failed call to its fallback");
                    Ok(fallback())
                }
                None => Err(err),
            },
        }
    }

    fn dispatch<T: DeserializeOwned>(&self, mut request: HttpRequest) -> Result<T, ApiError> {
        self.interceptor.before_send(&mut request);
        request.path = self.config.resolve(&request.path);

        let response = self
            .transport
            .send(&request)
            .map_err(|e| self.normalizer.reject(e))?;
        self.interceptor.after_receive(&response)?;
        self.normalizer.normalize(&response)
    }
}

pub struct AdminClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn KeyValueStore>>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl AdminClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            store: None,
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn build(self) -> AdminClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(UreqTransport::new(&self.config.origin, self.config.timeout)));
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let interceptor = AuthInterceptor::new(SessionStore::new(store), self.navigator, self.config.login_path.clone());
        let normalizer = ResponseNormalizer::new(self.config.success_code, self.notifier);
        AdminClient {
            config: self.config,
            transport,
            interceptor,
            normalizer,
        }
    }
}
