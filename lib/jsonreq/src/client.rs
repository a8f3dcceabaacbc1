//! The hyper transport behind [`Caller`](crate::Caller).
//!
//! A [`HyperClient`] is a stack of tower services. The innermost one sends
//! the request over hyper-util's pooled client and reads the whole body;
//! layers added with [`HyperClientBuilder::layer`] wrap it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::util::BoxCloneSyncService;
use tower::{Layer, ServiceExt};
use tower_service::Service;

use crate::{
    Error, Request, Response, Result, config::ClientConfig, connector::https_connector,
    middleware::LoggingLayer,
};

/// Type-erased service stack of a [`HyperClient`].
pub type BoxedService = BoxCloneSyncService<Request, Response, Error>;

/// Future returned by the transport service.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Innermost service: one exchange over the connection pool.
#[derive(Clone)]
struct Transport {
    pool: Pool,
    timeout: Duration,
    user_agent: Option<Arc<str>>,
}

impl Transport {
    fn new(config: &ClientConfig) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.idle_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build(https_connector(config.connect_timeout));

        Self {
            pool,
            timeout: config.timeout,
            user_agent: config.user_agent.as_deref().map(Arc::from),
        }
    }

    /// Headers are appended in order; the default `User-Agent` goes last and
    /// only when the request has none.
    fn to_hyper(&self, request: Request) -> Result<http::Request<Full<Bytes>>> {
        let has_user_agent = request.header(http::header::USER_AGENT.as_str()).is_some();
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder().method(method).uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(user_agent) = self.user_agent.as_deref().filter(|_| !has_user_agent) {
            builder = builder.header(http::header::USER_AGENT, user_agent);
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    async fn exchange(self, request: Request) -> Result<Response> {
        let request = self.to_hyper(request)?;

        let exchange = async {
            let response = self
                .pool
                .request(request)
                .await
                .map_err(|e| transport_error(&e))?;
            let status = response.status().as_u16();

            // Reading to the end hands the connection back to the pool
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::connection(e.to_string()))?
                .to_bytes();

            Ok::<_, Error>(Response::new(status, body))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

impl Service<Request> for Transport {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        Box::pin(self.clone().exchange(request))
    }
}

/// TLS failures only show up in the source chain of hyper-util's error.
fn transport_error(err: &hyper_util::client::legacy::Error) -> Error {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    let lowercase = message.to_ascii_lowercase();
    if ["tls", "ssl", "certificate"]
        .iter()
        .any(|needle| lowercase.contains(needle))
    {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

/// HTTP transport over hyper-util, rustls and a tower middleware stack.
///
/// Clones share the connection pool and the middleware stack.
///
/// # Example
///
/// ```ignore
/// use jsonreq::{Caller, HyperClient};
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(5))
///     .with_logging()
///     .build();
///
/// let mut posts: Vec<Post> = Vec::new();
/// Caller::with_client("https://jsonplaceholder.typicode.com/posts", client)
///     .get(Some(&mut posts), None)?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: BoxedService,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// A client with [`ClientConfig::default`] and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A client with `config` and no middleware.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// The settings this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl jsonreq_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.service.clone().oneshot(request).await
    }
}

type Wrap = Box<dyn FnOnce(BoxedService) -> BoxedService + Send>;

/// Builder for [`HyperClient`].
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfig,
    layers: Vec<Wrap>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Replace all settings at once.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the round-trip timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(Some(user_agent));
        self
    }

    /// Wrap the stack in a tower layer; the first layer added sits closest
    /// to the network.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + 'static,
        L::Service: Service<Request, Response = Response, Error = Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.layers.push(Box::new(move |inner| {
            BoxCloneSyncService::new(layer.layer(inner))
        }));
        self
    }

    /// Log every exchange at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every exchange at debug level, with redacted request headers.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let transport = BoxCloneSyncService::new(Transport::new(&self.config));
        let service = self
            .layers
            .into_iter()
            .fold(transport, |inner, wrap| wrap(inner));

        HyperClient {
            service,
            config: Arc::new(self.config),
        }
    }
}
