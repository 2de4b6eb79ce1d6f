//! Client layer: orchestrates validation, transport calls and result parsing.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    Message, ProductToken, RECIPIENTS_MAXIMUM, Recipient, TextClientResult, ValidationError,
    recipients_exceeded_message,
};

/// Maximum number of messages accepted by a single [`TextClient::send`] call.
pub const MESSAGES_MAXIMUM: usize = 100;

const DEFAULT_ENDPOINT_HOST: &str = "gw.cmtelecom.com";
const MESSAGE_PATH: &str = "/v1.0/message";

const ENV_PRODUCT_TOKEN: &str = "CM_PRODUCT_TOKEN";
const ENV_ENDPOINT_HOST: &str = "CM_ENDPOINT_HOST";

/// Boxed future returned by [`HttpTransport`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error produced by an [`HttpTransport`] when no HTTP response was obtained.
pub type TransportError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP response handed back by a transport.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP capability used by [`TextClient`].
///
/// The default implementation is backed by `reqwest`; supply your own through
/// [`TextClientBuilder::transport`] to route requests elsewhere.
pub trait HttpTransport: Send + Sync {
    /// POST `body` as JSON to `url` with the given headers.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(body);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Hard failures of [`TextClient`].
///
/// Only caller mistakes and client construction problems are reported this
/// way. Gateway, network and per-message problems come back as a
/// [`TextClientResult`] instead.
pub enum TextClientError {
    /// `send` was called with an empty batch.
    #[error("no messages to send")]
    NoMessages,

    /// The batch holds more than [`MESSAGES_MAXIMUM`] messages.
    #[error("maximum amount of messages exceeded: {actual} (max {max})")]
    MessagesLimit { max: usize, actual: usize },

    /// The configured gateway endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// Required configuration is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`TextClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, or
/// the HTTP transport itself.
pub struct TextClientBuilder {
    token: ProductToken,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl TextClientBuilder {
    /// Create a builder with the default gateway endpoint.
    pub fn new(token: ProductToken) -> Self {
        Self {
            token,
            endpoint: endpoint_for_host(DEFAULT_ENDPOINT_HOST),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Create a builder from `CM_PRODUCT_TOKEN` and the optional `CM_ENDPOINT_HOST`.
    pub fn from_env() -> Result<Self, TextClientError> {
        let token = std::env::var(ENV_PRODUCT_TOKEN)
            .map_err(|_| TextClientError::Config(format!("{ENV_PRODUCT_TOKEN} is not set")))?;
        let mut builder = Self::new(ProductToken::new(token)?);
        if let Ok(host) = std::env::var(ENV_ENDPOINT_HOST) {
            builder = builder.endpoint_host(host);
        }
        Ok(builder)
    }

    /// Send to `https://<host>/v1.0/message` instead of the default gateway host.
    pub fn endpoint_host(mut self, host: impl AsRef<str>) -> Self {
        self.endpoint = endpoint_for_host(host.as_ref());
        self
    }

    /// Override the full endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom HTTP transport. Timeout and user-agent settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`TextClient`].
    pub fn build(self) -> Result<TextClient, TextClientError> {
        url::Url::parse(&self.endpoint)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| TextClientError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(TextClient {
            token: self.token,
            endpoint: self.endpoint,
            http,
        })
    }
}

fn endpoint_for_host(host: &str) -> String {
    format!("https://{}{MESSAGE_PATH}", host.trim().trim_end_matches('/'))
}

#[derive(Clone)]
/// High-level client for the CM.com text gateway.
///
/// By default it posts to `https://gw.cmtelecom.com/v1.0/message`.
pub struct TextClient {
    token: ProductToken,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl TextClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`TextClient::builder`].
    pub fn new(token: ProductToken) -> Self {
        Self {
            token,
            endpoint: endpoint_for_host(DEFAULT_ENDPOINT_HOST),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(token: ProductToken) -> TextClientBuilder {
        TextClientBuilder::new(token)
    }

    /// Gateway URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a batch of messages in one request.
    ///
    /// Errors:
    /// - [`TextClientError::NoMessages`] for an empty batch,
    /// - [`TextClientError::MessagesLimit`] for more than [`MESSAGES_MAXIMUM`] messages.
    ///
    /// Every other outcome is a [`TextClientResult`]. A message addressing more
    /// than [`RECIPIENTS_MAXIMUM`] recipients, an unreachable gateway and an
    /// unreadable response all yield
    /// [`TextClientStatusCode::Unknown`](crate::TextClientStatusCode::Unknown).
    pub async fn send(&self, messages: &[Message]) -> Result<TextClientResult, TextClientError> {
        if messages.is_empty() {
            return Err(TextClientError::NoMessages);
        }
        if messages.len() > MESSAGES_MAXIMUM {
            return Err(TextClientError::MessagesLimit {
                max: MESSAGES_MAXIMUM,
                actual: messages.len(),
            });
        }

        if let Some(index) = messages
            .iter()
            .position(Message::exceeds_recipients_limit)
        {
            tracing::warn!(
                index,
                recipients = messages[index].recipients().len(),
                max = RECIPIENTS_MAXIMUM,
                "message exceeds recipient limit, not sending"
            );
            return Ok(TextClientResult::unknown(recipients_exceeded_message(
                RECIPIENTS_MAXIMUM,
            )));
        }

        let body = match crate::transport::encode_send_request(&self.token, messages) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode request");
                return Ok(TextClientResult::unknown(format!(
                    "Failed to encode request: {err}"
                )));
            }
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            messages = messages.len(),
            "sending messages"
        );

        let response = match self
            .http
            .post_json(&self.endpoint, self.headers(), body)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "gateway unavailable");
                return Ok(TextClientResult::unknown(format!(
                    "Gateway unavailable: {err}"
                )));
            }
        };

        let result = crate::transport::decode_send_response(response.status, &response.body);
        tracing::debug!(
            http_status = response.status,
            status_code = ?result.status_code,
            "gateway responded"
        );
        Ok(result)
    }

    /// Send one plain text message.
    ///
    /// Shorthand for building a [`Message`] and passing it to [`TextClient::send`];
    /// always returns a result.
    pub async fn send_message<R>(
        &self,
        body: impl Into<String>,
        from: impl Into<String>,
        recipients: impl IntoIterator<Item = R>,
        reference: Option<String>,
    ) -> TextClientResult
    where
        R: Into<Recipient>,
    {
        let mut message = Message::new(body, from, recipients);
        if let Some(reference) = reference {
            message = message.with_reference(reference);
        }

        match self.send(std::slice::from_ref(&message)).await {
            Ok(result) => result,
            Err(err) => TextClientResult::unknown(err.to_string()),
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
            (
                ProductToken::HEADER.to_owned(),
                self.token.as_str().to_owned(),
            ),
        ]
    }
}
