//! Request transport.

use std::fmt;
use std::io::BufReader;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};
use ureq::{Agent, RequestBuilder};

use crate::error::ClientError;
use crate::stream::EventStream;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Message used when an error response carries no `msg` field.
const GENERIC_ERROR: &str = "request failed";

/// HTTP method for [`Client::request`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether the payload travels in the body rather than the query string.
    fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer token sent with every request.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token, returning `None` for an empty one.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }

    fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// JSON API client.
pub struct Client {
    agent: Agent,
    stream_agent: Agent,
    base_url: Option<String>,
    token: Option<AuthToken>,
}

impl Client {
    /// Create a client with the given request timeout.
    ///
    /// Plain requests are bounded by `timeout` end to end. Streams only bound
    /// connecting and waiting for the response head, so long-running streams
    /// are not cut off.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        let stream_agent = Agent::config_builder()
            .timeout_connect(Some(timeout))
            .timeout_recv_response(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            stream_agent,
            base_url: None,
            token: None,
        }
    }

    /// Join relative request URLs onto `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_owned());
        self
    }

    /// Authenticate requests with a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    /// Resolve a request URL against the base URL.
    ///
    /// Absolute `http(s)` URLs, and every URL when no base is set, are used
    /// as given.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !is_absolute(url) => {
                format!("{base}/{}", url.trim_start_matches('/'))
            }
            _ => url.to_owned(),
        }
    }

    /// Perform a request and return the response body as text.
    ///
    /// For `GET` and `DELETE` the fields of an object payload are sent as
    /// query parameters; for `POST` and `PUT` the payload is the JSON body
    /// (`{}` when absent).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpRequest`] on transport failure and
    /// [`ClientError::HttpResponse`] for non-2xx statuses, carrying the
    /// response's `msg` field when present.
    pub fn request(
        &self,
        url: &str,
        payload: Option<&Value>,
        method: Method,
    ) -> Result<String, ClientError> {
        let url = self.resolve_url(url);
        info!("{} {}", method, url);

        let response = if method.has_body() {
            let body = match payload {
                Some(value) => serde_json::to_vec(value)?,
                None => b"{}".to_vec(),
            };
            let builder = match method {
                Method::Put => self.agent.put(&url),
                _ => self.agent.post(&url),
            };
            self.headers(builder).send(&body[..])?
        } else {
            let mut builder = match method {
                Method::Delete => self.agent.delete(&url),
                _ => self.agent.get(&url),
            };
            for (key, value) in query_pairs(payload) {
                builder = builder.query(key, value);
            }
            self.headers(builder).call()?
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if !(200..300).contains(&status) {
            let error_body = body_reader.read_to_string().unwrap_or_default();
            return Err(ClientError::HttpResponse {
                status,
                message: error_message(&error_body),
            });
        }

        let text = body_reader.read_to_string()?;
        debug!(status, bytes = text.len(), "Request completed");
        Ok(text)
    }

    /// Open an event stream: POST `payload` and read the response as
    /// `data:` frames.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpRequest`] if the request cannot be sent and
    /// [`ClientError::HttpResponse`] if the server answers with a non-2xx
    /// status. Failures after the stream is open surface as items of the
    /// returned iterator.
    pub fn stream(
        &self,
        url: &str,
        payload: &Value,
    ) -> Result<EventStream<BufReader<ureq::BodyReader<'static>>>, ClientError> {
        let url = self.resolve_url(url);
        info!("Opening stream {}", url);

        let body = serde_json::to_vec(payload)?;
        let response = self
            .headers(self.stream_agent.post(&url))
            .header("Accept", "text/event-stream")
            .send(&body[..])?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_body = response.into_body().read_to_string().unwrap_or_default();
            return Err(ClientError::HttpResponse {
                status,
                message: error_message(&error_body),
            });
        }

        Ok(EventStream::new(BufReader::new(
            response.into_body().into_reader(),
        )))
    }

    fn headers<B>(&self, builder: RequestBuilder<B>) -> RequestBuilder<B> {
        let builder = builder
            .header("Cache-Control", "no-cache")
            .header("Content-Type", "application/json");
        match &self.token {
            Some(token) => builder.header("Authorization", &token.header_value()),
            None => builder,
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Query parameters for an object payload.
///
/// Strings are sent as-is, `null` fields are skipped, and other values use
/// their JSON text. Non-object payloads carry no parameters.
fn query_pairs(payload: Option<&Value>) -> Vec<(&str, String)> {
    let Some(Value::Object(map)) = payload else {
        if payload.is_some_and(|value| !value.is_null()) {
            debug!("Ignoring non-object payload for query string");
        }
        return Vec::new();
    };

    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.as_str(), value)
        })
        .collect()
}

/// Message for an error response: its `msg` field, or a generic message.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("msg")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| GENERIC_ERROR.to_owned())
}
