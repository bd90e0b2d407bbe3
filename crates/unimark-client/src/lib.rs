//! HTTP client for fetching markdown from a JSON API.
//!
//! Provides a sync client over [`ureq`] with two transports:
//! - [`Client::request`]: one request, whole body returned as text
//! - [`Client::stream`]: POST whose response is read as newline-delimited
//!   `data: <payload>` frames, terminated by `data: [DONE]`
//!
//! Every request carries `Cache-Control: no-cache`, a JSON content type and,
//! when an [`AuthToken`] is configured, a bearer `Authorization` header.

mod client;
mod error;
mod stream;

pub use client::{AuthToken, Client, Method};
pub use error::ClientError;
pub use stream::{EventStream, StreamEvent, parse_frame};
