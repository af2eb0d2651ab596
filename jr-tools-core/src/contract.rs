#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde_json::Value;

use crate::error::Error;

/// Raw HTTP response as seen by the client: status code plus body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Synchronous transport seam between the client and the wire.
///
/// *NOTE:* this file acts as the *interface* only; the blocking reqwest
/// implementation lives in [`crate::http`]. The trait is implemented by the
/// real transport and by test mocks.
///
/// The contract: every request carries HTTP Basic auth and
/// `Accept: application/json`. The only error an implementation may produce
/// is [`Error::Connection`] (unreachable host, timeout). HTTP-level failures
/// (4xx/5xx) come back as ordinary responses for the client to interpret.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Transport: Send + Sync {
    /// Authenticated GET with query parameters.
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, Error>;

    /// Authenticated POST of a JSON body with an explicit content type.
    fn post(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse, Error>;

    /// Authenticated DELETE.
    fn delete(&self, url: &str) -> Result<HttpResponse, Error>;
}
