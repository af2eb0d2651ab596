use std::path::PathBuf;

use thiserror::Error;

use crate::client::ALLOWED_REPORT_FORMATS;

/// Error taxonomy for client and loader operations.
///
/// `Connection` is the only variant a transport implementation may produce;
/// everything else originates in the client itself. A non-200 answer to a
/// report run is not an error (see [`crate::client::Client::run_report`]),
/// and a delete against an absent resource succeeds everywhere.
#[derive(Debug, Error)]
pub enum Error {
    /// One of base url, username or password was missing or empty.
    #[error("the connection values are not complete")]
    IncompleteConnection,

    /// Requested report output format is not in the allowed set.
    #[error("invalid output format {:?}, must be one of: {}", .0, ALLOWED_REPORT_FORMATS.join(", "))]
    InvalidOutputFormat(String),

    /// Repository uris are absolute, slash-rooted paths.
    #[error("resource uri {0:?} must start with '/'")]
    InvalidResourceUri(String),

    /// Network-level failure reaching the server. Fatal, never retried.
    #[error("connection to report server failed: {0}")]
    Connection(String),

    /// A local file scheduled for upload could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server rejected a resource create.
    #[error("resource create at {url} failed with status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    /// A create response did not carry the expected JSON shape.
    #[error("malformed response from report server: {0}")]
    MalformedResponse(String),
}
