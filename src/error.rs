//! Infrastructure error type.

use std::net::AddrParseError;

/// The error type returned by the server's fallible operations.
///
/// Request-level failures (bad id, unknown post, malformed body) never show
/// up here: they are HTTP [`Response`](crate::Response) values produced by
/// the handlers. This type only covers getting a listener up and keeping it
/// running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
