use std::net::AddrParseError;

use thiserror::Error;

/// Failures starting or configuring the gesture feed
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("invalid gesture feed address {addr:?}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },
    #[error("failed to start gesture runtime")]
    Runtime(#[from] std::io::Error),
}
