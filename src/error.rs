use std::{
    io,
    net::{Ipv4Addr, SocketAddrV4},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("port `{0}` is invalid")]
    InvalidPort(String),
    #[error("thread count `{0}` is invalid")]
    InvalidThreads(String),
    #[error("subnet `{spec}` has {groups} octet group(s), expected 1 to 4")]
    InvalidSubnet { spec: String, groups: usize },
    #[error("subnet `{0}` contains an empty octet group")]
    EmptyOctetGroup(String),
    #[error("`{group}` in subnet `{spec}` isn't an octet (0-255)")]
    InvalidOctet { spec: String, group: String },
    #[error("failed to build worker pool: {0}")]
    PoolBuildFailed(#[source] rayon::ThreadPoolBuildError),
    #[error("failed to write scan output: {0}")]
    OutputFailed(#[source] io::Error),
}

impl ScanError {
    /// Errors caused by a malformed subnet specification.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScanError::InvalidSubnet { .. }
                | ScanError::EmptyOctetGroup(_)
                | ScanError::InvalidOctet { .. }
        )
    }
}

/// A single connect attempt that didn't succeed. Treated as a closed port.
#[derive(Debug, Error)]
#[error("failed to connect to `{addr}`: {source}")]
pub struct ConnectFailure {
    pub addr: SocketAddrV4,
    #[source]
    pub source: io::Error,
}

/// A probe task that panicked instead of returning its open ports.
#[derive(Debug, Error)]
#[error("{ip} generated an exception: {reason}")]
pub struct TaskFailure {
    pub ip: Ipv4Addr,
    pub reason: String,
}
