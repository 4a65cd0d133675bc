use std::time::Duration;

use crate::error::ScanError;

/// Worker pool size used when none, or a non-positive one, is requested.
pub const DEFAULT_THREADS: usize = 255;
/// How long a single connect attempt may block.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub subnet: String,
    pub ports: Vec<u16>,
    pub threads: usize,
    pub timeout: Duration,
}

impl ScanConfig {
    pub fn new(subnet: impl Into<String>, ports: Vec<u16>, threads: usize) -> Self {
        Self {
            subnet: subnet.into(),
            ports,
            threads,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ScanError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ScanError::InvalidPort(String::from(raw)))
}

/// Ports are kept in the given order, repeats included.
pub fn parse_ports<'a, I>(raw: I) -> Result<Vec<u16>, ScanError>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter().map(parse_port).collect()
}

pub fn parse_threads(raw: Option<&str>) -> Result<usize, ScanError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_THREADS);
    };

    let requested = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ScanError::InvalidThreads(String::from(raw)))?;

    if requested <= 0 {
        log::warn!(
            "Thread count {} isn't positive, using {} instead",
            requested,
            DEFAULT_THREADS
        );
        return Ok(DEFAULT_THREADS);
    }

    usize::try_from(requested).map_err(|_| ScanError::InvalidThreads(String::from(raw)))
}
