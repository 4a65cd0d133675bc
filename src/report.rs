use std::{
    io::{self, Write},
    time::Duration,
};

use crate::{error::ScanError, scan::HostResult};

const RULE: &str = "================";

/// Line-oriented scan output. Each line is written whole and flushed.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), ScanError> {
        self.out
            .write_fmt(format_args!("{}\n", args))
            .and_then(|_| self.out.flush())
            .map_err(ScanError::OutputFailed)
    }

    pub fn header(&mut self) -> Result<(), ScanError> {
        self.line(format_args!("IP\t\tOpen Ports"))?;
        self.line(format_args!("{}", RULE))
    }

    pub fn host(&mut self, host: &HostResult) -> Result<(), ScanError> {
        self.line(format_args!("{}\t{:?}", host.ip, host.open))
    }

    pub fn footer(&mut self, elapsed: Duration) -> Result<(), ScanError> {
        self.line(format_args!("{}", RULE))?;
        self.line(format_args!("Scanning took: {:.3} sec", elapsed.as_secs_f64()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Report<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}
