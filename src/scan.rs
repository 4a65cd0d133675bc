use std::{
    any::Any,
    io::Write,
    net::Ipv4Addr,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
    },
    time::{Duration, Instant},
};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    config::ScanConfig,
    error::{ScanError, TaskFailure},
    report::Report,
    subnet::Subnet,
};

pub use self::method::TcpScan;

mod method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
}

/// Finds which of `ports` accept a connection on `ip`, keeping their order.
///
/// Called concurrently from every worker of the pool.
pub trait Prober: Sync {
    fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<u16>;
}

impl<F> Prober for F
where
    F: Fn(Ipv4Addr, &[u16]) -> Vec<u16> + Sync,
{
    fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<u16> {
        self(ip, ports)
    }
}

/// Open ports found on one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub ip: Ipv4Addr,
    pub open: Vec<u16>,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub elapsed: Duration,
    /// Probe tasks that finished, failed ones included.
    pub scanned: usize,
    /// Addresses with at least one open port, in arrival order.
    pub hosts: Vec<HostResult>,
    pub failures: Vec<TaskFailure>,
}

#[derive(Default)]
struct Drained {
    scanned: usize,
    hosts: Vec<HostResult>,
    failures: Vec<TaskFailure>,
}

type Outcome = Result<HostResult, TaskFailure>;

/// Builds the worker pool. At most `threads` probe tasks run at once.
pub fn pool(threads: usize) -> Result<ThreadPool, ScanError> {
    ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("probe-{}", i))
        .build()
        .map_err(ScanError::PoolBuildFailed)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        return String::from(*reason);
    }

    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| String::from("unknown panic"))
}

fn probe_task<P: Prober>(prober: &P, ip: Ipv4Addr, ports: &[u16]) -> Outcome {
    panic::catch_unwind(AssertUnwindSafe(|| prober.probe(ip, ports)))
        .map(|open| HostResult { ip, open })
        .map_err(|payload| TaskFailure {
            ip,
            reason: panic_reason(payload.as_ref()),
        })
}

fn drain<W: Write>(rx: Receiver<Outcome>, report: &mut Report<W>) -> Result<Drained, ScanError> {
    let mut drained = Drained::default();

    for outcome in rx {
        drained.scanned += 1;

        match outcome {
            Ok(host) if host.open.is_empty() => (),
            Ok(host) => {
                report.host(&host)?;
                drained.hosts.push(host);
            }
            Err(failure) => {
                eprintln!("{}", failure);
                drained.failures.push(failure);
            }
        }
    }

    Ok(drained)
}

pub struct Scanner<P: Prober = TcpScan> {
    pool: ThreadPool,
    ports: Vec<u16>,
    prober: P,
}

impl Scanner<TcpScan> {
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        let pool = pool(config.threads)?;

        Ok(Self::new(
            pool,
            config.ports.clone(),
            TcpScan::new(config.timeout),
        ))
    }
}

impl<P: Prober> Scanner<P> {
    pub fn new(pool: ThreadPool, ports: Vec<u16>, prober: P) -> Self {
        Self {
            pool,
            ports,
            prober,
        }
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Probes every address of `subnet`, writing each host with open ports
    /// as soon as its task completes, then the elapsed time.
    ///
    /// Nothing is written if `subnet` is malformed or covers no address.
    pub fn run<W: Write>(
        &self,
        subnet: &str,
        report: &mut Report<W>,
    ) -> Result<ScanSummary, ScanError> {
        let now = Instant::now();

        let subnet = subnet.parse::<Subnet>()?;
        let targets = subnet.targets();

        if targets.is_empty() {
            log::debug!("Subnet `{}` covers no address, nothing to scan", subnet);

            return Ok(ScanSummary {
                elapsed: now.elapsed(),
                scanned: 0,
                hosts: Vec::new(),
                failures: Vec::new(),
            });
        }

        log::debug!(
            "Probing {} address(es) on ports {:?} with {} worker(s)",
            targets.len(),
            self.ports,
            self.threads()
        );

        report.header()?;

        let (tx, rx) = mpsc::channel();
        let prober = &self.prober;
        let ports = self.ports.as_slice();
        let abandoned = &AtomicBool::new(false);

        // The scope joins every task before returning, even if writing fails.
        let drained = self.pool.in_place_scope(|s| {
            for ip in targets {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // Queued tasks are skipped once the report gave up.
                    if abandoned.load(Ordering::Relaxed) {
                        return;
                    }
                    let _ = tx.send(probe_task(prober, ip, ports));
                });
            }
            drop(tx);

            let drained = drain(rx, &mut *report);
            if drained.is_err() {
                abandoned.store(true, Ordering::Relaxed);
            }
            drained
        })?;

        let elapsed = now.elapsed();

        log::debug!(
            "Finished {} task(s), {} with open ports, {} failed",
            drained.scanned,
            drained.hosts.len(),
            drained.failures.len()
        );

        report.footer(elapsed)?;

        Ok(ScanSummary {
            elapsed,
            scanned: drained.scanned,
            hosts: drained.hosts,
            failures: drained.failures,
        })
    }
}
