use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream},
    time::Duration,
};

use crate::{
    config::DEFAULT_TIMEOUT,
    error::ConnectFailure,
    scan::{PortState, Prober},
};

/// Plain TCP connect, one attempt per port.
#[derive(Debug, Clone, Copy)]
pub struct TcpScan {
    timeout: Duration,
}

impl TcpScan {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The stream is dropped right away, so nothing is sent or read.
    pub fn connect(&self, addr: SocketAddrV4) -> Result<(), ConnectFailure> {
        TcpStream::connect_timeout(&SocketAddr::V4(addr), self.timeout)
            .map(drop)
            .map_err(|source| ConnectFailure { addr, source })
    }

    pub fn scan(&self, addr: SocketAddrV4) -> PortState {
        self.connect(addr).map_or(PortState::Closed, |_| PortState::Open)
    }
}

impl Default for TcpScan {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Prober for TcpScan {
    fn probe(&self, ip: Ipv4Addr, ports: &[u16]) -> Vec<u16> {
        ports
            .iter()
            .copied()
            .filter(|&port| self.scan(SocketAddrV4::new(ip, port)) == PortState::Open)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    fn listener() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    fn closed_port() -> u16 {
        let (listener, port) = listener();
        drop(listener);
        port
    }

    #[test]
    fn listening_port_is_open() {
        let (_listener, port) = listener();
        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);

        assert_eq!(TcpScan::default().scan(addr), PortState::Open);
    }

    #[test]
    fn unlistened_port_is_closed() {
        let port = closed_port();
        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);

        let failure = TcpScan::default().connect(addr).unwrap_err();
        assert_eq!(failure.addr, addr);
        assert_eq!(TcpScan::default().scan(addr), PortState::Closed);
    }

    #[test]
    fn probe_keeps_port_order() {
        let (_first, a) = listener();
        let (_second, b) = listener();
        let closed = closed_port();

        let open = TcpScan::default().probe(Ipv4Addr::LOCALHOST, &[b, closed, a, b]);

        assert_eq!(open, vec![b, a, b]);
    }

    #[test]
    fn port_zero_is_closed() {
        let open = TcpScan::new(Duration::from_millis(200)).probe(Ipv4Addr::LOCALHOST, &[0]);
        assert!(open.is_empty());
    }
}
