use std::{fmt::Display, net::Ipv4Addr, ops::RangeInclusive, str::FromStr};

use crate::error::ScanError;

/// Third octet values generated for a two-group subnet.
const NETWORKS: RangeInclusive<u8> = 0..=254;
/// Fourth octet values generated for two- and three-group subnets.
const HOSTS: RangeInclusive<u8> = 1..=254;

/// Partial or full IPv4 prefix that decides which addresses get probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subnet {
    /// `a`, accepted but covers no address; the scan ends without output.
    ClassA(u8),
    /// `a.b`, expands to `a.b.0.1` up to `a.b.254.254` (255 * 254 hosts).
    ClassB(u8, u8),
    /// `a.b.c`, expands to `a.b.c.1` up to `a.b.c.254`.
    ClassC(u8, u8, u8),
    /// `a.b.c.d`, a single host. Leading zeros are dropped (`010` is `10`).
    Host(Ipv4Addr),
}

impl Subnet {
    /// Every target address, in a deterministic order and without repeats.
    pub fn targets(&self) -> Vec<Ipv4Addr> {
        match *self {
            Subnet::ClassA(_) => Vec::new(),
            Subnet::ClassB(a, b) => NETWORKS
                .flat_map(|c| HOSTS.map(move |d| Ipv4Addr::new(a, b, c, d)))
                .collect(),
            Subnet::ClassC(a, b, c) => HOSTS.map(|d| Ipv4Addr::new(a, b, c, d)).collect(),
            Subnet::Host(ip) => vec![ip],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Subnet::ClassA(_) => 0,
            Subnet::ClassB(..) => NETWORKS.count() * HOSTS.count(),
            Subnet::ClassC(..) => HOSTS.count(),
            Subnet::Host(_) => 1,
        }
    }
}

impl Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subnet::ClassA(a) => write!(f, "{}", a),
            Subnet::ClassB(a, b) => write!(f, "{}.{}", a, b),
            Subnet::ClassC(a, b, c) => write!(f, "{}.{}.{}", a, b, c),
            Subnet::Host(ip) => write!(f, "{}", ip),
        }
    }
}

fn parse_octet(spec: &str, group: &str) -> Result<u8, ScanError> {
    if group.is_empty() {
        return Err(ScanError::EmptyOctetGroup(spec.into()));
    }

    // u8::from_str accepts a leading `+`, which isn't an octet.
    if !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScanError::InvalidOctet {
            spec: spec.into(),
            group: group.into(),
        });
    }

    group.parse().map_err(|_| ScanError::InvalidOctet {
        spec: spec.into(),
        group: group.into(),
    })
}

impl FromStr for Subnet {
    type Err = ScanError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = if spec.is_empty() {
            Vec::new()
        } else {
            spec.split('.').collect()
        };

        if !(1..=4).contains(&groups.len()) {
            return Err(ScanError::InvalidSubnet {
                spec: spec.into(),
                groups: groups.len(),
            });
        }

        let octets = groups
            .iter()
            .map(|group| parse_octet(spec, group))
            .collect::<Result<Vec<_>, _>>()?;

        let subnet = match octets[..] {
            [a] => Subnet::ClassA(a),
            [a, b] => Subnet::ClassB(a, b),
            [a, b, c] => Subnet::ClassC(a, b, c),
            [a, b, c, d] => Subnet::Host(Ipv4Addr::new(a, b, c, d)),
            _ => unreachable!(),
        };

        log::debug!("Subnet `{}` expands to {} address(es)", subnet, subnet.len());

        Ok(subnet)
    }
}

/// Parses `spec` and returns the addresses it covers.
pub fn expand(spec: &str) -> Result<Vec<Ipv4Addr>, ScanError> {
    spec.parse::<Subnet>().map(|subnet| subnet.targets())
}
