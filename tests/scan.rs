use std::net::{Ipv4Addr, TcpListener};

use netscan::{config::ScanConfig, report::Report, scan::Scanner};

fn listen_on(ip: Ipv4Addr) -> (TcpListener, u16) {
    let listener = TcpListener::bind((ip, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[test]
fn finds_single_listener_in_class_c() {
    let target = Ipv4Addr::new(127, 0, 0, 5);
    let (_listener, port) = listen_on(target);

    let scanner = Scanner::from_config(&ScanConfig::new("127.0.0", vec![port], 64)).unwrap();
    let mut report = Report::new(Vec::new());
    let summary = scanner.run("127.0.0", &mut report).unwrap();

    assert_eq!(summary.scanned, 254);
    assert_eq!(summary.hosts.len(), 1);
    assert_eq!(summary.hosts[0].ip, target);
    assert_eq!(summary.hosts[0].open, vec![port]);
    assert!(summary.failures.is_empty());

    let out = String::from_utf8(report.into_inner()).unwrap();
    let hosts: Vec<_> = out
        .lines()
        .filter(|line| line.starts_with("127."))
        .collect();
    assert_eq!(hosts, vec![format!("127.0.0.5\t[{}]", port)]);
}

#[test]
fn reports_open_ports_in_given_order() {
    let target = Ipv4Addr::new(127, 0, 0, 9);
    let (_a, first) = listen_on(target);
    let (_b, second) = listen_on(target);

    let scanner =
        Scanner::from_config(&ScanConfig::new("127.0.0.9", vec![second, first], 2)).unwrap();
    let mut report = Report::new(Vec::new());
    let summary = scanner.run("127.0.0.9", &mut report).unwrap();

    assert_eq!(summary.hosts[0].open, vec![second, first]);

    let out = String::from_utf8(report.into_inner()).unwrap();
    assert!(out.contains(&format!("127.0.0.9\t[{}, {}]\n", second, first)));
}

#[test]
fn host_without_listeners_prints_frame_only() {
    let scanner = Scanner::from_config(&ScanConfig::new("127.0.0.3", vec![1, 2, 3], 4)).unwrap();
    let mut report = Report::new(Vec::new());
    let summary = scanner.run("127.0.0.3", &mut report).unwrap();

    assert_eq!(summary.scanned, 1);
    assert!(summary.hosts.is_empty());

    let out = String::from_utf8(report.into_inner()).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "IP\t\tOpen Ports");
    assert_eq!(lines[1], "================");
    assert_eq!(lines[2], "================");
    assert!(lines[3].starts_with("Scanning took: "));
    assert!(lines[3].ends_with(" sec"));
}
