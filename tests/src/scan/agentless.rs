//! Scans through the real SNMP client against a loopback port nobody listens on.

use std::sync::Arc;

use snmpsweep_common::config::{Method, QueryConfig, ScanConfig, Version};
use snmpsweep_common::network::target::TargetSpec;
use snmpsweep_common::output::{Capture, Output};
use snmpsweep_core::scanner::{self, ScanContext, ScanSummary};
use snmpsweep_protocols::snmp::session::Snmp2Connector;

use crate::fakes::FakeProber;

fn config(version: Version, method: Method) -> ScanConfig {
    ScanConfig {
        query: QueryConfig {
            version,
            method,
            ..QueryConfig::default()
        },
        ..ScanConfig::default()
    }
}

async fn scan_loopback(config: ScanConfig) -> (ScanSummary, Capture) {
    let targets: TargetSpec = "127.0.0.1".parse().unwrap();
    let capture = Capture::new();
    let ctx = ScanContext::new(
        config,
        Arc::new(FakeProber::reachable(["127.0.0.1"])),
        Arc::new(Snmp2Connector),
        Output::new(capture.clone()),
    );
    let summary = scanner::perform_scan(&targets, ctx).await.unwrap();
    (summary, capture)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn v2c_get_without_an_agent_is_silent() {
    let (summary, capture) = scan_loopback(config(Version::V2c, Method::Get)).await;

    assert!(capture.chunks().is_empty(), "unexpected output: {:?}", capture.lines());
    assert_eq!(summary, ScanSummary { scanned: 1, ignored: 1, ..ScanSummary::default() });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn v3_get_without_an_agent_is_silent() {
    let (summary, capture) = scan_loopback(config(Version::V3, Method::Get)).await;

    assert!(capture.chunks().is_empty(), "unexpected output: {:?}", capture.lines());
    assert_eq!(summary, ScanSummary { scanned: 1, ignored: 1, ..ScanSummary::default() });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn v3_walk_without_an_agent_reports_a_walk_error() {
    let (summary, capture) = scan_loopback(config(Version::V3, Method::Walk)).await;

    let lines: Vec<String> = capture.lines();
    assert_eq!(lines.len(), 1, "unexpected output: {lines:?}");
    assert!(lines[0].starts_with("127.0.0.1: error walking device "), "{}", lines[0]);
    assert_eq!(summary.walk_failed, 1);
}
