use std::sync::Arc;

use snmpsweep_common::config::{QueryConfig, ScanConfig};
use snmpsweep_common::network::target::TargetSpec;
use snmpsweep_common::output::Capture;
use snmpsweep_core::scanner;
use snmpsweep_protocols::snmp::SnmpValue;

use crate::fakes::{FakeAgent, FakeConnector, FakeProber, context, text};

const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

fn get_config(oids: &str, verbose: bool) -> ScanConfig {
    ScanConfig {
        query: QueryConfig {
            oids: oids.to_string(),
            verbose,
            ..QueryConfig::default()
        },
        ..ScanConfig::default()
    }
}

fn targets(spec: &str) -> TargetSpec {
    spec.parse().unwrap()
}

#[tokio::test]
async fn single_oid_prints_the_bare_value() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let connector = Arc::new(
        FakeConnector::new().agent("10.0.0.5", FakeAgent::new().with(SYS_DESCR, text("Linux core-sw1"))),
    );
    let capture = Capture::new();

    let ctx = context(get_config(SYS_DESCR, false), prober, connector.clone(), &capture);
    let summary = scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert_eq!(capture.chunks(), vec!["Linux core-sw1\n"]);
    assert_eq!(summary.answered, 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn several_oids_print_one_aggregated_row() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let agent = FakeAgent::new()
        .with(SYS_DESCR, text("Linux"))
        .with(SYS_NAME, text("core-sw1"));
    let connector = Arc::new(FakeConnector::new().agent("10.0.0.5", agent));
    let capture = Capture::new();

    let oids = format!("{SYS_DESCR},{SYS_NAME}");
    let ctx = context(get_config(&oids, false), prober, connector, &capture);
    scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert_eq!(
        capture.lines(),
        vec!["10.0.0.5,[Linux:::core-sw1],[1.3.6.1.2.1.1.1.0:::1.3.6.1.2.1.1.5.0]"]
    );
}

#[tokio::test]
async fn integer_values_render_in_decimal() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let agent = FakeAgent::new().with("1.3.6.1.2.1.1.7.0", SnmpValue::Integer(72));
    let connector = Arc::new(FakeConnector::new().agent("10.0.0.5", agent));
    let capture = Capture::new();

    let ctx = context(get_config("1.3.6.1.2.1.1.7.0", false), prober, connector, &capture);
    scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert_eq!(capture.lines(), vec!["72"]);
}

#[tokio::test]
async fn failed_get_is_silent_and_still_closes() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let agent = FakeAgent::new().with(SYS_DESCR, text("Linux")).failing_gets();
    let connector = Arc::new(FakeConnector::new().agent("10.0.0.5", agent));
    let capture = Capture::new();

    let ctx = context(get_config(SYS_DESCR, false), prober, connector.clone(), &capture);
    let summary = scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert!(capture.chunks().is_empty());
    assert_eq!(summary.ignored, 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn refused_connection_prints_a_diagnostic() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let connector = Arc::new(FakeConnector::new().agent("10.0.0.5", FakeAgent::refusing()));
    let capture = Capture::new();

    let ctx = context(get_config(SYS_DESCR, false), prober, connector.clone(), &capture);
    let summary = scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert_eq!(capture.lines(), vec!["10.0.0.5: error connecting connection refused"]);
    assert_eq!(summary.connect_failed, 1);
    assert_eq!(connector.closed(), 0);
}

#[tokio::test]
async fn verbose_announces_version_and_connection() {
    let prober = Arc::new(FakeProber::reachable(["10.0.0.5"]));
    let connector = Arc::new(
        FakeConnector::new().agent("10.0.0.5", FakeAgent::new().with(SYS_DESCR, text("Linux"))),
    );
    let capture = Capture::new();

    let ctx = context(get_config(SYS_DESCR, true), prober, connector, &capture);
    scanner::perform_scan(&targets("10.0.0.5"), ctx).await.unwrap();

    assert_eq!(
        capture.lines(),
        vec!["SNMP Version: 3", "connected to: 10.0.0.5", "Linux"]
    );
}
