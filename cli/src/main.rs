mod commands;
mod terminal;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};

use commands::CommandLine;
use snmpsweep_common::output::Output;
use snmpsweep_core::scanner::{self, ScanContext, ScanSummary};
use snmpsweep_protocols::icmp::IcmpProber;
use snmpsweep_protocols::snmp::session::Snmp2Connector;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose);

    let (targets, cfg) = commands.into_parts();
    let verbose: bool = cfg.query.verbose;

    let prober = IcmpProber::new().context("initializing liveness prober")?;
    let ctx = ScanContext::new(
        cfg,
        Arc::new(prober),
        Arc::new(Snmp2Connector),
        Output::stdout(),
    );

    let start_time: Instant = Instant::now();
    let summary: ScanSummary = scanner::perform_scan(&targets, ctx).await?;

    if verbose {
        print_summary(&summary, start_time.elapsed());
    }
    Ok(())
}

fn print_summary(summary: &ScanSummary, total_time: Duration) {
    debug!("{summary:?}");
    info!(
        "Scanned {} addresses in {:.2}s ({} unreachable, {} connect failures)",
        summary.scanned,
        total_time.as_secs_f64(),
        summary.unreachable,
        summary.connect_failed
    );
}
