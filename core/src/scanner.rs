//! # Scan Scheduler
//!
//! Expands the target specification and runs one [`worker`] per address.
//!
//! Concurrency is bounded by a pool of tokens: a token is taken before a worker
//! is spawned and returned when it finishes, so at most `limit` workers are ever
//! active. The scheduler returns only after every worker has completed.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use snmpsweep_common::config::ScanConfig;
use snmpsweep_common::network::target::TargetSpec;
use snmpsweep_common::output::Output;
use snmpsweep_protocols::icmp::LivenessProber;
use snmpsweep_protocols::snmp::SessionConnector;

use crate::query::QueryOutcome;

pub mod worker;

use worker::HostOutcome;

/// Everything a worker needs, shared read-only between all of them.
pub struct ScanContext {
    pub config: ScanConfig,
    pub prober: Arc<dyn LivenessProber>,
    pub connector: Arc<dyn SessionConnector>,
    pub output: Output,
}

impl ScanContext {
    pub fn new(
        config: ScanConfig,
        prober: Arc<dyn LivenessProber>,
        connector: Arc<dyn SessionConnector>,
        output: Output,
    ) -> Self {
        Self {
            config,
            prober,
            connector,
            output,
        }
    }
}

/// Tally of how each address ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: usize,
    pub unreachable: usize,
    pub connect_failed: usize,
    pub answered: usize,
    pub ignored: usize,
    pub walked: usize,
    pub walk_failed: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: HostOutcome) {
        self.scanned += 1;
        match outcome {
            HostOutcome::Unreachable => self.unreachable += 1,
            HostOutcome::ConnectFailed => self.connect_failed += 1,
            HostOutcome::Queried(QueryOutcome::Answered) => self.answered += 1,
            HostOutcome::Queried(QueryOutcome::Ignored) => self.ignored += 1,
            HostOutcome::Queried(QueryOutcome::Walked { .. }) => self.walked += 1,
            HostOutcome::Queried(QueryOutcome::WalkFailed) => self.walk_failed += 1,
        }
    }
}

/// Scans every address of `targets` and waits for all of them.
pub async fn perform_scan(targets: &TargetSpec, ctx: ScanContext) -> anyhow::Result<ScanSummary> {
    let limit: usize = ctx.config.limit.max(1);
    let tokens = Arc::new(Semaphore::new(limit));
    let ctx = Arc::new(ctx);

    debug!("Scanning {} addresses, at most {limit} at once", targets.len());

    let mut handles: Vec<JoinHandle<HostOutcome>> = Vec::with_capacity(targets.len());
    for address in targets.addresses() {
        let token = Arc::clone(&tokens)
            .acquire_owned()
            .await
            .context("scan token pool closed")?;
        let ctx = Arc::clone(&ctx);

        handles.push(tokio::spawn(async move {
            let outcome = worker::scan_host(&address, &ctx).await;
            drop(token);
            outcome
        }));
    }

    let mut summary = ScanSummary::default();
    for handle in handles {
        match handle.await {
            Ok(outcome) => summary.record(outcome),
            Err(e) => error!("Scan task failed: {e}"),
        }
    }
    Ok(summary)
}
