//! # Scan Worker
//!
//! Probe, connect, query, close, for exactly one address. Whatever goes wrong
//! here stays here; other workers never see it.

use tracing::debug;

use snmpsweep_common::config::Method;
use snmpsweep_protocols::icmp::Liveness;
use snmpsweep_protocols::snmp::{Session, SessionParams};

use super::ScanContext;
use crate::negotiate;
use crate::query::{self, QueryOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOutcome {
    /// No echo reply; no session was attempted.
    Unreachable,
    /// Session could not be opened; a diagnostic was printed.
    ConnectFailed,
    Queried(QueryOutcome),
}

pub async fn scan_host(address: &str, ctx: &ScanContext) -> HostOutcome {
    let query = &ctx.config.query;

    if let Liveness::Unreachable = ctx.prober.probe(address).await {
        debug!("{address}: no echo reply, skipping");
        return HostOutcome::Unreachable;
    }

    let params: SessionParams = negotiate::session_params(address, &ctx.config.credentials, query);
    if query.verbose {
        ctx.output.line(&format!("SNMP Version: {}", query.version));
    }

    let mut session: Box<dyn Session> = match ctx.connector.connect(&params).await {
        Ok(session) => session,
        Err(e) => {
            ctx.output.line(&format!("{address}: error connecting {e}"));
            return HostOutcome::ConnectFailed;
        }
    };
    if query.verbose {
        ctx.output.line(&format!("connected to: {address}"));
    }

    let outcome: QueryOutcome = match query.method {
        Method::Get => query::get(session.as_mut(), address, query, &ctx.output).await,
        Method::Walk => query::walk(session.as_mut(), address, query, &ctx.output).await,
    };
    session.close();

    HostOutcome::Queried(outcome)
}
