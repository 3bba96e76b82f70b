//! ICMP echo liveness probing.
//!
//! A host is worth a protocol session only if it answers at least one echo
//! request. Probing raw ICMP requires elevated privileges on most systems.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use surge_ping::{Client, Config, PingIdentifier, PingSequence};
use tokio::time::Instant;
use tracing::{trace, warn};

pub const ECHO_COUNT: u16 = 3;
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(2_000);

const PAYLOAD: [u8; 56] = [0u8; 56];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Reachable { replies: u16 },
    Unreachable,
}

impl Liveness {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Liveness::Reachable { .. })
    }
}

#[async_trait]
pub trait LivenessProber: Send + Sync {
    async fn probe(&self, address: &str) -> Liveness;
}

pub struct IcmpProber {
    client: Client,
    count: u16,
    timeout: Duration,
}

impl IcmpProber {
    /// Opens the shared ICMP socket. Failing here is fatal for the whole run.
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::new(&Config::default())
            .context("opening ICMP socket (are you running with elevated privileges?)")?;

        Ok(Self {
            client,
            count: ECHO_COUNT,
            timeout: PROBE_TIMEOUT,
        })
    }
}

#[async_trait]
impl LivenessProber for IcmpProber {
    /// Sends up to `count` echo requests, all within one overall deadline.
    async fn probe(&self, address: &str) -> Liveness {
        let ip: Ipv4Addr = match address.parse() {
            Ok(ip) => ip,
            Err(e) => {
                warn!("{address}: cannot build ICMP probe: {e}");
                return Liveness::Unreachable;
            }
        };

        let mut pinger = self
            .client
            .pinger(IpAddr::V4(ip), PingIdentifier(rand::random()))
            .await;

        let deadline: Instant = Instant::now() + self.timeout;
        let mut replies: u16 = 0;

        for seq in 0..self.count {
            let remaining: Duration = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            pinger.timeout(remaining);
            match pinger.ping(PingSequence(seq), &PAYLOAD).await {
                Ok((_, rtt)) => {
                    trace!("{address}: echo reply seq={seq} rtt={rtt:?}");
                    replies += 1;
                }
                Err(e) => trace!("{address}: no echo reply seq={seq}: {e}"),
            }
        }

        match replies {
            0 => Liveness::Unreachable,
            replies => Liveness::Reachable { replies },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
