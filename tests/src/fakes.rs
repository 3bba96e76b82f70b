//! Fake liveness prober and SNMP agents.
//!
//! Each fake records what the scanner asked of it so tests can assert on the
//! calls as well as on the printed output.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use snmpsweep_common::config::ScanConfig;
use snmpsweep_common::output::{Capture, Output};
use snmpsweep_core::scanner::ScanContext;
use snmpsweep_protocols::icmp::{Liveness, LivenessProber};
use snmpsweep_protocols::snmp::{
    ObjectId, Session, SessionConnector, SessionError, SessionParams, SnmpValue, VarBind,
};

pub fn text(s: &str) -> SnmpValue {
    SnmpValue::OctetString(s.as_bytes().to_vec())
}

pub fn context(
    config: ScanConfig,
    prober: Arc<FakeProber>,
    connector: Arc<FakeConnector>,
    capture: &Capture,
) -> ScanContext {
    ScanContext::new(config, prober, connector, Output::new(capture.clone()))
}

#[derive(Default)]
pub struct FakeProber {
    reachable: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    probed: Mutex<Vec<String>>,
}

impl FakeProber {
    pub fn reachable<'a, I: IntoIterator<Item = &'a str>>(addresses: I) -> Self {
        Self {
            reachable: addresses.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Highest number of probes observed running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LivenessProber for FakeProber {
    async fn probe(&self, address: &str) -> Liveness {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        self.probed.lock().unwrap().push(address.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.reachable.contains(address) {
            Liveness::Reachable { replies: 3 }
        } else {
            Liveness::Unreachable
        }
    }
}

/// One agent's MIB and failure behavior.
#[derive(Debug, Clone, Default)]
pub struct FakeAgent {
    table: BTreeMap<ObjectId, SnmpValue>,
    refuse: bool,
    fail_gets: bool,
    fail_walk_after: Option<usize>,
}

impl FakeAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, oid: &str, value: SnmpValue) -> Self {
        let oid: ObjectId = oid.parse().expect("valid test oid");
        self.table.insert(oid, value);
        self
    }

    /// Rejects every connection attempt.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Times out every get request.
    pub fn failing_gets(mut self) -> Self {
        self.fail_gets = true;
        self
    }

    /// Answers `n` get-next requests, then times out.
    pub fn failing_walk_after(mut self, n: usize) -> Self {
        self.fail_walk_after = Some(n);
        self
    }
}

#[derive(Default)]
pub struct FakeConnector {
    agents: HashMap<String, FakeAgent>,
    connects: Mutex<Vec<String>>,
    closed: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, address: &str, agent: FakeAgent) -> Self {
        self.agents.insert(address.to_string(), agent);
        self
    }

    /// Addresses a connection was attempted to, refused ones included.
    pub fn connects(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionConnector for FakeConnector {
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError> {
        self.connects.lock().unwrap().push(params.target.clone());

        match self.agents.get(&params.target) {
            Some(agent) if !agent.refuse => Ok(Box::new(FakeSession {
                agent: agent.clone(),
                walk_requests: 0,
                closed: Arc::clone(&self.closed),
            })),
            _ => Err(SessionError::Connect("connection refused".to_string())),
        }
    }
}

pub struct FakeSession {
    agent: FakeAgent,
    walk_requests: usize,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Session for FakeSession {
    async fn get(&mut self, oids: &[ObjectId]) -> Result<Vec<VarBind>, SessionError> {
        if self.agent.fail_gets {
            return Err(SessionError::Timeout(Duration::from_secs(1)));
        }
        Ok(oids
            .iter()
            .map(|oid| {
                let value = self
                    .agent
                    .table
                    .get(oid)
                    .cloned()
                    .unwrap_or(SnmpValue::NoSuchObject);
                VarBind::new(oid.clone(), value)
            })
            .collect())
    }

    async fn get_next(&mut self, oid: &ObjectId) -> Result<Vec<VarBind>, SessionError> {
        if self.agent.fail_walk_after == Some(self.walk_requests) {
            return Err(SessionError::Timeout(Duration::from_secs(1)));
        }
        self.walk_requests += 1;

        let next = self
            .agent
            .table
            .range(oid.clone()..)
            .find(|(candidate, _)| *candidate > oid)
            .map(|(candidate, value)| VarBind::new(candidate.clone(), value.clone()))
            .unwrap_or_else(|| VarBind::new(oid.clone(), SnmpValue::EndOfMibView));
        Ok(vec![next])
    }

    fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
