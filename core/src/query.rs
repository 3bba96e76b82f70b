//! # Query Executor
//!
//! Runs the configured method against an open session and writes the result.
//!
//! * **Get** requests every identifier in one PDU. Failures are dropped
//!   silently: most of them are hosts that simply don't carry the identifier.
//! * **Walk** enumerates a subtree with successive get-next requests, flushing
//!   every `batch_size` entries as one write.

use tracing::{debug, trace};

use snmpsweep_common::config::{QueryConfig, ROW_SEPARATOR};
use snmpsweep_common::output::Output;
use snmpsweep_protocols::snmp::{
    NO_SUCH_NAME, ObjectId, Session, SessionError, SnmpValue, VarBind,
};

use crate::decode::{self, DecodeMode, Decoded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Get answered and a result line was printed.
    Answered,
    /// Get failed; the host is dropped without a message.
    Ignored,
    /// Walk reached the end of the subtree.
    Walked { entries: usize, flushes: usize },
    /// Walk aborted after printing a diagnostic.
    WalkFailed,
}

pub async fn get(
    session: &mut dyn Session,
    address: &str,
    query: &QueryConfig,
    output: &Output,
) -> QueryOutcome {
    let oids: Vec<&str> = query.oid_list();
    let ids: Vec<ObjectId> = match oids
        .iter()
        .map(|oid| oid.parse::<ObjectId>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(ids) => ids,
        Err(e) => {
            debug!("{address}: {e}, ignoring host");
            return QueryOutcome::Ignored;
        }
    };

    let varbinds: Vec<VarBind> = match session.get(&ids).await {
        Ok(varbinds) => varbinds,
        Err(e) => {
            debug!("{address}: get failed, ignoring host: {e}");
            return QueryOutcome::Ignored;
        }
    };

    let mut rows: Vec<String> = Vec::new();
    for varbind in &varbinds {
        if let SnmpValue::Other { raw, .. } = &varbind.value {
            if query.verbose {
                output.line(raw);
            }
        }

        match decode::decode(&varbind.value, DecodeMode::Get) {
            Decoded::Value(value) => rows.push(value),
            Decoded::Hex(hex) if query.verbose => output.line(&hex),
            Decoded::Hex(_) | Decoded::Empty => {}
        }
    }

    match rows.as_slice() {
        [only] => output.line(only),
        _ => output.line(&format_row(address, &rows, &oids)),
    }
    QueryOutcome::Answered
}

/// `address,[v1:::v2],[oid1:::oid2]`
pub fn format_row(address: &str, values: &[String], oids: &[&str]) -> String {
    format!(
        "{address},[{}],[{}]",
        values.join(ROW_SEPARATOR),
        oids.join(ROW_SEPARATOR)
    )
}

pub async fn walk(
    session: &mut dyn Session,
    address: &str,
    query: &QueryConfig,
    output: &Output,
) -> QueryOutcome {
    let root_text: &str = query.walk_root();
    if query.verbose {
        output.line(&format!("Walking devices from: {root_text}"));
    }

    let root: ObjectId = match root_text.parse() {
        Ok(root) => root,
        Err(e) => return walk_failed(address, &e, output),
    };

    let mut buffer = WalkBuffer::new(query.batch_size);
    let mut cursor: ObjectId = root.clone();

    loop {
        let next: Option<VarBind> = match session.get_next(&cursor).await {
            Ok(varbinds) => varbinds.into_iter().next(),
            Err(SessionError::Status { status: NO_SUCH_NAME, .. }) => None,
            Err(e) => return walk_failed(address, &e, output),
        };

        let Some(entry) = next else { break };
        if is_end_of_view(&entry.value) || !entry.oid.starts_with(&root) {
            break;
        }
        if entry.oid <= cursor {
            let e = format!("OID not increasing: {} after {cursor}", entry.oid);
            return walk_failed(address, &e, output);
        }

        buffer.push(&entry, output);
        cursor = entry.oid;
    }

    // A leaf root has no successors inside itself; fetch it directly.
    if buffer.entries == 0 {
        match session.get(std::slice::from_ref(&root)).await {
            Ok(varbinds) => varbinds
                .iter()
                .filter(|entry| !entry.value.is_empty())
                .for_each(|entry| buffer.push(entry, output)),
            Err(e) => return walk_failed(address, &e, output),
        }
    }

    buffer.finish(address)
}

fn is_end_of_view(value: &SnmpValue) -> bool {
    matches!(
        value,
        SnmpValue::EndOfMibView | SnmpValue::NoSuchObject | SnmpValue::NoSuchInstance
    )
}

fn walk_failed(address: &str, e: &dyn std::fmt::Display, output: &Output) -> QueryOutcome {
    output.line(&format!("{address}: error walking device {e}"));
    QueryOutcome::WalkFailed
}

/// Accumulates walk lines and writes them `batch_size` at a time.
struct WalkBuffer {
    payload: String,
    pending: usize,
    batch_size: usize,
    entries: usize,
    flushes: usize,
}

impl WalkBuffer {
    fn new(batch_size: usize) -> Self {
        Self {
            payload: String::new(),
            pending: 0,
            batch_size: batch_size.max(1),
            entries: 0,
            flushes: 0,
        }
    }

    fn push(&mut self, entry: &VarBind, output: &Output) {
        let value: String = match decode::decode(&entry.value, DecodeMode::Walk) {
            Decoded::Value(value) | Decoded::Hex(value) => value,
            Decoded::Empty => String::new(),
        };
        self.payload.push_str(&format!("{}: {value}\n", entry.oid));
        self.pending += 1;
        self.entries += 1;

        if self.pending == self.batch_size {
            output.write_block(&self.payload);
            self.payload.clear();
            self.pending = 0;
            self.flushes += 1;
        }
    }

    /// Ends the walk. A trailing partial batch is not written.
    fn finish(self, address: &str) -> QueryOutcome {
        if self.pending > 0 {
            trace!("{address}: {} trailing walk entries not flushed", self.pending);
        }
        QueryOutcome::Walked {
            entries: self.entries,
            flushes: self.flushes,
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
