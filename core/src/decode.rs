//! # Value Decoder
//!
//! Turns an [`SnmpValue`] into the string printed for it.
//!
//! Octet strings are the interesting case:
//! * Exactly six bytes are taken to be a hardware address (`AA:BB:CC:DD:EE:FF`).
//! * During a walk any other octet string is printed as text.
//! * During a get, an octet string that is itself hex text is not added to the
//!   result row. Its re-encoded hex is reported on the verbose channel instead.

use snmpsweep_common::network::mac;
use snmpsweep_protocols::snmp::SnmpValue;

/// Which query path the value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Get,
    Walk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Printable form of the value.
    Value(String),
    /// Hex-text octet string seen on the get path; kept out of the result row.
    Hex(String),
    /// Agent placeholder (null, no such object/instance, end of view).
    Empty,
}

pub fn decode(value: &SnmpValue, mode: DecodeMode) -> Decoded {
    match value {
        SnmpValue::OctetString(bytes) => decode_octets(bytes, mode),
        SnmpValue::Text(text) => Decoded::Value(text.clone()),
        SnmpValue::Integer(n) => Decoded::Value(n.to_string()),
        SnmpValue::Unsigned(n) => Decoded::Value(n.to_string()),
        SnmpValue::Other { type_name, raw } => Decoded::Value(format!("*{raw} {type_name}")),
        SnmpValue::Null
        | SnmpValue::NoSuchObject
        | SnmpValue::NoSuchInstance
        | SnmpValue::EndOfMibView => Decoded::Empty,
    }
}

fn decode_octets(bytes: &[u8], mode: DecodeMode) -> Decoded {
    if let Some(hardware_addr) = mac::format_hardware_addr(bytes) {
        return Decoded::Value(hardware_addr);
    }

    let text = || String::from_utf8_lossy(bytes).into_owned();
    match mode {
        DecodeMode::Walk => Decoded::Value(text()),
        DecodeMode::Get => match hex::decode(bytes) {
            Ok(raw) => Decoded::Hex(hex::encode(raw)),
            Err(_) => Decoded::Value(text()),
        },
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
