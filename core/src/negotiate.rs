//! # Session Negotiator
//!
//! Derives the connection parameters for one address from the shared,
//! read-only scan configuration.

use std::time::Duration;

use snmpsweep_common::config::{AuthType, Credentials, PrivType, QueryConfig, Version};
use snmpsweep_protocols::snmp::{AuthProtocol, PrivProtocol, Security, SessionParams};

pub const SNMP_PORT: u16 = 161;
pub const IO_TIMEOUT: Duration = Duration::from_secs(1);

pub fn session_params(address: &str, credentials: &Credentials, query: &QueryConfig) -> SessionParams {
    SessionParams {
        target: address.to_string(),
        port: SNMP_PORT,
        timeout: IO_TIMEOUT,
        security: security(credentials, query),
    }
}

fn security(credentials: &Credentials, query: &QueryConfig) -> Security {
    match query.version {
        Version::V3 => Security::Usm {
            username: credentials.username.clone(),
            auth_protocol: auth_protocol(query.auth_type),
            auth_passphrase: credentials.auth_passphrase.clone(),
            priv_protocol: priv_protocol(query.priv_type),
            priv_passphrase: credentials.priv_passphrase.clone(),
        },
        Version::V2c => Security::V2c {
            community: credentials.username.clone(),
        },
        Version::V1 => Security::V1 {
            community: credentials.username.clone(),
        },
    }
}

fn auth_protocol(auth_type: AuthType) -> AuthProtocol {
    match auth_type {
        AuthType::Sha => AuthProtocol::Sha1,
        AuthType::Sha256 => AuthProtocol::Sha256,
        AuthType::Sha512 => AuthProtocol::Sha512,
    }
}

fn priv_protocol(priv_type: PrivType) -> PrivProtocol {
    match priv_type {
        PrivType::Aes => PrivProtocol::Aes128,
        PrivType::Aes192 => PrivProtocol::Aes192,
        PrivType::Aes256 => PrivProtocol::Aes256,
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
