//! # Scan Configuration
//!
//! Immutable values built once from the command line and shared, read-only,
//! by every scan worker.

use std::fmt;

use clap::ValueEnum;

/// `sysDescr.0`, the identifier queried when none is given.
pub const DEFAULT_OID: &str = "1.3.6.1.2.1.1.1.0";

/// Subtree walked when a walk is requested with the default identifier.
pub const WALK_ROOT: &str = "1.3.6";

pub const DEFAULT_COMMUNITY: &str = "public";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_LIMIT: usize = 200;

/// Separator used between values and identifiers of an aggregated result row.
pub const ROW_SEPARATOR: &str = ":::";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    #[value(name = "Get")]
    Get,
    #[value(name = "Walk")]
    Walk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Version {
    #[value(name = "1")]
    V1,
    #[value(name = "2c")]
    V2c,
    #[value(name = "3")]
    V3,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Version::V1 => "1",
            Version::V2c => "2c",
            Version::V3 => "3",
        };
        f.write_str(name)
    }
}

/// SNMPv3 authentication algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthType {
    #[value(name = "SHA")]
    Sha,
    #[value(name = "SHA256")]
    Sha256,
    #[value(name = "SHA512")]
    Sha512,
}

/// SNMPv3 privacy algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrivType {
    #[value(name = "AES")]
    Aes,
    #[value(name = "AES192")]
    Aes192,
    #[value(name = "AES256")]
    Aes256,
}

/// Community string (v1/v2c) or USM user name (v3) plus the v3 passphrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub auth_passphrase: String,
    pub priv_passphrase: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_COMMUNITY.to_string(),
            auth_passphrase: String::new(),
            priv_passphrase: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub version: Version,
    pub method: Method,
    pub auth_type: AuthType,
    pub priv_type: PrivType,
    /// Comma-separated dotted-numeric identifiers, exactly as given.
    pub oids: String,
    pub verbose: bool,
    /// Walk entries buffered before one write to the output.
    pub batch_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            version: Version::V3,
            method: Method::Get,
            auth_type: AuthType::Sha,
            priv_type: PrivType::Aes,
            oids: DEFAULT_OID.to_string(),
            verbose: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl QueryConfig {
    /// Identifiers of a single-query request, in the order given.
    pub fn oid_list(&self) -> Vec<&str> {
        self.oids.split(',').collect()
    }

    /// Root of a walk. The default single-query identifier widens to [`WALK_ROOT`].
    pub fn walk_root(&self) -> &str {
        if self.oids == DEFAULT_OID {
            WALK_ROOT
        } else {
            &self.oids
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub credentials: Credentials,
    pub query: QueryConfig,
    /// Upper bound on concurrently running scan workers.
    pub limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            query: QueryConfig::default(),
            limit: DEFAULT_LIMIT,
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
