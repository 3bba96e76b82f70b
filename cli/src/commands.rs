use std::ffi::OsString;

use clap::Parser;
use snmpsweep_common::config::{
    AuthType, Credentials, DEFAULT_BATCH_SIZE, DEFAULT_COMMUNITY, DEFAULT_LIMIT, DEFAULT_OID,
    Method, PrivType, QueryConfig, ScanConfig, Version,
};
use snmpsweep_common::network::target::TargetSpec;

/// Multi-letter flags that are spelled with a single dash.
const SINGLE_DASH_LONGS: &[&str] = &["pt", "at", "vv"];

#[derive(Parser, Debug)]
#[command(name = "snmpsweep")]
#[command(about = "Ping a range of hosts and poll the live ones over SNMP.")]
#[command(
    after_help = "Ex: snmpsweep -t 10.0.0.0-150 -c v3User -m Get -v 3 -p PrivPass -pt AES256 -a AuthPass -at SHA512 -o 1.3.6.1.2.1.1.1.0"
)]
pub struct CommandLine {
    /// Target devices (-t 10.0.0.1 or -t 10.0.0.1-100 or -t 10.0.0.1,10.0.0.2)
    #[arg(short = 't', value_name = "TARGETS")]
    pub targets: TargetSpec,

    /// SNMP method
    #[arg(short = 'm', value_enum, ignore_case = true, default_value = "Get")]
    pub method: Method,

    /// SNMP version
    #[arg(short = 'v', value_enum, default_value = "3")]
    pub version: Version,

    /// SNMPv3 privacy type
    #[arg(long = "pt", value_enum, ignore_case = true, default_value = "AES")]
    pub priv_type: PrivType,

    /// SNMPv3 authentication type
    #[arg(long = "at", value_enum, ignore_case = true, default_value = "SHA")]
    pub auth_type: AuthType,

    /// OIDs to grab, separated by commas. A Walk of the default walks 1.3.6
    #[arg(short = 'o', default_value = DEFAULT_OID)]
    pub oids: String,

    /// Enable verbose output
    #[arg(long = "vv")]
    pub verbose: bool,

    /// Lines buffered per write during a Walk. Use more than 1000 when redirecting to a file
    #[arg(short = 'n', default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_positive)]
    pub batch_size: usize,

    /// SNMP community string or v3 user name
    #[arg(short = 'c', default_value = DEFAULT_COMMUNITY)]
    pub username: String,

    /// Authentication passphrase
    #[arg(short = 'a', default_value = "")]
    pub auth_passphrase: String,

    /// Privacy passphrase
    #[arg(short = 'p', default_value = "")]
    pub priv_passphrase: String,

    /// Maximum number of hosts scanned at once
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_LIMIT, value_parser = parse_positive)]
    pub limit: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Splits the flags into the target list and the shared scan configuration.
    pub fn into_parts(self) -> (TargetSpec, ScanConfig) {
        let config = ScanConfig {
            credentials: Credentials {
                username: self.username,
                auth_passphrase: self.auth_passphrase,
                priv_passphrase: self.priv_passphrase,
            },
            query: QueryConfig {
                version: self.version,
                method: self.method,
                auth_type: self.auth_type,
                priv_type: self.priv_type,
                oids: self.oids,
                verbose: self.verbose,
                batch_size: self.batch_size,
            },
            limit: self.limit,
        };
        (self.targets, config)
    }
}

/// Rewrites `-pt`, `-at` and `-vv` to their double-dash spelling so clap does
/// not read them as `-p t`, `-a t` and `-v v`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-') else {
                return arg;
            };
            let name: &str = flag.split_once('=').map_or(flag, |(name, _)| name);
            if SINGLE_DASH_LONGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
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
