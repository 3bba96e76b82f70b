//! # Scan Target Model
//!
//! Parses the `-t` specification and expands it into concrete addresses.
//!
//! A specification is one or more comma-separated items, each being:
//! * A single host (e.g., `10.0.0.5`).
//! * A last-octet range (e.g., `10.0.0.1-100`).
//!
//! Items are expanded in the order given. Overlapping items are not
//! deduplicated, so an address listed twice is scanned twice.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::TargetError;

/// A validated target specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    items: Vec<TargetItem>,
}

/// One comma-separated item: the first three octets plus an inclusive range
/// for the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TargetItem {
    prefix: String,
    start: u8,
    end: u8,
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    /// Parses every item up front; a single malformed item rejects the whole
    /// specification.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let items = s
            .split(',')
            .map(|item| parse_item(item.trim()))
            .collect::<Result<Vec<TargetItem>, TargetError>>()?;

        Ok(Self { items })
    }
}

impl TargetSpec {
    /// Expands the specification into dotted-quad addresses, item by item,
    /// ascending within each item.
    pub fn addresses(&self) -> impl Iterator<Item = String> + '_ {
        self.items.iter().flat_map(TargetItem::addresses)
    }

    /// Number of addresses [`TargetSpec::addresses`] yields.
    pub fn len(&self) -> usize {
        self.items
            .iter()
            .map(|item| (item.start..=item.end).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TargetItem {
    fn addresses(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(move |octet| format!("{}.{octet}", self.prefix))
    }
}

impl fmt::Display for TargetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}.{}", self.prefix, self.start)
        } else {
            write!(f, "{}.{}-{}", self.prefix, self.start, self.end)
        }
    }
}

/// Convenience wrapper: parse and expand in one step.
pub fn expand(spec: &str) -> Result<Vec<String>, TargetError> {
    Ok(spec.parse::<TargetSpec>()?.addresses().collect())
}

/// Parses `a.b.c.N` or `a.b.c.N-M`.
///
/// Components past the fourth are ignored; the prefix octets are taken verbatim.
fn parse_item(item: &str) -> Result<TargetItem, TargetError> {
    let components: Vec<&str> = item.split('.').collect();
    if components.len() < 4 {
        return Err(TargetError::Malformed(item.to_string()));
    }

    let prefix: String = components[..3].join(".");
    let (start, end) = parse_octet_range(components[3], item)?;

    let parsed = TargetItem { prefix, start, end };
    if start > end {
        warn!("Range {parsed} is empty, nothing will be scanned for it");
    }
    Ok(parsed)
}

/// Helper to parse the last component into an inclusive `(start, end)` pair.
/// Both bounds must fit in an octet.
fn parse_octet_range(last: &str, item: &str) -> Result<(u8, u8), TargetError> {
    let (start_str, end_str) = match last.split_once('-') {
        Some((start_str, end_str)) => (start_str, end_str),
        None => (last, last),
    };

    let start: u8 = start_str.parse().map_err(|source| TargetError::InvalidStart {
        item: item.to_string(),
        source,
    })?;
    let end: u8 = end_str.parse().map_err(|source| TargetError::InvalidEnd {
        item: item.to_string(),
        source,
    })?;

    Ok((start, end))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
