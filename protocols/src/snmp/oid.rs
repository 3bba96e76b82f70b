use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A dotted-numeric object identifier.
///
/// Ordering is lexicographic over the arcs, which is the order agents walk in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(Vec<u64>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object identifier '{0}'")]
pub struct OidError(pub String);

impl ObjectId {
    pub fn new(arcs: Vec<u64>) -> Self {
        Self(arcs)
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    /// True when `self` is `root` or lies beneath it.
    pub fn starts_with(&self, root: &ObjectId) -> bool {
        self.0.starts_with(&root.0)
    }
}

impl FromStr for ObjectId {
    type Err = OidError;

    /// Accepts `1.3.6.1` and the leading-dot form `.1.3.6.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(OidError(s.to_string()));
        }

        body.split('.')
            .map(|arc| arc.parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()
            .map(Self)
            .map_err(|_| OidError(s.to_string()))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.0.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
        }
        for arc in arcs {
            write!(f, ".{arc}")?;
        }
        Ok(())
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
