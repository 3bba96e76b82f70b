//! SNMP data model and session abstraction.
//!
//! The scan logic works on owned [`VarBind`]s and talks to agents through the
//! [`Session`] trait. [`session::Snmp2Connector`] is the production adapter.

mod oid;
pub mod session;
mod value;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use oid::{ObjectId, OidError};
pub use value::{SnmpValue, VarBind};

/// `noSuchName`, how SNMPv1 agents signal the end of a walk.
pub const NO_SUCH_NAME: u32 = 2;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),

    #[error("agent returned error status {status} at index {index}")]
    Status { status: u32, index: u32 },

    #[error(transparent)]
    Oid(#[from] OidError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProtocol {
    Sha1,
    Sha256,
    Sha512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivProtocol {
    Aes128,
    Aes192,
    Aes256,
}

/// How a session authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Security {
    /// SNMPv1 community.
    V1 { community: String },
    /// SNMPv2c community.
    V2c { community: String },
    /// SNMPv3 user-based security, always authenticated and encrypted.
    Usm {
        username: String,
        auth_protocol: AuthProtocol,
        auth_passphrase: String,
        priv_protocol: PrivProtocol,
        priv_passphrase: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub target: String,
    pub port: u16,
    pub timeout: Duration,
    pub security: Security,
}

/// An open exchange channel to one agent.
#[async_trait]
pub trait Session: Send {
    /// Requests every identifier in a single PDU.
    async fn get(&mut self, oids: &[ObjectId]) -> Result<Vec<VarBind>, SessionError>;

    /// Requests the lexicographic successor of `oid`.
    async fn get_next(&mut self, oid: &ObjectId) -> Result<Vec<VarBind>, SessionError>;

    /// Releases the underlying socket.
    fn close(self: Box<Self>);
}

/// Opens sessions. One attempt per call, no retries.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError>;
}
