//! [`SessionConnector`] backed by the `snmp2` async client.

use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use snmp2::{AsyncSession, Oid, Pdu, Value, v3};
use tokio::time::timeout;
use tracing::debug;

use super::{
    AuthProtocol, ObjectId, OidError, PrivProtocol, Security, Session, SessionConnector,
    SessionError, SessionParams, SnmpValue, VarBind,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Snmp2Connector;

pub struct Snmp2Session {
    inner: AsyncSession,
    target: String,
    timeout: Duration,
    /// v3 engine discovery still owed before the first request.
    needs_discovery: bool,
}

#[async_trait]
impl SessionConnector for Snmp2Connector {
    /// Binds the local socket only. Nothing is sent to the agent until the
    /// first request, so every version fails the same way on a silent host.
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError> {
        let addr: String = format!("{}:{}", params.target, params.port);
        let starting_req_id: i32 = rand::random_range(1..i32::MAX);

        let inner: AsyncSession = timeout(params.timeout, open(&addr, starting_req_id, &params.security))
            .await
            .map_err(|_| SessionError::Timeout(params.timeout))?
            .map_err(|e| SessionError::Connect(e.to_string()))?;

        Ok(Box::new(Snmp2Session {
            inner,
            target: params.target.clone(),
            timeout: params.timeout,
            needs_discovery: matches!(params.security, Security::Usm { .. }),
        }))
    }
}

#[async_trait]
impl Session for Snmp2Session {
    async fn get(&mut self, oids: &[ObjectId]) -> Result<Vec<VarBind>, SessionError> {
        let names: Vec<Oid<'static>> = oids
            .iter()
            .map(to_wire_oid)
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&Oid<'_>> = names.iter().collect();
        self.discover().await?;

        let limit: Duration = self.timeout;
        // An AuthUpdated reply means the engine clock was resynchronised; ask once more.
        for _ in 0..2 {
            match timeout(limit, self.inner.get_many(&refs))
                .await
                .map_err(|_| SessionError::Timeout(limit))?
            {
                Err(snmp2::Error::AuthUpdated) => continue,
                result => return collect_varbinds(result.map_err(request_error)?),
            }
        }
        Err(request_error(snmp2::Error::AuthUpdated))
    }

    async fn get_next(&mut self, oid: &ObjectId) -> Result<Vec<VarBind>, SessionError> {
        let name: Oid<'static> = to_wire_oid(oid)?;
        self.discover().await?;

        let limit: Duration = self.timeout;
        for _ in 0..2 {
            match timeout(limit, self.inner.getnext(&name))
                .await
                .map_err(|_| SessionError::Timeout(limit))?
            {
                Err(snmp2::Error::AuthUpdated) => continue,
                result => return collect_varbinds(result.map_err(request_error)?),
            }
        }
        Err(request_error(snmp2::Error::AuthUpdated))
    }

    fn close(self: Box<Self>) {
        debug!("Closing SNMP session to {}", self.target);
    }
}

impl Snmp2Session {
    /// Runs v3 engine discovery once. Bad credentials surface here.
    async fn discover(&mut self) -> Result<(), SessionError> {
        if !self.needs_discovery {
            return Ok(());
        }
        timeout(self.timeout, self.inner.init())
            .await
            .map_err(|_| SessionError::Timeout(self.timeout))?
            .map_err(request_error)?;

        debug!("{}: engine discovery complete", self.target);
        self.needs_discovery = false;
        Ok(())
    }
}

async fn open(addr: &str, starting_req_id: i32, security: &Security) -> io::Result<AsyncSession> {
    match security {
        Security::V1 { community } => {
            AsyncSession::new_v1(addr, community.as_bytes(), starting_req_id).await
        }
        Security::V2c { community } => {
            AsyncSession::new_v2c(addr, community.as_bytes(), starting_req_id).await
        }
        Security::Usm {
            username,
            auth_protocol,
            auth_passphrase,
            priv_protocol,
            priv_passphrase,
        } => {
            let usm = v3::Security::new(username.as_bytes(), auth_passphrase.as_bytes())
                .with_auth_protocol(wire_auth_protocol(*auth_protocol))
                .with_auth(v3::Auth::AuthPriv {
                    cipher: wire_cipher(*priv_protocol),
                    privacy_password: priv_passphrase.as_bytes().to_vec(),
                });
            AsyncSession::new_v3(addr, starting_req_id, usm).await
        }
    }
}

fn wire_auth_protocol(protocol: AuthProtocol) -> v3::AuthProtocol {
    match protocol {
        AuthProtocol::Sha1 => v3::AuthProtocol::Sha1,
        AuthProtocol::Sha256 => v3::AuthProtocol::Sha256,
        AuthProtocol::Sha512 => v3::AuthProtocol::Sha512,
    }
}

fn wire_cipher(protocol: PrivProtocol) -> v3::Cipher {
    match protocol {
        PrivProtocol::Aes128 => v3::Cipher::Aes128,
        PrivProtocol::Aes192 => v3::Cipher::Aes192,
        PrivProtocol::Aes256 => v3::Cipher::Aes256,
    }
}

fn to_wire_oid(oid: &ObjectId) -> Result<Oid<'static>, OidError> {
    Oid::from(oid.arcs()).map_err(|_| OidError(oid.to_string()))
}

fn collect_varbinds(pdu: Pdu<'_>) -> Result<Vec<VarBind>, SessionError> {
    let status = pdu.error_status as u32;
    if status != 0 {
        return Err(SessionError::Status {
            status,
            index: pdu.error_index as u32,
        });
    }

    let mut varbinds: Vec<VarBind> = Vec::new();
    for (name, value) in pdu.varbinds {
        let oid: ObjectId = name.to_string().parse()?;
        varbinds.push(VarBind::new(oid, to_value(value)));
    }
    Ok(varbinds)
}

fn to_value(value: Value<'_>) -> SnmpValue {
    match value {
        Value::OctetString(bytes) => SnmpValue::OctetString(bytes.to_vec()),
        Value::Integer(n) => SnmpValue::Integer(n),
        Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => {
            SnmpValue::Unsigned(u64::from(n))
        }
        Value::Counter64(n) => SnmpValue::Unsigned(n),
        Value::ObjectIdentifier(oid) => SnmpValue::Text(oid.to_string()),
        Value::IpAddress(octets) => SnmpValue::Text(Ipv4Addr::from(octets).to_string()),
        Value::Null => SnmpValue::Null,
        Value::NoSuchObject => SnmpValue::NoSuchObject,
        Value::NoSuchInstance => SnmpValue::NoSuchInstance,
        Value::EndOfMibView => SnmpValue::EndOfMibView,
        Value::Boolean(b) => SnmpValue::Other {
            type_name: "Boolean",
            raw: b.to_string(),
        },
        Value::Opaque(bytes) => SnmpValue::Other {
            type_name: "Opaque",
            raw: format!("{bytes:02x?}"),
        },
        other => SnmpValue::Other {
            type_name: "Unknown",
            raw: format!("{other:?}"),
        },
    }
}

fn request_error(e: snmp2::Error) -> SessionError {
    SessionError::Request(describe(&e))
}

fn describe(e: &snmp2::Error) -> String {
    match e {
        snmp2::Error::Receive => "no response from agent".to_string(),
        snmp2::Error::Send => "could not send request".to_string(),
        snmp2::Error::AuthFailure(kind) => format!("authentication failed: {kind}"),
        snmp2::Error::CommunityMismatch => "community string rejected".to_string(),
        other => other.to_string(),
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
