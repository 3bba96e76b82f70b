use super::ObjectId;

/// A decoded SNMP value, owned and detached from the response buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    /// `OCTET STRING`, raw bytes.
    OctetString(Vec<u8>),
    /// Values agents report as text: object identifiers and IP addresses.
    Text(String),
    /// `INTEGER`.
    Integer(i64),
    /// `Counter32`, `Gauge32`/`Unsigned32`, `TimeTicks` and `Counter64`.
    Unsigned(u64),
    Null,
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    /// Anything else, kept printable together with its type name.
    Other { type_name: &'static str, raw: String },
}

impl SnmpValue {
    /// True for the placeholders an agent returns instead of a value.
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            SnmpValue::Null
                | SnmpValue::NoSuchObject
                | SnmpValue::NoSuchInstance
                | SnmpValue::EndOfMibView
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub oid: ObjectId,
    pub value: SnmpValue,
}

impl VarBind {
    pub fn new(oid: ObjectId, value: SnmpValue) -> Self {
        Self { oid, value }
    }
}
