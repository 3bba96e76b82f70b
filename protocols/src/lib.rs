//! Network services the scanner talks through: ICMP liveness probing and SNMP
//! sessions. Both sit behind traits so the scan logic never touches a socket.

pub mod icmp;
pub mod snmp;
