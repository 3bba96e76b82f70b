use pnet::util::MacAddr;

/// Renders a 6-byte value as a hardware address: upper-case hex pairs joined by colons.
///
/// Returns `None` for any other length.
pub fn format_hardware_addr(bytes: &[u8]) -> Option<String> {
    let octets: [u8; 6] = bytes.try_into().ok()?;
    let mac: MacAddr = MacAddr::from(octets);
    Some(mac.to_string().to_ascii_uppercase())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
