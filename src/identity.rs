//! Host Identity
//!
//! Resolves the hostname and management addresses every sample is tagged with.
//! Management addresses come from the interfaces named `ma1` (front-panel
//! management port) or `eth0`:
//!
//! - an IPv4 address becomes the management IPv4 (last one wins). IPv4-mapped
//!   IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4.
//! - a global-unicast IPv6 address becomes the management IPv6 (last one wins)
//!
//! Addresses keep their prefix length (`10.1.1.5/24`). A host with neither
//! interface resolves to empty management addresses, which is not an error.

use crate::error::IdentityError;
use nix::ifaddrs::getifaddrs;
use nix::sys::socket::SockaddrStorage;
use std::net::{IpAddr, Ipv6Addr, SocketAddrV4, SocketAddrV6};
use tracing::{debug, warn};

const MANAGEMENT_INTERFACES: [&str; 2] = ["ma1", "eth0"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub hostname: String,
    pub mgmt_ipv4: String,
    pub mgmt_ipv6: String,
}

/// One address assigned to a local interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub interface: String,
    pub ip: IpAddr,
    pub prefix_len: u8,
}

impl InterfaceAddr {
    pub fn new(interface: impl Into<String>, ip: IpAddr, prefix_len: u8) -> Self {
        Self {
            interface: interface.into(),
            ip,
            prefix_len,
        }
    }

    pub fn cidr(&self) -> String {
        format!("{}/{}", self.ip, self.prefix_len)
    }
}

/// Resolve hostname and management addresses of the local host
pub fn resolve_identity() -> Result<Identity, IdentityError> {
    let hostname = local_hostname();
    let addrs = interface_addrs()?;
    let (mgmt_ipv4, mgmt_ipv6) = select_management_addrs(&addrs);
    debug!("ipv4 = {} ipv6 = {}", mgmt_ipv4, mgmt_ipv6);

    Ok(Identity {
        hostname,
        mgmt_ipv4,
        mgmt_ipv6,
    })
}

/// Local hostname, empty if the OS refuses to tell
pub fn local_hostname() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("Hostname get error: {}", e);
            String::new()
        }
    }
}

/// Pick management IPv4/IPv6 strings out of the host's interface addresses
pub fn select_management_addrs(addrs: &[InterfaceAddr]) -> (String, String) {
    let mut ipv4 = String::new();
    let mut ipv6 = String::new();

    for addr in addrs
        .iter()
        .filter(|a| MANAGEMENT_INTERFACES.contains(&a.interface.as_str()))
    {
        match addr.ip {
            IpAddr::V4(_) => ipv4 = addr.cidr(),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => ipv4 = format!("{}/{}", v4, addr.prefix_len.saturating_sub(96)),
                None if is_global_unicast(&v6) => ipv6 = addr.cidr(),
                None => {}
            },
        }
    }

    (ipv4, ipv6)
}

/// Any unicast address outside loopback and link-local scope.
///
/// Unique-local (`fc00::/7`) addresses count as global unicast here.
pub fn is_global_unicast(ip: &Ipv6Addr) -> bool {
    let link_local = (ip.segments()[0] & 0xffc0) == 0xfe80;
    !(ip.is_unspecified() || ip.is_loopback() || ip.is_multicast() || link_local)
}

fn interface_addrs() -> Result<Vec<InterfaceAddr>, IdentityError> {
    let mut out = Vec::new();
    for ifaddr in getifaddrs()? {
        let Some(address) = ifaddr.address.as_ref() else {
            continue;
        };
        let Some(ip) = sockaddr_ip(address) else {
            continue;
        };
        let prefix_len = ifaddr
            .netmask
            .as_ref()
            .and_then(sockaddr_ip)
            .map(netmask_prefix_len)
            .unwrap_or(match ip {
                IpAddr::V4(_) => 32,
                IpAddr::V6(_) => 128,
            });
        out.push(InterfaceAddr::new(ifaddr.interface_name, ip, prefix_len));
    }
    Ok(out)
}

fn sockaddr_ip(addr: &SockaddrStorage) -> Option<IpAddr> {
    if let Some(v4) = addr.as_sockaddr_in() {
        return Some(IpAddr::V4(*SocketAddrV4::from(*v4).ip()));
    }
    addr.as_sockaddr_in6()
        .map(|v6| IpAddr::V6(*SocketAddrV6::from(*v6).ip()))
}

/// Number of leading one bits in a netmask
pub fn netmask_prefix_len(mask: IpAddr) -> u8 {
    match mask {
        IpAddr::V4(m) => u32::from(m).leading_ones() as u8,
        IpAddr::V6(m) => u128::from(m).leading_ones() as u8,
    }
}
