// Destination prefix parsing with host bits masked off

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use ipnet::IpNet;

/// An IP network in CIDR form, always stored with host bits cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpNetwork(IpNet);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNetwork(pub String);

impl fmt::Display for InvalidNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid network: {}", self.0)
    }
}

impl std::error::Error for InvalidNetwork {}

impl IpNetwork {
    /// Build the network containing `addr`. Host bits are tolerated and cleared.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Option<Self> {
        IpNet::new(addr, prefix_len)
            .ok()
            .map(|net| IpNetwork(net.trunc()))
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.network(), self.0.prefix_len())
    }
}

impl FromStr for IpNetwork {
    type Err = InvalidNetwork;

    /// Accepts `addr`, `addr/len` and, for IPv4, `addr/netmask`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidNetwork(s.to_string());
        let s_trim = s.trim();

        let (addr_part, len_part) = match s_trim.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (s_trim, None),
        };

        let addr: IpAddr = addr_part.parse().map_err(|_| invalid())?;
        let prefix_len = match (len_part, addr) {
            (None, IpAddr::V4(_)) => 32,
            (None, IpAddr::V6(_)) => 128,
            (Some(len), _) if !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()) => {
                len.parse::<u8>().map_err(|_| invalid())?
            }
            (Some(mask), IpAddr::V4(_)) => {
                let mask: Ipv4Addr = mask.parse().map_err(|_| invalid())?;
                ipnet::ipv4_mask_to_prefix(mask).map_err(|_| invalid())?
            }
            _ => return Err(invalid()),
        };

        IpNetwork::new(addr, prefix_len).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<IpNetwork, InvalidNetwork> {
        s.parse()
    }

    #[test]
    fn test_host_bits_are_cleared() {
        assert_eq!(parse("10.0.0.5/24").unwrap().to_string(), "10.0.0.0/24");
        assert_eq!(parse("192.168.1.130/25").unwrap().to_string(), "192.168.1.128/25");
        assert_eq!(parse("2001:db8::1/64").unwrap().to_string(), "2001:db8::/64");
        assert_eq!(parse(" 172.16.9.9/12 ").unwrap().to_string(), "172.16.0.0/12");
    }

    #[test]
    fn test_bare_address_is_host_route() {
        assert_eq!(parse("10.1.2.3").unwrap().to_string(), "10.1.2.3/32");
        assert_eq!(parse("::1").unwrap().to_string(), "::1/128");
    }

    #[test]
    fn test_edge_lengths() {
        assert_eq!(parse("8.8.8.8/0").unwrap().to_string(), "0.0.0.0/0");
        assert_eq!(parse("8.8.8.8/32").unwrap().to_string(), "8.8.8.8/32");
        assert_eq!(parse("2001:db8::1/0").unwrap().to_string(), "::/0");
        assert!(parse("10.0.0.0/33").is_err());
        assert!(parse("::/129").is_err());
        assert!(parse("10.0.0.0/").is_err());
        assert!(parse("10.0.0.0/-1").is_err());
        assert!(parse("10.0.0.0/300").is_err());
    }

    #[test]
    fn test_netmask_notation() {
        assert_eq!(parse("10.0.0.5/255.255.255.0").unwrap().to_string(), "10.0.0.0/24");
        assert_eq!(parse("10.0.0.5/255.255.240.0").unwrap().to_string(), "10.0.0.0/20");
        assert_eq!(parse("10.0.0.5/0.0.0.0").unwrap().to_string(), "0.0.0.0/0");
        assert!(parse("10.0.0.5/255.0.255.0").is_err());
        assert!(parse("2001:db8::/255.255.0.0").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("not-an-ip").is_err());
        assert!(parse("").is_err());
        assert!(parse("300.1.1.1/8").is_err());
    }
}
