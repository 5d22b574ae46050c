//! Seed Node Configuration
//!
//! Bootstrap hints for initial peer discovery: DNS seeds resolved at
//! connection time and fixed addresses compiled into the binary.

use rand::Rng;
use serde::Serialize;
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6};
use std::time::{SystemTime, UNIX_EPOCH};

const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

/// A DNS seed: a display name and the host to query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// Compiled-in seed: 16-byte IPv6 address (IPv4 mapped allowed) and port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

/// A fixed seed ready for the address manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAddress {
    pub addr: SocketAddr,
    /// Advertised "last seen" time
    pub time: u64,
}

/// Convert seed specs into addresses.
///
/// Seeds get a random last-seen time between one and two weeks ago so they
/// rank below addresses learned from live peers.
pub fn convert_seed6(specs: &[SeedSpec6]) -> Vec<SeedAddress> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut rng = rand::thread_rng();

    specs
        .iter()
        .map(|spec| {
            let ip = Ipv6Addr::from(spec.addr);
            let addr = match ip.to_ipv4_mapped() {
                Some(v4) => SocketAddr::from((v4, spec.port)),
                None => SocketAddr::V6(SocketAddrV6::new(ip, spec.port, 0, 0)),
            };
            let age = ONE_WEEK + rng.gen_range(0..ONE_WEEK);
            SeedAddress {
                addr,
                time: now.saturating_sub(age),
            }
        })
        .collect()
}

/// Fixed seeds for the production network
pub const MAIN_FIXED_SEEDS: &[SeedSpec6] = &[];

/// Fixed seeds for the public test network
pub const TEST_FIXED_SEEDS: &[SeedSpec6] = &[];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_ipv4_mapped_seed() {
        let mut addr = [0u8; 16];
        addr[10] = 0xff;
        addr[11] = 0xff;
        addr[12..].copy_from_slice(&[127, 0, 0, 1]);
        let seeds = convert_seed6(&[SeedSpec6 { addr, port: 9488 }]);

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].addr.to_string(), "127.0.0.1:9488");
    }

    #[test]
    fn test_convert_ipv6_seed() {
        let ip: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let seeds = convert_seed6(&[SeedSpec6 { addr: ip.octets(), port: 19488 }]);
        assert_eq!(seeds[0].addr.to_string(), "[2001:db8::1]:19488");
    }

    #[test]
    fn test_seed_time_is_one_to_two_weeks_old() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let specs = vec![SeedSpec6 { addr: [0u8; 16], port: 1 }; 32];
        for seed in convert_seed6(&specs) {
            let age = now.saturating_sub(seed.time);
            assert!(age >= ONE_WEEK - 5, "age {age} too small");
            assert!(age <= 2 * ONE_WEEK + 5, "age {age} too large");
        }
    }

    #[test]
    fn test_shipped_tables_are_empty() {
        assert!(convert_seed6(MAIN_FIXED_SEEDS).is_empty());
        assert!(convert_seed6(TEST_FIXED_SEEDS).is_empty());
    }
}
