//! Network identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ChainParamsError;

/// The closed set of networks a node can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Production network
    Main,
    /// Public test network
    Test,
    /// Local regression-test network
    Regtest,
    /// In-process unit-test network
    Unittest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Test,
        NetworkId::Regtest,
        NetworkId::Unittest,
    ];

    /// Identifier string reported over RPC
    pub const fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Regtest => "regtest",
            NetworkId::Unittest => "unittest",
        }
    }

    /// Resolve the legacy `-testnet` / `-regtest` switches.
    ///
    /// Neither switch means main; both at once is rejected.
    pub fn from_flags(testnet: bool, regtest: bool) -> Result<Self, ChainParamsError> {
        match (testnet, regtest) {
            (true, true) => Err(ChainParamsError::ConflictingNetworkFlags),
            (true, false) => Ok(NetworkId::Test),
            (false, true) => Ok(NetworkId::Regtest),
            (false, false) => Ok(NetworkId::Main),
        }
    }

    /// Whether peers on this network ever see its message start bytes
    pub const fn is_wire_visible(&self) -> bool {
        !matches!(self, NetworkId::Unittest)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ChainParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ChainParamsError::UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_networks() {
        for id in NetworkId::ALL {
            assert_eq!(id.as_str().parse::<NetworkId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_unknown_network() {
        assert_eq!(
            "testnet3".parse::<NetworkId>(),
            Err(ChainParamsError::UnknownNetwork("testnet3".to_string()))
        );
        assert!("MAIN".parse::<NetworkId>().is_err());
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(NetworkId::from_flags(false, false), Ok(NetworkId::Main));
        assert_eq!(NetworkId::from_flags(true, false), Ok(NetworkId::Test));
        assert_eq!(NetworkId::from_flags(false, true), Ok(NetworkId::Regtest));
        assert_eq!(
            NetworkId::from_flags(true, true),
            Err(ChainParamsError::ConflictingNetworkFlags)
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&NetworkId::Unittest).unwrap();
        assert_eq!(json, "\"unittest\"");
    }
}
