// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    #[error("Subnet prefix /{requested} does not fit inside /{parent}")]
    SubnetPrefixTooShort { parent: u8, requested: u8 },

    #[error("Subnet index {index} out of range (block holds {available} subnets)")]
    SubnetIndexOutOfRange { index: u32, available: u64 },
}

/// IPv4 address block in CIDR notation value object
///
/// Represents a network block such as `10.0.0.0/16` and can carve
/// fixed-size child subnets out of itself deterministically.
/// Invariants:
/// - Prefix length 0-32
/// - Carved subnets never escape the parent block
///
/// # Examples
///
/// ```rust
/// use wa_handson::domain::Ipv4Cidr;
///
/// let block: Ipv4Cidr = "10.0.0.0/16".parse().unwrap();
/// let subnet = block.subnet(24, 3).unwrap();
/// assert_eq!(subnet.to_string(), "10.0.3.0/24");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Cidr {
    /// Default address block for standard lab networks
    pub const STANDARD_BLOCK: Ipv4Cidr = Ipv4Cidr {
        address: Ipv4Addr::new(10, 0, 0, 0),
        prefix_len: 16,
    };

    /// Create a new block with validation
    ///
    /// # Invariants
    /// - Prefix length must be 0-32
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, NetworkError> {
        if prefix_len > 32 {
            return Err(NetworkError::InvalidPrefixLength(prefix_len));
        }

        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Parse from CIDR notation (e.g., "10.0.0.0/16"); the prefix is required
    pub fn parse(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(cidr.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_len = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

        Self::new(address, prefix_len)
    }

    /// Get the block's address as written
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Get the prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get the network base address (host bits masked off)
    pub fn network_address(&self) -> Ipv4Addr {
        let mask = if self.prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix_len)
        };
        Ipv4Addr::from(u32::from(self.address) & mask)
    }

    /// Carve the index-th child subnet of the given prefix out of this block
    ///
    /// Children are dealt in address order: for `10.0.0.0/16`, `/24` index 0
    /// is `10.0.0.0/24`, index 1 is `10.0.1.0/24`, and so on.
    ///
    /// # Invariants
    /// - `new_prefix` must be at least as long as this block's prefix
    /// - `index` must address a subnet inside this block
    pub fn subnet(&self, new_prefix: u8, index: u32) -> Result<Self, NetworkError> {
        if new_prefix > 32 {
            return Err(NetworkError::InvalidPrefixLength(new_prefix));
        }

        if new_prefix < self.prefix_len {
            return Err(NetworkError::SubnetPrefixTooShort {
                parent: self.prefix_len,
                requested: new_prefix,
            });
        }

        let available = 1u64 << (new_prefix - self.prefix_len);
        if u64::from(index) >= available {
            return Err(NetworkError::SubnetIndexOutOfRange { index, available });
        }

        let block_size = 1u64 << (32 - new_prefix);
        let base = u64::from(u32::from(self.network_address()));
        let child = base + u64::from(index) * block_size;

        Ok(Self {
            address: Ipv4Addr::from(child as u32),
            prefix_len: new_prefix,
        })
    }

    /// Get as CIDR notation string
    pub fn as_cidr(&self) -> String {
        format!("{}/{}", self.address, self.prefix_len)
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cidr())
    }
}

impl FromStr for Ipv4Cidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
