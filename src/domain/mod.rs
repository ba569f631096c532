// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lab Domain Models
//!
//! Core vocabulary shared by every lab stack: canonical naming, the pillar
//! taxonomy, the tag vocabulary, and network value objects with validation
//! invariants.
//!
//! # Value Objects and Utilities
//!
//! - [`naming`] - Lowercase resource names, capitalized stack names
//! - [`Pillar`] - Well-Architected pillar taxonomy
//! - [`tags`] - Canonical tag keys plus cost/expiry subtree helpers
//! - [`Ipv4Cidr`] - IPv4 address block with deterministic subnet carving

pub mod naming;
pub mod network;
pub mod pillar;
pub mod tags;

// Re-export value objects
pub use network::{Ipv4Cidr, NetworkError};
pub use pillar::Pillar;
pub use tags::TagMap;
