// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared Construct Wrappers
//!
//! The reusable building blocks lab stacks compose: a bucket with a sealed
//! security bundle and a fixed three-tier network. Both follow the same
//! pattern: secure/standard defaults as the base case, a small options
//! struct with narrow override points, and no partial-bundle configuration.

pub mod secure_bucket;
pub mod standard_vpc;

pub use secure_bucket::{SecureBucket, SecureBucketOptions};
pub use standard_vpc::{StandardVpc, StandardVpcOptions, SubnetTier};
