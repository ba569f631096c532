// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-Pillar Lab Stacks
//!
//! One composition per Well-Architected pillar, each building exactly one
//! stack with a fixed properties object on the shared layer (naming, tags,
//! base stack, constructs). Labs are pure composition: every interesting
//! behavior lives in the managed services they declare, not here.
//!
//! Each `build` registers its stack on the application and returns the
//! stack name so entry points can pull the rendered template back out of
//! the assembly.

pub mod cost;
pub mod operations;
pub mod performance;
pub mod reliability;
pub mod security;
pub mod sustainability;

/// Environment every lab composition deploys into
pub const ENVIRONMENT: &str = "dev";
