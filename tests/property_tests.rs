// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to verify the naming contracts
//! that must hold for all valid inputs across the lab stacks.

mod property;
