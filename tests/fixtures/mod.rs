// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for wa-handson
//!
//! Deterministic builders for synthesis tests. The application clock is
//! always pinned, so rendered templates are byte-identical across runs.
//!
//! # Design Principles
//! - All test data is deterministic (no `Utc::now()` anywhere)
//! - Fixtures are the ONLY place that constructs pinned applications
//! - Tests use fixtures, never direct clock wiring

use chrono::NaiveDate;
use std::sync::Arc;

use wa_handson::app::{App, AppProps};
use wa_handson::clock::FixedClock;
use wa_handson::domain::Pillar;
use wa_handson::stack::{Stack, StackProps};

/// Fixed test date (2026-01-19)
pub const FIXED_DATE: &str = "2026-01-19";

/// Expiry of the default auto-delete window starting from [`FIXED_DATE`]
pub const FIXED_EXPIRY: &str = "2026-01-26";

/// Parse the fixed date
pub fn fixed_date() -> NaiveDate {
    NaiveDate::parse_from_str(FIXED_DATE, "%Y-%m-%d").expect("Invalid date in test fixture")
}

/// Application pinned to the fixed date
pub fn fixed_app() -> App {
    App::with_clock(
        AppProps::default(),
        Arc::new(FixedClock::at_date(fixed_date())),
    )
}

/// Stack on a pinned application with the given pillar
pub fn pillar_stack(app: &App, pillar: Pillar, name: &str) -> Stack {
    Stack::new(
        app,
        name,
        StackProps {
            pillar: Some(pillar),
            ..StackProps::default()
        },
    )
}
