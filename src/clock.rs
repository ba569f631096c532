// Copyright (c) 2025 - Cowboy AI, Inc.
//! Injected time source for reproducible synthesis

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Debug;

/// Source of the current time
///
/// Stacks stamp creation dates and expiry tags from a clock owned by the
/// application root, never from ambient time. Binaries run with
/// [`SystemClock`]; tests pin a [`FixedClock`] so repeated synthesis of the
/// same composition is byte-identical.
pub trait Clock: Debug + Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current date in UTC
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Pin the clock to the given instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Pin the clock to midnight UTC on the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            instant: date
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
