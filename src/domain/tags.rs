// Copyright (c) 2025 - Cowboy AI, Inc.
//! Canonical Tag Keys and Tag Application Helpers
//!
//! Defines the tag vocabulary every lab stack stamps onto its resources and
//! the cost/expiry helpers labs apply to whole subtrees. Application mutates
//! the subtree's pending tag state; resolution to per-resource tag sets
//! happens at synthesis (ancestor tags inherited, nearer scopes win,
//! resource-level values win over everything).

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::tree::Scope;

/// Ordered tag key/value map
///
/// Ordered so rendered templates are deterministic.
pub type TagMap = BTreeMap<String, String>;

/// Tag key for the owning project
pub const PROJECT: &str = "Project";

/// Tag key for the deployment environment
pub const ENVIRONMENT: &str = "Environment";

/// Tag key naming what manages the resource
pub const MANAGED_BY: &str = "ManagedBy";

/// Tag key for the Well-Architected pillar a lab belongs to
pub const PILLAR: &str = "WA-Pillar";

/// Tag key for the stack creation date
pub const CREATED_AT: &str = "CreatedAt";

/// Tag key for cost attribution
pub const COST_CENTER: &str = "CostCenter";

/// Tag key marking a subtree for scheduled cleanup
pub const AUTO_DELETE: &str = "AutoDelete";

/// Tag key carrying the cleanup date
pub const EXPIRES_ON: &str = "ExpiresOn";

/// Value stamped under [`MANAGED_BY`]
pub const MANAGED_BY_VALUE: &str = "framework";

/// Default number of days before an auto-delete subtree expires
pub const DEFAULT_EXPIRY_DAYS: u64 = 7;

/// Tag every resource under the scope with a cost center
pub fn apply_cost_tags(scope: &mut Scope<'_>, cost_center: &str) {
    scope.apply_tag(COST_CENTER, cost_center);
}

/// Mark every resource under the scope for scheduled cleanup
///
/// Stamps `AutoDelete=true` and `ExpiresOn=<today + days>` (ISO date) from
/// the owning application's clock.
pub fn apply_auto_delete_tags(scope: &mut Scope<'_>, days_until_expiry: u64) {
    let expires_on = expiry_date(scope.today(), days_until_expiry);
    scope.apply_tag(AUTO_DELETE, "true");
    scope.apply_tag(EXPIRES_ON, &expires_on.to_string());
}

/// Compute the expiry date for an auto-delete subtree
pub fn expiry_date(today: NaiveDate, days_until_expiry: u64) -> NaiveDate {
    today
        .checked_add_days(Days::new(days_until_expiry))
        .unwrap_or(today)
}
