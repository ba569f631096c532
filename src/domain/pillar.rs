// Copyright (c) 2025 - Cowboy AI, Inc.
//! Well-Architected Pillar Taxonomy
//!
//! The six pillars every lab stack is filed under. Pillar tokens appear in
//! resource names and in the `WA-Pillar` tag, so their canonical string form
//! is part of the naming contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-Architected Framework pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    /// Operational excellence
    Operations,
    /// Security
    Security,
    /// Reliability
    Reliability,
    /// Performance efficiency
    Performance,
    /// Cost optimization
    Cost,
    /// Sustainability
    Sustainability,
}

impl Pillar {
    /// All six pillars in canonical order
    pub const ALL: [Pillar; 6] = [
        Self::Operations,
        Self::Security,
        Self::Reliability,
        Self::Performance,
        Self::Cost,
        Self::Sustainability,
    ];

    /// Get the canonical lowercase token used in resource names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::Security => "security",
            Self::Reliability => "reliability",
            Self::Performance => "performance",
            Self::Cost => "cost",
            Self::Sustainability => "sustainability",
        }
    }

    /// Get the full framework pillar name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Operations => "Operational Excellence",
            Self::Security => "Security",
            Self::Reliability => "Reliability",
            Self::Performance => "Performance Efficiency",
            Self::Cost => "Cost Optimization",
            Self::Sustainability => "Sustainability",
        }
    }

    /// Parse from a string token, accepting common aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "operations" | "ops" | "operational_excellence" => Some(Self::Operations),
            "security" | "sec" => Some(Self::Security),
            "reliability" => Some(Self::Reliability),
            "performance" | "perf" | "performance_efficiency" => Some(Self::Performance),
            "cost" | "cost_optimization" => Some(Self::Cost),
            "sustainability" => Some(Self::Sustainability),
            _ => None,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillar_tokens_are_lowercase() {
        for pillar in Pillar::ALL {
            assert_eq!(pillar.as_str(), pillar.as_str().to_lowercase());
        }
    }

    #[test]
    fn test_pillar_parsing() {
        assert_eq!(Pillar::parse("performance"), Some(Pillar::Performance));
        assert_eq!(Pillar::parse("perf"), Some(Pillar::Performance));
        assert_eq!(Pillar::parse("OPERATIONS"), Some(Pillar::Operations));
        assert_eq!(Pillar::parse("resilience"), None);
    }

    #[test]
    fn test_parse_round_trips_canonical_tokens() {
        for pillar in Pillar::ALL {
            assert_eq!(Pillar::parse(pillar.as_str()), Some(pillar));
        }
    }

    #[test]
    fn test_display_uses_token() {
        assert_eq!(Pillar::Cost.to_string(), "cost");
        assert_eq!(Pillar::Cost.display_name(), "Cost Optimization");
    }
}
