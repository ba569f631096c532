// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rendered Template Data Model
//!
//! The declarative manifest a stack synthesizes into, consumed by the
//! external provisioning engine. Resources appear in provision order, which
//! is also spelled out explicitly in `ProvisionOrder` so the downstream
//! engine never has to re-infer dependency ordering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::tags::TagMap;
use crate::errors::SynthResult;
use crate::tree::RemovalPolicy;

/// Stack-level metadata rendered into every template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateMetadata {
    pub stack_name: String,
    pub region: String,
    pub project: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pillar: Option<String>,
}

/// One rendered resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,
    pub tags: TagMap,
}

/// One rendered stack output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateOutput {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A synthesized stack template
///
/// Fully deterministic for a fixed composition and clock: resources render
/// in provision order, outputs and tag maps in sorted key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub metadata: TemplateMetadata,
    pub provision_order: Vec<String>,
    pub resources: IndexMap<String, TemplateResource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub outputs: BTreeMap<String, TemplateOutput>,
}

impl Template {
    /// Look up a rendered resource by logical id
    pub fn resource(&self, logical_id: &str) -> Option<&TemplateResource> {
        self.resources.get(logical_id)
    }

    /// Rendered resources of the given type, in provision order
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a TemplateResource)> {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.resource_type == resource_type)
    }

    /// Render as pretty-printed JSON
    pub fn to_json_pretty(&self) -> SynthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
