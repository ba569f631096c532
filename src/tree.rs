// Copyright (c) 2025 - Cowboy AI, Inc.
//! Construct Tree Primitives
//!
//! The in-memory model every lab stack is assembled from: construct paths
//! with deterministic logical ids, resource declarations built up through a
//! small builder, scopes for nested composition, and handles that render
//! `Ref`/`Fn::GetAtt` markers into property JSON.
//!
//! Logical ids are derived from paths by concatenating sanitized segments.
//! There is no hash-based disambiguation: two constructs resolving to the
//! same logical id is a modeling bug and surfaces as a hard error when the
//! second one is added.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::domain::tags::TagMap;
use crate::domain::Pillar;
use crate::errors::SynthResult;
use crate::stack::Stack;

// ============================================================================
// Construct paths
// ============================================================================

/// Path of a construct relative to its stack root
///
/// Displayed as `Network/Vpc`; the stack root is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConstructPath {
    segments: Vec<String>,
}

impl ConstructPath {
    /// The stack root path
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Path segments from the stack root
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Check whether this path is a (non-strict) prefix of another
    pub fn is_prefix_of(&self, other: &ConstructPath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Derive the logical id for a resource at this path
    ///
    /// Segments are stripped to ASCII alphanumerics and concatenated, so
    /// `Network/Vpc` becomes `NetworkVpc`. Deterministic by construction.
    pub fn logical_id(&self) -> String {
        self.segments
            .iter()
            .map(|segment| {
                segment
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
            })
            .collect()
    }
}

impl fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

// ============================================================================
// Removal policy
// ============================================================================

/// Disposition of a stateful resource when its stack is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalPolicy {
    /// Keep the resource after stack deletion
    Retain,
    /// Delete the resource with the stack
    #[serde(rename = "Delete")]
    Destroy,
}

impl RemovalPolicy {
    /// Get the deletion-policy token rendered into templates
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "Retain",
            Self::Destroy => "Delete",
        }
    }
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Resource declarations
// ============================================================================

/// A resource declaration under construction
///
/// Built up with chained setters and handed to [`Scope::add`], which turns
/// it into a node of the stack's construct tree.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use wa_handson::tree::{RemovalPolicy, Resource};
///
/// let table = Resource::new("AWS::DynamoDB::Table")
///     .with_property("BillingMode", "PAY_PER_REQUEST")
///     .with_property("KeySchema", json!([{ "AttributeName": "id", "KeyType": "HASH" }]))
///     .with_removal_policy(RemovalPolicy::Destroy);
/// ```
#[derive(Debug, Clone)]
pub struct Resource {
    resource_type: String,
    properties: Map<String, Value>,
    tags: TagMap,
    depends_on: Vec<String>,
    removal_policy: Option<RemovalPolicy>,
}

impl Resource {
    /// Start a declaration of the given resource type
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: Map::new(),
            tags: TagMap::new(),
            depends_on: Vec::new(),
            removal_policy: None,
        }
    }

    /// Set a property value
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set a resource-level tag (wins over every inherited tag)
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Declare an explicit ordering dependency on another resource
    ///
    /// Needed only where property references cannot carry the ordering,
    /// such as a property holding another resource's name string.
    pub fn depends_on(mut self, handle: &ResourceHandle) -> Self {
        self.depends_on.push(handle.logical_id().to_string());
        self
    }

    /// Set the removal policy
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = Some(policy);
        self
    }

    pub(crate) fn into_node(self, path: ConstructPath, logical_id: String) -> ResourceNode {
        ResourceNode {
            logical_id,
            path,
            resource_type: self.resource_type,
            properties: self.properties,
            tags: self.tags,
            depends_on: self.depends_on,
            removal_policy: self.removal_policy,
        }
    }
}

/// A resource node in a stack's construct tree
#[derive(Debug, Clone)]
pub struct ResourceNode {
    pub(crate) logical_id: String,
    pub(crate) path: ConstructPath,
    pub(crate) resource_type: String,
    pub(crate) properties: Map<String, Value>,
    pub(crate) tags: TagMap,
    pub(crate) depends_on: Vec<String>,
    pub(crate) removal_policy: Option<RemovalPolicy>,
}

impl ResourceNode {
    /// The node's logical id
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// The node's construct path
    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// The declared resource type token
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The declared properties
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Resource-level tags
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// Explicit ordering dependencies
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// The declared removal policy, if any
    pub fn removal_policy(&self) -> Option<RemovalPolicy> {
        self.removal_policy
    }
}

// ============================================================================
// Resource handles
// ============================================================================

/// Reference to a resource already added to a stack
///
/// Handles render property markers that the synthesizer later resolves into
/// implicit ordering edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    logical_id: String,
}

impl ResourceHandle {
    pub(crate) fn new(logical_id: String) -> Self {
        Self { logical_id }
    }

    /// The referenced resource's logical id
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Render a `Ref` marker to this resource
    pub fn reference(&self) -> Value {
        json!({ "Ref": self.logical_id })
    }

    /// Render a `Fn::GetAtt` marker to an attribute of this resource
    pub fn get_att(&self, attribute: &str) -> Value {
        json!({ "Fn::GetAtt": [self.logical_id, attribute] })
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// A mutable view of a stack at one construct path
///
/// Composition descends through [`Scope::child`]; every resource added
/// through a scope lands at the scope's path plus the resource's own id.
/// Subtree tags applied here are inherited by every descendant resource at
/// synthesis, with nearer scopes and resource-level tags winning.
pub struct Scope<'a> {
    stack: &'a mut Stack,
    path: ConstructPath,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(stack: &'a mut Stack, path: ConstructPath) -> Self {
        Self { stack, path }
    }

    /// This scope's construct path
    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// Descend into a child scope
    pub fn child(&mut self, segment: &str) -> Scope<'_> {
        Scope {
            path: self.path.child(segment),
            stack: &mut *self.stack,
        }
    }

    /// Add a resource under this scope
    ///
    /// Rejects additions whose derived logical id collides with an existing
    /// resource in the stack.
    pub fn add(&mut self, id: &str, resource: Resource) -> SynthResult<ResourceHandle> {
        let path = self.path.child(id);
        self.stack.insert_node(path, resource)
    }

    /// Tag every resource under this scope's subtree
    pub fn apply_tag(&mut self, key: &str, value: &str) {
        self.stack.record_subtree_tag(self.path.clone(), key, value);
    }

    /// The owning stack's project name
    pub fn project_name(&self) -> &str {
        self.stack.project_name()
    }

    /// The owning stack's environment
    pub fn environment(&self) -> &str {
        self.stack.environment()
    }

    /// The owning stack's pillar, if declared
    pub fn pillar(&self) -> Option<Pillar> {
        self.stack.pillar()
    }

    /// The owning application's region
    pub fn region(&self) -> &str {
        self.stack.region()
    }

    /// Today's date from the owning application's clock
    pub fn today(&self) -> NaiveDate {
        self.stack.today()
    }
}
