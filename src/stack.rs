// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tagged Base Stack
//!
//! Every lab stack is created through [`Stack::new`], which stamps the
//! project tag set (`Project`, `Environment`, `ManagedBy`, optional
//! `WA-Pillar`, `CreatedAt`) onto the stack root so every descendant
//! resource inherits it transitively. Resource-level tags override inherited
//! ones at synthesis.
//!
//! `CreatedAt` is read from the owning application's clock, never from
//! ambient time, so synthesis with a pinned clock is fully reproducible.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::app::App;
use crate::clock::Clock;
use crate::domain::{naming, tags, Pillar};
use crate::errors::{SynthError, SynthResult};
use crate::tree::{ConstructPath, Resource, ResourceHandle, ResourceNode, Scope};

/// Properties for a lab stack
#[derive(Debug, Clone)]
pub struct StackProps {
    /// Owning project, stamped as the `Project` tag
    pub project_name: String,
    /// Deployment environment, stamped as the `Environment` tag
    pub environment: String,
    /// Well-Architected pillar, stamped as the `WA-Pillar` tag when present
    pub pillar: Option<Pillar>,
    /// Human-readable template description
    pub description: Option<String>,
}

impl Default for StackProps {
    fn default() -> Self {
        Self {
            project_name: naming::PROJECT_PREFIX.to_string(),
            environment: "dev".to_string(),
            pillar: None,
            description: None,
        }
    }
}

/// A subtree tag recorded at a construct path
#[derive(Debug, Clone)]
pub(crate) struct SubtreeTag {
    pub(crate) path: ConstructPath,
    pub(crate) key: String,
    pub(crate) value: String,
}

/// A named stack output
#[derive(Debug, Clone)]
pub(crate) struct StackOutput {
    pub(crate) value: Value,
    pub(crate) description: Option<String>,
}

/// One lab stack: a named construct tree plus its pending tags and outputs
///
/// # Examples
///
/// ```rust
/// use wa_handson::app::{App, AppProps};
/// use wa_handson::domain::Pillar;
/// use wa_handson::stack::{Stack, StackProps};
/// use wa_handson::tree::Resource;
///
/// let mut app = App::new(AppProps::default());
/// let mut stack = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps {
///     pillar: Some(Pillar::Security),
///     ..StackProps::default()
/// });
///
/// let mut root = stack.root();
/// root.add("Trail", Resource::new("AWS::CloudTrail::Trail")).unwrap();
/// app.add_stack(stack).unwrap();
/// ```
#[derive(Debug)]
pub struct Stack {
    name: String,
    project_name: String,
    environment: String,
    pillar: Option<Pillar>,
    description: Option<String>,
    region: String,
    clock: Arc<dyn Clock>,
    resources: IndexMap<String, ResourceNode>,
    subtree_tags: Vec<SubtreeTag>,
    outputs: BTreeMap<String, StackOutput>,
}

impl Stack {
    /// Create a stack under the given application and stamp its tag set
    pub fn new(app: &App, name: &str, props: StackProps) -> Self {
        let mut stack = Self {
            name: name.to_string(),
            project_name: props.project_name,
            environment: props.environment,
            pillar: props.pillar,
            description: props.description,
            region: app.region().to_string(),
            clock: app.clock(),
            resources: IndexMap::new(),
            subtree_tags: Vec::new(),
            outputs: BTreeMap::new(),
        };

        debug!("Creating stack {}", stack.name);

        let root = ConstructPath::root();
        let project = stack.project_name.clone();
        let environment = stack.environment.clone();
        let created_at = stack.clock.today().to_string();

        stack.record_subtree_tag(root.clone(), tags::PROJECT, &project);
        stack.record_subtree_tag(root.clone(), tags::ENVIRONMENT, &environment);
        stack.record_subtree_tag(root.clone(), tags::MANAGED_BY, tags::MANAGED_BY_VALUE);
        if let Some(pillar) = stack.pillar {
            stack.record_subtree_tag(root.clone(), tags::PILLAR, pillar.as_str());
        }
        stack.record_subtree_tag(root, tags::CREATED_AT, &created_at);

        stack
    }

    /// The stack's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning project name
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The deployment environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The stack's pillar, if declared
    pub fn pillar(&self) -> Option<Pillar> {
        self.pillar
    }

    /// The template description, if declared
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The owning application's region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Today's date from the owning application's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Open the root scope for composition
    pub fn root(&mut self) -> Scope<'_> {
        Scope::new(self, ConstructPath::root())
    }

    /// Number of resources declared so far
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Iterate the declared resources in insertion order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resources.values()
    }

    /// Declare a named output rendered into the stack's template
    ///
    /// Outputs are write-only operator values (endpoint addresses, table
    /// names); nothing in-process reads them back.
    pub fn add_output(
        &mut self,
        name: &str,
        value: Value,
        description: Option<&str>,
    ) -> SynthResult<()> {
        if self.outputs.contains_key(name) {
            return Err(SynthError::DuplicateOutput(name.to_string()));
        }

        self.outputs.insert(
            name.to_string(),
            StackOutput {
                value,
                description: description.map(|d| d.to_string()),
            },
        );

        Ok(())
    }

    pub(crate) fn insert_node(
        &mut self,
        path: ConstructPath,
        resource: Resource,
    ) -> SynthResult<ResourceHandle> {
        let logical_id = path.logical_id();

        if self.resources.contains_key(&logical_id) {
            return Err(SynthError::DuplicateLogicalId(logical_id));
        }

        debug!("Adding resource {} at {}", logical_id, path);

        let node = resource.into_node(path, logical_id.clone());
        self.resources.insert(logical_id.clone(), node);

        Ok(ResourceHandle::new(logical_id))
    }

    pub(crate) fn record_subtree_tag(&mut self, path: ConstructPath, key: &str, value: &str) {
        self.subtree_tags.push(SubtreeTag {
            path,
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub(crate) fn nodes(&self) -> &IndexMap<String, ResourceNode> {
        &self.resources
    }

    pub(crate) fn subtree_tags(&self) -> &[SubtreeTag] {
        &self.subtree_tags
    }

    pub(crate) fn stack_outputs(&self) -> &BTreeMap<String, StackOutput> {
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppProps;
    use crate::clock::FixedClock;
    use serde_json::json;

    fn fixed_app() -> App {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        App::with_clock(AppProps::default(), Arc::new(FixedClock::at_date(date)))
    }

    #[test]
    fn test_stack_stamps_root_tags() {
        let app = fixed_app();
        let stack = Stack::new(
            &app,
            "WaHandson-Dev-Security-AuditStack",
            StackProps {
                pillar: Some(Pillar::Security),
                ..StackProps::default()
            },
        );

        let stamped: Vec<(String, String)> = stack
            .subtree_tags()
            .iter()
            .map(|t| (t.key.clone(), t.value.clone()))
            .collect();

        assert!(stamped.contains(&("Project".to_string(), "wa-handson".to_string())));
        assert!(stamped.contains(&("Environment".to_string(), "dev".to_string())));
        assert!(stamped.contains(&("ManagedBy".to_string(), "framework".to_string())));
        assert!(stamped.contains(&("WA-Pillar".to_string(), "security".to_string())));
        assert!(stamped.contains(&("CreatedAt".to_string(), "2026-01-19".to_string())));

        // Every stamp sits at the stack root
        assert!(stack.subtree_tags().iter().all(|t| t.path.depth() == 0));
    }

    #[test]
    fn test_stack_without_pillar_skips_pillar_tag() {
        let app = fixed_app();
        let stack = Stack::new(&app, "WaHandson-Dev-Shared-BaseStack", StackProps::default());

        assert!(stack.subtree_tags().iter().all(|t| t.key != "WA-Pillar"));
        assert_eq!(stack.subtree_tags().len(), 4);
    }

    #[test]
    fn test_duplicate_logical_id_rejected() {
        let app = fixed_app();
        let mut stack = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());

        let mut root = stack.root();
        root.add("Bucket", crate::tree::Resource::new("AWS::S3::Bucket"))
            .unwrap();
        let err = root
            .add("Bucket", crate::tree::Resource::new("AWS::S3::Bucket"))
            .unwrap_err();

        assert!(matches!(err, SynthError::DuplicateLogicalId(id) if id == "Bucket"));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let app = fixed_app();
        let mut stack = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());

        stack
            .add_output("BucketName", json!("wa-handson-dev-security-bucket"), None)
            .unwrap();
        let err = stack
            .add_output("BucketName", json!("other"), None)
            .unwrap_err();

        assert!(matches!(err, SynthError::DuplicateOutput(name) if name == "BucketName"));
    }
}
