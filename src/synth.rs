// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack Synthesis Pipeline
//!
//! One synchronous pass from a composed stack to its rendered template:
//! resolve per-resource tags from the recorded subtree stamps, build the
//! dependency graph from explicit hints and property references, order it
//! topologically, and render resources in that order. The pass is pure
//! except for tracing diagnostics, so synthesizing the same stack twice
//! yields identical templates.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::domain::tags::TagMap;
use crate::errors::{SynthError, SynthResult};
use crate::graph::{collect_references, DependencyGraph};
use crate::stack::Stack;
use crate::template::{Template, TemplateMetadata, TemplateOutput, TemplateResource};
use crate::tree::ResourceNode;

/// Render one stack into its template
pub fn synthesize_stack(stack: &Stack) -> SynthResult<Template> {
    debug!("Synthesizing stack {}", stack.name());

    let graph = build_graph(stack)?;
    validate_output_references(stack, &graph)?;
    let provision_order = graph.provision_order()?;

    let mut resources = IndexMap::new();
    for logical_id in &provision_order {
        let Some(node) = stack.nodes().get(logical_id) else {
            continue;
        };

        resources.insert(
            logical_id.clone(),
            TemplateResource {
                resource_type: node.resource_type().to_string(),
                properties: node.properties().clone(),
                depends_on: node.depends_on().to_vec(),
                deletion_policy: node.removal_policy(),
                tags: resolve_tags(stack, node),
            },
        );
    }

    let outputs = stack
        .stack_outputs()
        .iter()
        .map(|(name, output)| {
            (
                name.clone(),
                TemplateOutput {
                    value: output.value.clone(),
                    description: output.description.clone(),
                },
            )
        })
        .collect();

    info!(
        "Synthesized stack {} ({} resources, {} outputs)",
        stack.name(),
        resources.len(),
        stack.stack_outputs().len()
    );

    Ok(Template {
        description: stack.description().map(str::to_string),
        metadata: TemplateMetadata {
            stack_name: stack.name().to_string(),
            region: stack.region().to_string(),
            project: stack.project_name().to_string(),
            environment: stack.environment().to_string(),
            pillar: stack.pillar().map(|p| p.as_str().to_string()),
        },
        provision_order,
        resources,
        outputs,
    })
}

/// Build the dependency graph for a stack's resources
fn build_graph(stack: &Stack) -> SynthResult<DependencyGraph> {
    let mut graph = DependencyGraph::new();

    for node in stack.resources() {
        graph.add_node(node.logical_id());
    }

    for node in stack.resources() {
        for dependency in node.depends_on() {
            graph.add_explicit(node.logical_id(), dependency)?;
        }
        for value in node.properties().values() {
            for reference in collect_references(value) {
                graph.add_reference(node.logical_id(), &reference)?;
            }
        }
    }

    Ok(graph)
}

/// Reject outputs that reference resources the stack does not declare
fn validate_output_references(stack: &Stack, graph: &DependencyGraph) -> SynthResult<()> {
    for (name, output) in stack.stack_outputs() {
        for reference in collect_references(&output.value) {
            if !graph.contains(&reference) {
                return Err(SynthError::UnknownReference {
                    from: format!("Outputs.{}", name),
                    to: reference,
                });
            }
        }
    }
    Ok(())
}

/// Resolve the effective tag set for one resource
///
/// Ancestor subtree tags apply nearest-wins (deeper scopes override
/// shallower ones, later stamps at equal depth override earlier ones);
/// resource-level tags override everything inherited.
fn resolve_tags(stack: &Stack, node: &ResourceNode) -> TagMap {
    let mut applicable: Vec<_> = stack
        .subtree_tags()
        .iter()
        .filter(|stamp| stamp.path.is_prefix_of(node.path()))
        .collect();
    applicable.sort_by_key(|stamp| stamp.path.depth());

    let mut tags = TagMap::new();
    for stamp in applicable {
        tags.insert(stamp.key.clone(), stamp.value.clone());
    }
    for (key, value) in node.tags() {
        tags.insert(key.clone(), value.clone());
    }

    tags
}
