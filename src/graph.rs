// Copyright (c) 2025 - Cowboy AI, Inc.
//! Explicit Dependency Ordering
//!
//! Every resource in a stack becomes a node in a directed acyclic graph.
//! Edges come from two places: implicit references scanned out of property
//! JSON (`Ref` / `Fn::GetAtt` markers) and explicit `depends_on` hints for
//! orderings a property reference cannot carry (a property holding another
//! resource's name string, for example). The provision order handed to the
//! downstream engine is a topological sort of this graph; cycles and
//! references to unknown resources are hard synthesis errors.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::{SynthError, SynthResult};

/// Dependency graph over resource logical ids
///
/// Edges point from dependency to dependent, so a topological sort yields
/// prerequisites first.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    graph: DiGraphMap<usize, ()>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource node; registering twice is a no-op
    pub fn add_node(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            let idx = self.ids.len();
            self.ids.push(id.to_string());
            self.index.insert(id.to_string(), idx);
            self.graph.add_node(idx);
        }
    }

    /// Record an explicit `depends_on` hint
    pub fn add_explicit(&mut self, dependent: &str, dependency: &str) -> SynthResult<()> {
        let (from, to) = self.edge_indices(dependent, dependency).ok_or_else(|| {
            SynthError::UnknownDependency {
                from: dependent.to_string(),
                to: dependency.to_string(),
            }
        })?;
        self.graph.add_edge(to, from, ());
        Ok(())
    }

    /// Record an implicit edge discovered from a property reference
    pub fn add_reference(&mut self, dependent: &str, dependency: &str) -> SynthResult<()> {
        let (from, to) = self.edge_indices(dependent, dependency).ok_or_else(|| {
            SynthError::UnknownReference {
                from: dependent.to_string(),
                to: dependency.to_string(),
            }
        })?;
        self.graph.add_edge(to, from, ());
        Ok(())
    }

    /// Check whether a logical id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of recorded edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Topological provision order over all registered resources
    ///
    /// Deterministic for a fixed registration sequence. A cycle is reported
    /// through one of its participating resources.
    pub fn provision_order(&self) -> SynthResult<Vec<String>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(|idx| self.ids[idx].clone()).collect()),
            Err(cycle) => Err(SynthError::DependencyCycle(
                self.ids[cycle.node_id()].clone(),
            )),
        }
    }

    fn edge_indices(&self, dependent: &str, dependency: &str) -> Option<(usize, usize)> {
        let from = self.index.get(dependent).copied()?;
        let to = self.index.get(dependency).copied()?;
        Some((from, to))
    }
}

/// Collect resource logical ids referenced by `Ref`/`Fn::GetAtt` markers
///
/// Walks arbitrarily nested property JSON. A marker is a single-key object
/// of the form `{"Ref": "<id>"}` or `{"Fn::GetAtt": ["<id>", "<attr>"]}`.
pub fn collect_references(value: &Value) -> Vec<String> {
    let mut refs = Vec::new();
    walk_references(value, &mut refs);
    refs
}

fn walk_references(value: &Value, refs: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(id)) = map.get("Ref") {
                    refs.push(id.clone());
                    return;
                }
                if let Some(Value::Array(parts)) = map.get("Fn::GetAtt") {
                    if let Some(Value::String(id)) = parts.first() {
                        refs.push(id.clone());
                        return;
                    }
                }
            }
            for nested in map.values() {
                walk_references(nested, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_references(item, refs);
            }
        }
        _ => {}
    }
}
