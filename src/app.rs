// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application Root
//!
//! Owns the deployment region, the injected clock, and every stack added to
//! the run. `synth` renders all of them in one synchronous pass; the
//! program's work ends at template generation, and the rendered assembly is
//! the hand-off boundary to the external provisioning engine.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::errors::{SynthError, SynthResult};
use crate::stack::Stack;
use crate::synth::synthesize_stack;
use crate::template::Template;

/// Default deployment region for lab applications
pub const DEFAULT_REGION: &str = "ap-northeast-2";

/// Properties for an application root
#[derive(Debug, Clone)]
pub struct AppProps {
    /// Deployment region recorded in template metadata
    pub region: String,
}

impl Default for AppProps {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// Application root owning stacks, region, and clock
///
/// # Examples
///
/// ```rust
/// use wa_handson::app::{App, AppProps};
/// use wa_handson::stack::{Stack, StackProps};
///
/// let mut app = App::new(AppProps::default());
/// let stack = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());
/// app.add_stack(stack).unwrap();
///
/// let assembly = app.synth().unwrap();
/// assert_eq!(assembly.len(), 1);
/// ```
#[derive(Debug)]
pub struct App {
    region: String,
    clock: Arc<dyn Clock>,
    stacks: IndexMap<String, Stack>,
}

impl App {
    /// Create an application on the system clock
    pub fn new(props: AppProps) -> Self {
        Self::with_clock(props, Arc::new(SystemClock))
    }

    /// Create an application with an injected clock
    ///
    /// With a pinned clock, repeated synthesis of the same composition is
    /// byte-identical.
    pub fn with_clock(props: AppProps, clock: Arc<dyn Clock>) -> Self {
        Self {
            region: props.region,
            clock,
            stacks: IndexMap::new(),
        }
    }

    /// The application's deployment region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Number of registered stacks
    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// Register a composed stack
    pub fn add_stack(&mut self, stack: Stack) -> SynthResult<()> {
        if self.stacks.contains_key(stack.name()) {
            return Err(SynthError::DuplicateStack(stack.name().to_string()));
        }

        info!(
            "Registered stack {} ({} resources)",
            stack.name(),
            stack.resource_count()
        );
        self.stacks.insert(stack.name().to_string(), stack);
        Ok(())
    }

    /// Synthesize every registered stack into an assembly of templates
    pub fn synth(&self) -> SynthResult<Assembly> {
        info!("Synthesizing {} stack(s)", self.stacks.len());

        let mut templates = IndexMap::new();
        for (name, stack) in &self.stacks {
            templates.insert(name.clone(), synthesize_stack(stack)?);
        }

        Ok(Assembly { templates })
    }

    pub(crate) fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

/// The rendered templates of one synthesis run, keyed by stack name
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Assembly {
    templates: IndexMap<String, Template>,
}

impl Assembly {
    /// Look up a stack's template by name
    pub fn template(&self, stack_name: &str) -> Option<&Template> {
        self.templates.get(stack_name)
    }

    /// Iterate templates in stack registration order
    pub fn templates(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.templates.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the assembly is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render the whole assembly as pretty-printed JSON
    pub fn to_json_pretty(&self) -> SynthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::stack::StackProps;
    use chrono::NaiveDate;

    fn fixed_app() -> App {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        App::with_clock(AppProps::default(), Arc::new(FixedClock::at_date(date)))
    }

    #[test]
    fn test_default_region() {
        let app = App::new(AppProps::default());
        assert_eq!(app.region(), "ap-northeast-2");
    }

    #[test]
    fn test_duplicate_stack_rejected() {
        let mut app = fixed_app();
        let first = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());
        let second = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());

        app.add_stack(first).unwrap();
        let err = app.add_stack(second).unwrap_err();

        assert!(matches!(
            err,
            SynthError::DuplicateStack(name) if name == "WaHandson-Dev-Security-AuditStack"
        ));
    }

    #[test]
    fn test_synthesis_is_repeatable_with_pinned_clock() {
        let mut app = fixed_app();
        let stack = Stack::new(&app, "WaHandson-Dev-Security-AuditStack", StackProps::default());
        app.add_stack(stack).unwrap();

        let first = app.synth().unwrap().to_json_pretty().unwrap();
        let second = app.synth().unwrap().to_json_pretty().unwrap();

        assert_eq!(first, second);
    }
}
