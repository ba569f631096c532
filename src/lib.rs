//! Well-Architected hands-on lab compositions
//!
//! This crate provides the shared construct layer the labs are built from:
//! deterministic naming and tagging, a construct tree with dependency-ordered
//! synthesis, and one lab stack per Well-Architected pillar.

pub mod app;
pub mod clock;
pub mod constructs;
pub mod domain;
pub mod errors;
pub mod graph;
pub mod labs;
pub mod stack;
pub mod synth;
pub mod template;
pub mod tree;

// Re-export commonly used types
pub use app::{App, AppProps, Assembly};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{SynthError, SynthResult};
pub use stack::{Stack, StackProps};
pub use template::Template;
pub use tree::{RemovalPolicy, Resource, ResourceHandle, Scope};
