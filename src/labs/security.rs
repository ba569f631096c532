// Copyright (c) 2025 - Cowboy AI, Inc.
//! Security Lab
//!
//! The smallest possible demonstration of the sealed security bundle: one
//! audit bucket with every default left in place. Encryption, public-access
//! blocking, TLS-only transport, and versioning all arrive without a single
//! option being set, and the bucket is retained if the stack is deleted.

use super::ENVIRONMENT;
use crate::app::App;
use crate::constructs::{SecureBucket, SecureBucketOptions};
use crate::domain::{naming, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};

/// Build the security lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Security;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "AuditStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Audit bucket with the full secure-by-default bundle".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();
    let bucket = SecureBucket::new(
        &mut root,
        "Audit",
        SecureBucketOptions::default().with_name_suffix("audit"),
    )?;

    stack.add_output(
        "BucketName",
        serde_json::json!(bucket.bucket_name()),
        Some("Versioned, retained audit bucket"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}
