// Copyright (c) 2025 - Cowboy AI, Inc.
//! Secure-by-Default Storage Bucket
//!
//! Creates exactly one bucket carrying the full security bundle: encryption
//! at rest, all public access blocked, TLS-only transport enforced through a
//! bucket policy, and versioning on by default. The bundle is all-or-nothing
//! by design; the only opt-out is destructive cleanup (`auto_delete`), which
//! flips retention from `Retain` to `Destroy` and marks the bucket for
//! auto-emptying on stack deletion.

use serde_json::json;

use crate::domain::naming;
use crate::errors::SynthResult;
use crate::tree::{RemovalPolicy, Resource, ResourceHandle, Scope};

/// Options for a [`SecureBucket`]
///
/// The default is the secure base case: versioned, retained, no cleanup.
#[derive(Debug, Clone)]
pub struct SecureBucketOptions {
    /// Extra segment appended to the derived bucket name
    pub name_suffix: Option<String>,
    /// Keep object versions (default true)
    pub versioned: bool,
    /// Destroy the bucket and auto-empty it on stack deletion (default false)
    pub auto_delete: bool,
}

impl Default for SecureBucketOptions {
    fn default() -> Self {
        Self {
            name_suffix: None,
            versioned: true,
            auto_delete: false,
        }
    }
}

impl SecureBucketOptions {
    /// Append a name suffix
    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = Some(suffix.into());
        self
    }

    /// Toggle object versioning
    pub fn with_versioned(mut self, versioned: bool) -> Self {
        self.versioned = versioned;
        self
    }

    /// Opt in to destructive cleanup on stack deletion
    pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = auto_delete;
        self
    }
}

/// A bucket with the sealed security bundle applied
pub struct SecureBucket {
    bucket: ResourceHandle,
    bucket_name: String,
    removal_policy: RemovalPolicy,
    auto_delete_objects: bool,
}

impl SecureBucket {
    /// Create the bucket and its TLS-only policy under the parent scope
    pub fn new(
        parent: &mut Scope<'_>,
        id: &str,
        options: SecureBucketOptions,
    ) -> SynthResult<Self> {
        let mut scope = parent.child(id);

        let pillar = scope.pillar().map(|p| p.as_str()).unwrap_or_default();
        let bucket_name = naming::resource_name(
            scope.environment(),
            pillar,
            "bucket",
            options.name_suffix.as_deref(),
        );

        let removal_policy = if options.auto_delete {
            RemovalPolicy::Destroy
        } else {
            RemovalPolicy::Retain
        };

        let mut bucket = Resource::new("AWS::S3::Bucket")
            .with_property("BucketName", bucket_name.clone())
            .with_property(
                "BucketEncryption",
                json!({
                    "ServerSideEncryptionConfiguration": [
                        { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" } }
                    ]
                }),
            )
            .with_property(
                "PublicAccessBlockConfiguration",
                json!({
                    "BlockPublicAcls": true,
                    "BlockPublicPolicy": true,
                    "IgnorePublicAcls": true,
                    "RestrictPublicBuckets": true
                }),
            )
            .with_removal_policy(removal_policy);

        if options.versioned {
            bucket = bucket.with_property("VersioningConfiguration", json!({ "Status": "Enabled" }));
        }
        if options.auto_delete {
            bucket = bucket.with_property("AutoDeleteObjects", true);
        }

        let bucket_handle = scope.add("Bucket", bucket)?;

        let policy = Resource::new("AWS::S3::BucketPolicy")
            .with_property("Bucket", bucket_handle.reference())
            .with_property(
                "PolicyDocument",
                json!({
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Sid": "DenyInsecureTransport",
                        "Effect": "Deny",
                        "Principal": "*",
                        "Action": "s3:*",
                        "Resource": [
                            bucket_handle.get_att("Arn"),
                            { "Fn::Join": ["", [bucket_handle.get_att("Arn"), "/*"]] }
                        ],
                        "Condition": { "Bool": { "aws:SecureTransport": "false" } }
                    }]
                }),
            );

        scope.add("BucketPolicy", policy)?;

        Ok(Self {
            bucket: bucket_handle,
            bucket_name,
            removal_policy,
            auto_delete_objects: options.auto_delete,
        })
    }

    /// Handle to the bucket resource
    pub fn handle(&self) -> &ResourceHandle {
        &self.bucket
    }

    /// The derived bucket name
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// The effective retention policy
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Whether the bucket auto-empties on stack deletion
    pub fn auto_delete_objects(&self) -> bool {
        self.auto_delete_objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, AppProps};
    use crate::clock::FixedClock;
    use crate::domain::Pillar;
    use crate::stack::{Stack, StackProps};
    use crate::synth::synthesize_stack;
    use crate::template::Template;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn synthesized(options: SecureBucketOptions) -> (SecureBucket, Template) {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let app = App::with_clock(AppProps::default(), Arc::new(FixedClock::at_date(date)));
        let mut stack = Stack::new(
            &app,
            "WaHandson-Dev-Security-AuditStack",
            StackProps {
                pillar: Some(Pillar::Security),
                ..StackProps::default()
            },
        );

        let mut root = stack.root();
        let bucket = SecureBucket::new(&mut root, "Audit", options).unwrap();
        let template = synthesize_stack(&stack).unwrap();
        (bucket, template)
    }

    #[test]
    fn test_security_bundle_is_always_present() {
        let (_, template) = synthesized(SecureBucketOptions::default());
        let bucket = template.resource("AuditBucket").unwrap();

        let encryption = &bucket.properties["BucketEncryption"];
        assert_eq!(
            encryption["ServerSideEncryptionConfiguration"][0]["ServerSideEncryptionByDefault"]
                ["SSEAlgorithm"],
            "AES256"
        );

        let block = &bucket.properties["PublicAccessBlockConfiguration"];
        for key in [
            "BlockPublicAcls",
            "BlockPublicPolicy",
            "IgnorePublicAcls",
            "RestrictPublicBuckets",
        ] {
            assert_eq!(block[key], true, "{} must be enabled", key);
        }

        let policy = template.resource("AuditBucketPolicy").unwrap();
        let statement = &policy.properties["PolicyDocument"]["Statement"][0];
        assert_eq!(statement["Effect"], "Deny");
        assert_eq!(statement["Condition"]["Bool"]["aws:SecureTransport"], "false");
    }

    #[test]
    fn test_defaults_are_versioned_and_retained() {
        let (bucket, template) = synthesized(SecureBucketOptions::default());
        let rendered = template.resource("AuditBucket").unwrap();

        assert_eq!(rendered.properties["VersioningConfiguration"]["Status"], "Enabled");
        assert_eq!(rendered.deletion_policy, Some(RemovalPolicy::Retain));
        assert!(rendered.properties.get("AutoDeleteObjects").is_none());
        assert_eq!(bucket.removal_policy(), RemovalPolicy::Retain);
        assert!(!bucket.auto_delete_objects());
    }

    #[test]
    fn test_auto_delete_flips_retention_and_marks_auto_empty() {
        let (bucket, template) =
            synthesized(SecureBucketOptions::default().with_auto_delete(true));
        let rendered = template.resource("AuditBucket").unwrap();

        assert_eq!(rendered.deletion_policy, Some(RemovalPolicy::Destroy));
        assert_eq!(rendered.properties["AutoDeleteObjects"], true);
        assert_eq!(bucket.removal_policy(), RemovalPolicy::Destroy);
        assert!(bucket.auto_delete_objects());
    }

    #[test]
    fn test_bucket_name_uses_naming_scheme() {
        let (bucket, template) =
            synthesized(SecureBucketOptions::default().with_name_suffix("audit"));

        assert_eq!(bucket.bucket_name(), "wa-handson-dev-security-bucket-audit");
        let rendered = template.resource("AuditBucket").unwrap();
        assert_eq!(rendered.properties["BucketName"], "wa-handson-dev-security-bucket-audit");
    }

    #[test]
    fn test_unversioned_bucket_omits_versioning() {
        let (_, template) = synthesized(SecureBucketOptions::default().with_versioned(false));
        let rendered = template.resource("AuditBucket").unwrap();

        assert!(rendered.properties.get("VersioningConfiguration").is_none());
    }
}
