// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cost Optimization Lab
//!
//! Short-lived reporting resources stamped for attribution and cleanup: the
//! whole stack carries a cost center and a seven-day expiry window, and the
//! report bucket is versionless and self-emptying so teardown is free.

use serde_json::json;

use super::ENVIRONMENT;
use crate::app::App;
use crate::constructs::{SecureBucket, SecureBucketOptions};
use crate::domain::{naming, tags, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};
use crate::tree::Resource;

const AL2023_IMAGE: &str =
    "{{resolve:ssm:/aws/service/ami-amazon-linux-latest/al2023-ami-kernel-default-x86_64}}";

/// Build the cost lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Cost;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "ReportStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Expiring report storage with cost attribution tags".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();
    tags::apply_cost_tags(&mut root, "education");
    tags::apply_auto_delete_tags(&mut root, tags::DEFAULT_EXPIRY_DAYS);

    let reports = SecureBucket::new(
        &mut root,
        "Reports",
        SecureBucketOptions::default()
            .with_name_suffix("reports")
            .with_versioned(false)
            .with_auto_delete(true),
    )?;

    let worker = root.add(
        "ReportWorker",
        Resource::new("AWS::EC2::Instance")
            .with_property("InstanceType", "t3.micro")
            .with_property("ImageId", AL2023_IMAGE)
            .with_tag(
                "Name",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "worker", Some("reports")),
            ),
    )?;

    stack.add_output(
        "ReportBucketName",
        json!(reports.bucket_name()),
        Some("Bucket holding generated reports"),
    )?;
    stack.add_output(
        "WorkerInstanceId",
        worker.reference(),
        Some("Report generation instance"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppProps;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn test_every_resource_carries_cost_and_expiry_tags() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let mut app = App::with_clock(AppProps::default(), Arc::new(FixedClock::at_date(date)));
        let name = build(&mut app).unwrap();

        let assembly = app.synth().unwrap();
        let template = assembly.template(&name).unwrap();

        for (id, resource) in &template.resources {
            assert_eq!(
                resource.tags.get(tags::COST_CENTER).map(String::as_str),
                Some("education"),
                "{id} missing cost center"
            );
            assert_eq!(
                resource.tags.get(tags::AUTO_DELETE).map(String::as_str),
                Some("true"),
                "{id} missing auto-delete marker"
            );
            assert_eq!(
                resource.tags.get(tags::EXPIRES_ON).map(String::as_str),
                Some("2026-01-26"),
                "{id} missing expiry date"
            );
        }
    }

    #[test]
    fn test_report_bucket_is_versionless_and_self_emptying() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let mut app = App::with_clock(AppProps::default(), Arc::new(FixedClock::at_date(date)));
        let name = build(&mut app).unwrap();

        let assembly = app.synth().unwrap();
        let template = assembly.template(&name).unwrap();
        let bucket = template.resource("ReportsBucket").unwrap();

        assert!(bucket.properties.get("VersioningConfiguration").is_none());
        assert_eq!(bucket.properties["AutoDeleteObjects"], true);
        assert_eq!(
            bucket.deletion_policy,
            Some(crate::tree::RemovalPolicy::Destroy)
        );
    }
}
