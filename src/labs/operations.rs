// Copyright (c) 2025 - Cowboy AI, Inc.
//! Operational Excellence Lab
//!
//! A request handler wired for observability from day one: its log group is
//! declared with a fixed retention instead of being auto-created on first
//! invoke, and an error alarm watches the function before anything ever
//! calls it.

use serde_json::json;

use super::ENVIRONMENT;
use crate::app::App;
use crate::domain::{naming, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};
use crate::tree::Resource;

/// Build the operations lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Operations;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "MonitoringStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Health-check handler with declared log retention and an error alarm".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();

    let role = root.add(
        "HandlerRole",
        Resource::new("AWS::IAM::Role")
            .with_property(
                "AssumeRolePolicyDocument",
                json!({
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Principal": { "Service": "lambda.amazonaws.com" },
                        "Action": "sts:AssumeRole"
                    }]
                }),
            )
            .with_property(
                "ManagedPolicyArns",
                json!(["arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"]),
            ),
    )?;

    let handler = root.add(
        "Handler",
        Resource::new("AWS::Lambda::Function")
            .with_property(
                "FunctionName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "fn", Some("health")),
            )
            .with_property("Runtime", "python3.12")
            .with_property("Handler", "handler.lambda_handler")
            .with_property("MemorySize", 128)
            .with_property("Timeout", 10)
            .with_property("Role", role.get_att("Arn"))
            .with_property("Code", json!({ "AssetPath": "lambda-code/handler.py" })),
    )?;

    // Declared up front so retention is fixed rather than left to the
    // service's auto-created default
    let log_group = root.add(
        "HandlerLogGroup",
        Resource::new("AWS::Logs::LogGroup")
            .with_property(
                "LogGroupName",
                json!({ "Fn::Join": ["", ["/aws/lambda/", handler.reference()]] }),
            )
            .with_property("RetentionInDays", 14),
    )?;

    root.add(
        "ErrorsAlarm",
        Resource::new("AWS::CloudWatch::Alarm")
            .with_property(
                "AlarmName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "alarm", Some("errors")),
            )
            .with_property("Namespace", "AWS/Lambda")
            .with_property("MetricName", "Errors")
            .with_property(
                "Dimensions",
                json!([{ "Name": "FunctionName", "Value": handler.reference() }]),
            )
            .with_property("Statistic", "Sum")
            .with_property("Period", 300)
            .with_property("EvaluationPeriods", 1)
            .with_property("Threshold", 1)
            .with_property("ComparisonOperator", "GreaterThanOrEqualToThreshold")
            .with_property("TreatMissingData", "notBreaching"),
    )?;

    stack.add_output(
        "FunctionName",
        handler.reference(),
        Some("Name of the health-check handler"),
    )?;
    stack.add_output(
        "LogGroupName",
        log_group.reference(),
        Some("Log group with fixed retention"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}
