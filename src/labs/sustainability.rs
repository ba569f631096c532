// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sustainability Lab
//!
//! Fully serverless CRUD service: an on-demand table, an arm64 function
//! behind an HTTP API, and static assets served from a secure bucket through
//! a CDN. Nothing idles; everything scales to zero between requests.

use serde_json::json;

use super::ENVIRONMENT;
use crate::app::App;
use crate::constructs::{SecureBucket, SecureBucketOptions};
use crate::domain::{naming, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};
use crate::tree::{RemovalPolicy, Resource};

/// Managed cache policy "CachingOptimized"
const CACHING_OPTIMIZED: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

/// Build the sustainability lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Sustainability;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "ServerlessStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Scale-to-zero CRUD service on arm64 with CDN-fronted assets".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();

    let table = root.add(
        "ItemsTable",
        Resource::new("AWS::DynamoDB::Table")
            .with_property(
                "TableName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "table", Some("items")),
            )
            .with_property("BillingMode", "PAY_PER_REQUEST")
            .with_property(
                "AttributeDefinitions",
                json!([{ "AttributeName": "id", "AttributeType": "S" }]),
            )
            .with_property(
                "KeySchema",
                json!([{ "AttributeName": "id", "KeyType": "HASH" }]),
            )
            .with_removal_policy(RemovalPolicy::Destroy),
    )?;

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
            )
            .with_property(
                "Policies",
                json!([{
                    "PolicyName": "ItemsTableCrud",
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Action": [
                                "dynamodb:GetItem",
                                "dynamodb:PutItem",
                                "dynamodb:UpdateItem",
                                "dynamodb:DeleteItem",
                                "dynamodb:Scan"
                            ],
                            "Resource": table.get_att("Arn")
                        }]
                    }
                }]),
            ),
    )?;

    let handler = root.add(
        "Handler",
        Resource::new("AWS::Lambda::Function")
            .with_property(
                "FunctionName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "fn", Some("crud")),
            )
            .with_property("Runtime", "python3.12")
            .with_property("Architectures", json!(["arm64"]))
            .with_property("Handler", "handler.lambda_handler")
            .with_property("MemorySize", 128)
            .with_property("Timeout", 10)
            .with_property("Role", role.get_att("Arn"))
            .with_property(
                "Environment",
                json!({ "Variables": { "TABLE_NAME": table.reference() } }),
            )
            .with_property("Code", json!({ "AssetPath": "lambda-code/handler.py" })),
    )?;

    root.add(
        "HandlerInvokePermission",
        Resource::new("AWS::Lambda::Permission")
            .with_property("FunctionName", handler.reference())
            .with_property("Action", "lambda:InvokeFunction")
            .with_property("Principal", "apigateway.amazonaws.com"),
    )?;

    let api = root.add(
        "ItemsApi",
        Resource::new("AWS::ApiGatewayV2::Api")
            .with_property(
                "Name",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "api", Some("items")),
            )
            .with_property("ProtocolType", "HTTP"),
    )?;

    let integration = root.add(
        "HandlerIntegration",
        Resource::new("AWS::ApiGatewayV2::Integration")
            .with_property("ApiId", api.reference())
            .with_property("IntegrationType", "AWS_PROXY")
            .with_property("IntegrationUri", handler.get_att("Arn"))
            .with_property("IntegrationMethod", "POST")
            .with_property("PayloadFormatVersion", "1.0"),
    )?;

    let integration_target = json!({
        "Fn::Join": ["/", ["integrations", integration.reference()]]
    });
    root.add(
        "ItemsRoute",
        Resource::new("AWS::ApiGatewayV2::Route")
            .with_property("ApiId", api.reference())
            .with_property("RouteKey", "ANY /items")
            .with_property("Target", integration_target.clone()),
    )?;
    root.add(
        "ItemRoute",
        Resource::new("AWS::ApiGatewayV2::Route")
            .with_property("ApiId", api.reference())
            .with_property("RouteKey", "ANY /items/{id}")
            .with_property("Target", integration_target),
    )?;

    root.add(
        "DefaultStage",
        Resource::new("AWS::ApiGatewayV2::Stage")
            .with_property("ApiId", api.reference())
            .with_property("StageName", "$default")
            .with_property("AutoDeploy", true),
    )?;

    let assets = SecureBucket::new(
        &mut root,
        "Assets",
        SecureBucketOptions::default().with_name_suffix("assets"),
    )?;

    let cdn = root.add(
        "AssetsDistribution",
        Resource::new("AWS::CloudFront::Distribution").with_property(
            "DistributionConfig",
            json!({
                "Enabled": true,
                "DefaultRootObject": "index.html",
                "Origins": [{
                    "Id": "assets-origin",
                    "DomainName": assets.handle().get_att("RegionalDomainName"),
                    "S3OriginConfig": {}
                }],
                "DefaultCacheBehavior": {
                    "TargetOriginId": "assets-origin",
                    "ViewerProtocolPolicy": "redirect-to-https",
                    "CachePolicyId": CACHING_OPTIMIZED
                }
            }),
        ),
    )?;

    stack.add_output(
        "ApiUrl",
        api.get_att("ApiEndpoint"),
        Some("HTTP API endpoint for the CRUD service"),
    )?;
    stack.add_output("TableName", table.reference(), Some("Items table"))?;
    stack.add_output(
        "DistributionDomainName",
        cdn.get_att("DomainName"),
        Some("CDN domain serving the static assets"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}
