// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reliability Lab
//!
//! Compute spread across three availability zones: a standard network sized
//! up to three zones and an auto scaling group over the private tier, so
//! losing any single zone leaves the service running.

use serde_json::json;

use super::ENVIRONMENT;
use crate::app::App;
use crate::constructs::{StandardVpc, StandardVpcOptions};
use crate::domain::{naming, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};
use crate::tree::Resource;

/// Amazon Linux 2023 image resolved through SSM at provision time
const AL2023_IMAGE: &str =
    "{{resolve:ssm:/aws/service/ami-amazon-linux-latest/al2023-ami-kernel-default-x86_64}}";

/// Build the reliability lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Reliability;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "MultiAzStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Auto scaling group spread across three zones of the standard network".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();

    let network = StandardVpc::new(
        &mut root,
        "Network",
        StandardVpcOptions::default().with_max_azs(3),
    )?;

    let sg = root.add(
        "WebSecurityGroup",
        Resource::new("AWS::EC2::SecurityGroup")
            .with_property(
                "GroupName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "sg", Some("web")),
            )
            .with_property("GroupDescription", "Web tier instances")
            .with_property("VpcId", network.vpc().reference())
            .with_property(
                "SecurityGroupIngress",
                json!([{
                    "IpProtocol": "tcp",
                    "FromPort": 80,
                    "ToPort": 80,
                    "CidrIp": network.cidr().to_string()
                }]),
            ),
    )?;

    let launch_template = root.add(
        "WebLaunchTemplate",
        Resource::new("AWS::EC2::LaunchTemplate")
            .with_property(
                "LaunchTemplateName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "lt", Some("web")),
            )
            .with_property(
                "LaunchTemplateData",
                json!({
                    "InstanceType": "t3.micro",
                    "ImageId": AL2023_IMAGE,
                    "SecurityGroupIds": [sg.get_att("GroupId")]
                }),
            ),
    )?;

    let private_subnet_ids: Vec<_> = network
        .private_subnets()
        .iter()
        .map(|subnet| subnet.reference())
        .collect();

    let asg = root.add(
        "WebAutoScalingGroup",
        Resource::new("AWS::AutoScaling::AutoScalingGroup")
            .with_property(
                "AutoScalingGroupName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "asg", Some("web")),
            )
            .with_property("MinSize", "2")
            .with_property("MaxSize", "4")
            .with_property("DesiredCapacity", "3")
            .with_property("VPCZoneIdentifier", json!(private_subnet_ids))
            .with_property(
                "LaunchTemplate",
                json!({
                    "LaunchTemplateId": launch_template.reference(),
                    "Version": launch_template.get_att("LatestVersionNumber")
                }),
            )
            .with_property("HealthCheckType", "EC2")
            .with_property("HealthCheckGracePeriod", 60),
    )?;

    stack.add_output(
        "AutoScalingGroupName",
        asg.reference(),
        Some("Web tier auto scaling group"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}
