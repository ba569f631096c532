// Copyright (c) 2025 - Cowboy AI, Inc.
//! Performance Lab
//!
//! Redis cache cluster in the isolated tier of a standard network. The
//! cluster names its subnet group by string rather than by reference, so the
//! ordering between the two is declared explicitly.

use serde_json::json;

use super::ENVIRONMENT;
use crate::app::App;
use crate::constructs::{StandardVpc, StandardVpcOptions};
use crate::domain::{naming, Pillar};
use crate::errors::SynthResult;
use crate::stack::{Stack, StackProps};
use crate::tree::Resource;

/// Build the performance lab stack and register it on the application
pub fn build(app: &mut App) -> SynthResult<String> {
    let pillar = Pillar::Performance;
    let name = naming::stack_name(ENVIRONMENT, pillar.as_str(), "CacheStack");

    let mut stack = Stack::new(
        app,
        &name,
        StackProps {
            environment: ENVIRONMENT.to_string(),
            pillar: Some(pillar),
            description: Some("Redis cache in the isolated tier of the standard network".to_string()),
            ..StackProps::default()
        },
    );

    let mut root = stack.root();

    let network = StandardVpc::new(&mut root, "Network", StandardVpcOptions::default())?;

    let sg = root.add(
        "RedisSecurityGroup",
        Resource::new("AWS::EC2::SecurityGroup")
            .with_property(
                "GroupName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "sg", Some("redis")),
            )
            .with_property("GroupDescription", "Redis access from inside the network")
            .with_property("VpcId", network.vpc().reference())
            .with_property(
                "SecurityGroupIngress",
                json!([{
                    "IpProtocol": "tcp",
                    "FromPort": 6379,
                    "ToPort": 6379,
                    "CidrIp": network.cidr().to_string()
                }]),
            ),
    )?;

    let subnet_group_name =
        naming::resource_name(ENVIRONMENT, pillar.as_str(), "subnets", Some("redis"));
    let isolated_subnet_ids: Vec<_> = network
        .isolated_subnets()
        .iter()
        .map(|subnet| subnet.reference())
        .collect();

    let subnet_group = root.add(
        "CacheSubnetGroup",
        Resource::new("AWS::ElastiCache::SubnetGroup")
            .with_property("CacheSubnetGroupName", subnet_group_name.clone())
            .with_property("Description", "Isolated-tier subnets for the cache")
            .with_property("SubnetIds", json!(isolated_subnet_ids)),
    )?;

    // The cluster carries the group's name as a plain string, which the
    // reference scan cannot see, so the edge is declared by hand
    let cluster = root.add(
        "RedisCluster",
        Resource::new("AWS::ElastiCache::CacheCluster")
            .with_property(
                "ClusterName",
                naming::resource_name(ENVIRONMENT, pillar.as_str(), "cache", Some("redis")),
            )
            .with_property("Engine", "redis")
            .with_property("CacheNodeType", "cache.t3.micro")
            .with_property("NumCacheNodes", 1)
            .with_property("CacheSubnetGroupName", subnet_group_name)
            .with_property("VpcSecurityGroupIds", json!([sg.get_att("GroupId")]))
            .depends_on(&subnet_group),
    )?;

    stack.add_output(
        "RedisEndpoint",
        cluster.get_att("RedisEndpoint.Address"),
        Some("Cache cluster endpoint address"),
    )?;
    stack.add_output(
        "RedisPort",
        cluster.get_att("RedisEndpoint.Port"),
        Some("Cache cluster endpoint port"),
    )?;

    app.add_stack(stack)?;
    Ok(name)
}
