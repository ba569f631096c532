// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for the shared constructs
//!
//! Option matrices for the secure bucket and the standard network, checking
//! that every combination keeps the sealed parts sealed: the bucket security
//! bundle is never weakened by sizing options, and the network always carves
//! all three tiers.

mod fixtures;

use pretty_assertions::assert_eq;
use test_case::test_case;

use wa_handson::constructs::{
    SecureBucket, SecureBucketOptions, StandardVpc, StandardVpcOptions,
};
use wa_handson::domain::Pillar;
use wa_handson::synth::synthesize_stack;
use wa_handson::template::Template;
use wa_handson::tree::RemovalPolicy;

use crate::fixtures::*;

fn synthesized_bucket(options: SecureBucketOptions) -> Template {
    let app = fixed_app();
    let mut stack = pillar_stack(&app, Pillar::Security, "WaHandson-Dev-Security-AuditStack");
    let mut root = stack.root();
    SecureBucket::new(&mut root, "Audit", options).unwrap();
    synthesize_stack(&stack).unwrap()
}

fn synthesized_network(options: StandardVpcOptions) -> Template {
    let app = fixed_app();
    let mut stack = pillar_stack(&app, Pillar::Reliability, "WaHandson-Dev-Reliability-MultiAzStack");
    let mut root = stack.root();
    StandardVpc::new(&mut root, "Network", options).unwrap();
    synthesize_stack(&stack).unwrap()
}

#[test_case(true,  false, RemovalPolicy::Retain  ; "versioned retained default")]
#[test_case(false, false, RemovalPolicy::Retain  ; "unversioned still retained")]
#[test_case(true,  true,  RemovalPolicy::Destroy ; "versioned but destroyable")]
#[test_case(false, true,  RemovalPolicy::Destroy ; "fully ephemeral")]
fn test_bucket_option_matrix(versioned: bool, auto_delete: bool, expected: RemovalPolicy) {
    let template = synthesized_bucket(
        SecureBucketOptions::default()
            .with_versioned(versioned)
            .with_auto_delete(auto_delete),
    );
    let bucket = template.resource("AuditBucket").unwrap();

    assert_eq!(bucket.deletion_policy, Some(expected));
    assert_eq!(
        bucket.properties.contains_key("VersioningConfiguration"),
        versioned
    );
    assert_eq!(bucket.properties.contains_key("AutoDeleteObjects"), auto_delete);

    // The security bundle never varies with the options
    assert!(bucket.properties.contains_key("BucketEncryption"));
    assert!(bucket.properties.contains_key("PublicAccessBlockConfiguration"));
    assert!(template.resource("AuditBucketPolicy").is_some());
}

#[test_case(1, 3  ; "single zone")]
#[test_case(2, 6  ; "two zones")]
#[test_case(3, 9  ; "three zones")]
#[test_case(6, 18 ; "zone ceiling")]
fn test_network_always_carves_three_tiers(max_azs: u8, expected_subnets: usize) {
    let template = synthesized_network(StandardVpcOptions::default().with_max_azs(max_azs));

    assert_eq!(
        template.resources_of_type("AWS::EC2::Subnet").count(),
        expected_subnets
    );
    // One flow log regardless of sizing
    assert_eq!(template.resources_of_type("AWS::EC2::FlowLog").count(), 1);
}

#[test_case(3, 0, 0 ; "no egress")]
#[test_case(3, 1, 1 ; "shared gateway")]
#[test_case(3, 3, 3 ; "gateway per zone")]
#[test_case(3, 9, 3 ; "request above zone count is capped")]
fn test_nat_gateway_counts(max_azs: u8, nat_gateways: u8, expected: usize) {
    let template = synthesized_network(
        StandardVpcOptions::default()
            .with_max_azs(max_azs)
            .with_nat_gateways(nat_gateways),
    );

    assert_eq!(
        template.resources_of_type("AWS::EC2::NatGateway").count(),
        expected
    );
    assert_eq!(template.resources_of_type("AWS::EC2::EIP").count(), expected);
}

#[test]
fn test_private_routes_share_gateways_round_robin() {
    let template = synthesized_network(
        StandardVpcOptions::default()
            .with_max_azs(3)
            .with_nat_gateways(2),
    );

    let gateway_of = |route_id: &str| {
        template.resource(route_id).unwrap().properties["NatGatewayId"]["Ref"]
            .as_str()
            .unwrap()
            .to_string()
    };

    assert_eq!(gateway_of("NetworkPrivateDefaultRoute1"), "NetworkNatGateway1");
    assert_eq!(gateway_of("NetworkPrivateDefaultRoute2"), "NetworkNatGateway2");
    // Third zone wraps around to the first gateway
    assert_eq!(gateway_of("NetworkPrivateDefaultRoute3"), "NetworkNatGateway1");
}

#[test]
fn test_subnet_tier_tags_and_names() {
    let template = synthesized_network(StandardVpcOptions::default());

    let public = template.resource("NetworkPublicSubnet1").unwrap();
    assert_eq!(public.tags["Tier"], "public");
    assert_eq!(
        public.tags["Name"],
        "wa-handson-dev-reliability-subnet-public-1"
    );
    assert_eq!(public.properties["MapPublicIpOnLaunch"], true);

    let isolated = template.resource("NetworkIsolatedSubnet2").unwrap();
    assert_eq!(isolated.tags["Tier"], "isolated");
    assert!(isolated.properties.get("MapPublicIpOnLaunch").is_none());
}

#[test]
fn test_bucket_and_network_compose_in_one_stack() {
    let app = fixed_app();
    let mut stack = pillar_stack(&app, Pillar::Sustainability, "WaHandson-Dev-Sustainability-ServerlessStack");

    let mut root = stack.root();
    StandardVpc::new(&mut root, "Network", StandardVpcOptions::default()).unwrap();
    SecureBucket::new(&mut root, "Assets", SecureBucketOptions::default()).unwrap();

    let template = synthesize_stack(&stack).unwrap();

    assert!(template.resource("NetworkVpc").is_some());
    assert!(template.resource("AssetsBucket").is_some());
    // Construct subtrees inherit the same stack tag set
    assert_eq!(
        template.resource("NetworkVpc").unwrap().tags["WA-Pillar"],
        "sustainability"
    );
    assert_eq!(
        template.resource("AssetsBucket").unwrap().tags["WA-Pillar"],
        "sustainability"
    );
}
