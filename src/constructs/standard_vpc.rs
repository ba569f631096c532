// Copyright (c) 2025 - Cowboy AI, Inc.
//! Standard Three-Tier Network
//!
//! Creates one virtual network always partitioned into exactly three subnet
//! tiers (public, private-with-egress, isolated), one `/24` per tier per
//! availability zone, carved tier-major out of the network block. Only the
//! sizing parameters vary; the three-tier shape is fixed, and a flow log
//! capturing rejected traffic only is attached unconditionally.
//!
//! One NAT gateway is the default, a documented single-point-of-failure
//! trade-off for non-production labs. Zero NAT gateways leaves the private
//! tier without an egress route.

use serde_json::json;
use std::fmt;
use tracing::warn;

use crate::domain::{naming, Ipv4Cidr};
use crate::errors::SynthResult;
use crate::tree::{Resource, ResourceHandle, Scope};

/// Fixed prefix length for every subnet
pub const SUBNET_PREFIX: u8 = 24;

/// Most availability zones a lab network will spread across
pub const MAX_AZS: u8 = 6;

/// Subnet reachability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubnetTier {
    /// Full bidirectional internet route
    Public,
    /// Outbound-only via NAT gateway
    Private,
    /// No internet route at all
    Isolated,
}

impl SubnetTier {
    /// The three tiers in carving order
    pub const ALL: [SubnetTier; 3] = [Self::Public, Self::Private, Self::Isolated];

    /// Lowercase tier token used in names and tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Isolated => "isolated",
        }
    }

    /// Construct id prefix for this tier's subnets
    fn id_prefix(&self) -> &'static str {
        match self {
            Self::Public => "PublicSubnet",
            Self::Private => "PrivateSubnet",
            Self::Isolated => "IsolatedSubnet",
        }
    }
}

impl fmt::Display for SubnetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a [`StandardVpc`]
#[derive(Debug, Clone)]
pub struct StandardVpcOptions {
    /// Network address block (default `10.0.0.0/16`)
    pub cidr: Ipv4Cidr,
    /// Availability zones to spread across, clamped to `1..=6` (default 2)
    pub max_azs: u8,
    /// NAT gateways to create, capped at the zone count (default 1)
    pub nat_gateways: u8,
}

impl Default for StandardVpcOptions {
    fn default() -> Self {
        Self {
            cidr: Ipv4Cidr::STANDARD_BLOCK,
            max_azs: 2,
            nat_gateways: 1,
        }
    }
}

impl StandardVpcOptions {
    /// Set the network address block
    pub fn with_cidr(mut self, cidr: Ipv4Cidr) -> Self {
        self.cidr = cidr;
        self
    }

    /// Set the availability zone count
    pub fn with_max_azs(mut self, max_azs: u8) -> Self {
        self.max_azs = max_azs;
        self
    }

    /// Set the NAT gateway count
    pub fn with_nat_gateways(mut self, nat_gateways: u8) -> Self {
        self.nat_gateways = nat_gateways;
        self
    }
}

/// A three-tier network with unconditional reject-traffic flow logging
pub struct StandardVpc {
    vpc: ResourceHandle,
    public_subnets: Vec<ResourceHandle>,
    private_subnets: Vec<ResourceHandle>,
    isolated_subnets: Vec<ResourceHandle>,
    availability_zones: Vec<String>,
    cidr: Ipv4Cidr,
}

impl StandardVpc {
    /// Create the network under the parent scope
    pub fn new(
        parent: &mut Scope<'_>,
        id: &str,
        options: StandardVpcOptions,
    ) -> SynthResult<Self> {
        let mut scope = parent.child(id);

        let environment = scope.environment().to_string();
        let pillar = scope
            .pillar()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        let region = scope.region().to_string();

        let az_count = options.max_azs.clamp(1, MAX_AZS);
        if az_count != options.max_azs {
            warn!(
                "max_azs {} out of range, clamped to {}",
                options.max_azs, az_count
            );
        }
        let nat_count = options.nat_gateways.min(az_count);

        let availability_zones: Vec<String> = (0..az_count)
            .map(|i| format!("{}{}", region, (b'a' + i) as char))
            .collect();

        let vpc = scope.add(
            "Vpc",
            Resource::new("AWS::EC2::VPC")
                .with_property("CidrBlock", options.cidr.to_string())
                .with_property("EnableDnsSupport", true)
                .with_property("EnableDnsHostnames", true),
        )?;

        // Subnets, one /24 per tier per zone, tier-major
        let mut tier_subnets: Vec<Vec<ResourceHandle>> = Vec::with_capacity(3);
        for (tier_index, tier) in SubnetTier::ALL.iter().enumerate() {
            let mut subnets = Vec::with_capacity(az_count as usize);
            for az_index in 0..az_count {
                let block = options
                    .cidr
                    .subnet(SUBNET_PREFIX, tier_index as u32 * u32::from(az_count) + u32::from(az_index))?;
                let name = naming::resource_name(
                    &environment,
                    &pillar,
                    "subnet",
                    Some(&format!("{}-{}", tier, az_index + 1)),
                );

                let mut subnet = Resource::new("AWS::EC2::Subnet")
                    .with_property("VpcId", vpc.reference())
                    .with_property("CidrBlock", block.to_string())
                    .with_property(
                        "AvailabilityZone",
                        availability_zones[az_index as usize].clone(),
                    )
                    .with_tag("Name", name)
                    .with_tag("Tier", tier.as_str());
                if *tier == SubnetTier::Public {
                    subnet = subnet.with_property("MapPublicIpOnLaunch", true);
                }

                let handle =
                    scope.add(&format!("{}{}", tier.id_prefix(), az_index + 1), subnet)?;
                subnets.push(handle);
            }
            tier_subnets.push(subnets);
        }

        let mut tiers = tier_subnets.into_iter();
        let public_subnets = tiers.next().unwrap_or_default();
        let private_subnets = tiers.next().unwrap_or_default();
        let isolated_subnets = tiers.next().unwrap_or_default();

        // Internet gateway and public routing
        let igw = scope.add("InternetGateway", Resource::new("AWS::EC2::InternetGateway"))?;
        let attachment = scope.add(
            "VpcGatewayAttachment",
            Resource::new("AWS::EC2::VPCGatewayAttachment")
                .with_property("VpcId", vpc.reference())
                .with_property("InternetGatewayId", igw.reference()),
        )?;

        let public_rt = scope.add(
            "PublicRouteTable",
            Resource::new("AWS::EC2::RouteTable").with_property("VpcId", vpc.reference()),
        )?;
        // The route references the gateway, not the attachment, so the
        // ordering hint has to be explicit
        scope.add(
            "PublicDefaultRoute",
            Resource::new("AWS::EC2::Route")
                .with_property("RouteTableId", public_rt.reference())
                .with_property("DestinationCidrBlock", "0.0.0.0/0")
                .with_property("GatewayId", igw.reference())
                .depends_on(&attachment),
        )?;
        for (i, subnet) in public_subnets.iter().enumerate() {
            scope.add(
                &format!("PublicSubnet{}Association", i + 1),
                Resource::new("AWS::EC2::SubnetRouteTableAssociation")
                    .with_property("RouteTableId", public_rt.reference())
                    .with_property("SubnetId", subnet.reference()),
            )?;
        }

        // NAT gateways in the public tier
        let mut nat_gateways = Vec::with_capacity(nat_count as usize);
        for i in 0..nat_count as usize {
            let eip = scope.add(
                &format!("NatEip{}", i + 1),
                Resource::new("AWS::EC2::EIP")
                    .with_property("Domain", "vpc")
                    .depends_on(&attachment),
            )?;
            let nat = scope.add(
                &format!("NatGateway{}", i + 1),
                Resource::new("AWS::EC2::NatGateway")
                    .with_property("AllocationId", eip.get_att("AllocationId"))
                    .with_property("SubnetId", public_subnets[i].reference()),
            )?;
            nat_gateways.push(nat);
        }

        // Per-zone private routing; no NAT means no egress route
        for (i, subnet) in private_subnets.iter().enumerate() {
            let rt = scope.add(
                &format!("PrivateRouteTable{}", i + 1),
                Resource::new("AWS::EC2::RouteTable").with_property("VpcId", vpc.reference()),
            )?;
            if !nat_gateways.is_empty() {
                scope.add(
                    &format!("PrivateDefaultRoute{}", i + 1),
                    Resource::new("AWS::EC2::Route")
                        .with_property("RouteTableId", rt.reference())
                        .with_property("DestinationCidrBlock", "0.0.0.0/0")
                        .with_property(
                            "NatGatewayId",
                            nat_gateways[i % nat_gateways.len()].reference(),
                        ),
                )?;
            }
            scope.add(
                &format!("PrivateSubnet{}Association", i + 1),
                Resource::new("AWS::EC2::SubnetRouteTableAssociation")
                    .with_property("RouteTableId", rt.reference())
                    .with_property("SubnetId", subnet.reference()),
            )?;
        }

        // Shared isolated route table carries no internet route
        let isolated_rt = scope.add(
            "IsolatedRouteTable",
            Resource::new("AWS::EC2::RouteTable").with_property("VpcId", vpc.reference()),
        )?;
        for (i, subnet) in isolated_subnets.iter().enumerate() {
            scope.add(
                &format!("IsolatedSubnet{}Association", i + 1),
                Resource::new("AWS::EC2::SubnetRouteTableAssociation")
                    .with_property("RouteTableId", isolated_rt.reference())
                    .with_property("SubnetId", subnet.reference()),
            )?;
        }

        // Unconditional flow log, rejected traffic only
        let log_group = scope.add(
            "FlowLogGroup",
            Resource::new("AWS::Logs::LogGroup").with_property(
                "LogGroupName",
                naming::resource_name(&environment, &pillar, "flowlog", None),
            ),
        )?;
        let role = scope.add(
            "FlowLogRole",
            Resource::new("AWS::IAM::Role")
                .with_property(
                    "AssumeRolePolicyDocument",
                    json!({
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Principal": { "Service": "vpc-flow-logs.amazonaws.com" },
                            "Action": "sts:AssumeRole"
                        }]
                    }),
                )
                .with_property(
                    "Policies",
                    json!([{
                        "PolicyName": "FlowLogDelivery",
                        "PolicyDocument": {
                            "Version": "2012-10-17",
                            "Statement": [{
                                "Effect": "Allow",
                                "Action": [
                                    "logs:CreateLogStream",
                                    "logs:PutLogEvents",
                                    "logs:DescribeLogStreams"
                                ],
                                "Resource": log_group.get_att("Arn")
                            }]
                        }
                    }]),
                ),
        )?;
        scope.add(
            "FlowLog",
            Resource::new("AWS::EC2::FlowLog")
                .with_property("ResourceId", vpc.reference())
                .with_property("ResourceType", "VPC")
                .with_property("TrafficType", "REJECT")
                .with_property("LogDestinationType", "cloud-watch-logs")
                .with_property("LogGroupName", log_group.reference())
                .with_property("DeliverLogsPermissionArn", role.get_att("Arn")),
        )?;

        Ok(Self {
            vpc,
            public_subnets,
            private_subnets,
            isolated_subnets,
            availability_zones,
            cidr: options.cidr,
        })
    }

    /// Handle to the VPC resource
    pub fn vpc(&self) -> &ResourceHandle {
        &self.vpc
    }

    /// Public-tier subnet handles, one per zone
    pub fn public_subnets(&self) -> &[ResourceHandle] {
        &self.public_subnets
    }

    /// Private-with-egress-tier subnet handles, one per zone
    pub fn private_subnets(&self) -> &[ResourceHandle] {
        &self.private_subnets
    }

    /// Isolated-tier subnet handles, one per zone
    pub fn isolated_subnets(&self) -> &[ResourceHandle] {
        &self.isolated_subnets
    }

    /// The availability zones the network spans
    pub fn availability_zones(&self) -> &[String] {
        &self.availability_zones
    }

    /// The network address block
    pub fn cidr(&self) -> Ipv4Cidr {
        self.cidr
    }
}
