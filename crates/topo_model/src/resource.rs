//! Resource kinds and their typed attribute schemas.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::id::ResourceId;
use crate::reference::{AttributeRef, ReferenceKind};

/// The kinds of resources a deployment can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Network,
    Subnet,
    Cluster,
    TaskDefinition,
    Container,
    LoadBalancer,
    Listener,
    TargetGroup,
    SecurityGroup,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Subnet => "subnet",
            ResourceKind::Cluster => "cluster",
            ResourceKind::TaskDefinition => "task_definition",
            ResourceKind::Container => "container",
            ResourceKind::LoadBalancer => "load_balancer",
            ResourceKind::Listener => "listener",
            ResourceKind::TargetGroup => "target_group",
            ResourceKind::SecurityGroup => "security_group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire protocols used by port mappings, listeners and target groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Http,
    Https,
    Tcp,
    Udp,
}

impl Default for Protocol {
    fn default() -> Self {
        Protocol::Tcp
    }
}

/// Subnet placement within a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetVisibility {
    Public,
    PrivateWithEgress,
    Isolated,
}

/// Network attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub cidr: String,
    #[serde(default = "default_max_azs")]
    pub max_azs: u8,
}

fn default_max_azs() -> u8 {
    2
}

/// Subnet attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetSpec {
    pub network: ResourceId,
    pub cidr: String,
    pub visibility: SubnetVisibility,
}

/// Cluster attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub network: ResourceId,
}

/// Task definition attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinitionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ResourceId>,
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    #[serde(default = "default_memory_mib")]
    pub memory_mib: u32,
}

fn default_cpu() -> u32 {
    256
}

fn default_memory_mib() -> u32 {
    512
}

/// A container port exposed to the task network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub container_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u16>,
    #[serde(default)]
    pub protocol: Protocol,
}

impl PortMapping {
    pub fn tcp(container_port: u16) -> Self {
        Self {
            container_port,
            host_port: None,
            protocol: Protocol::Tcp,
        }
    }
}

/// Container attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub task_definition: ResourceId,
    pub image: String,
    #[serde(default)]
    pub port_mappings: Vec<PortMapping>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_stream_prefix: Option<String>,
    #[serde(default = "default_essential")]
    pub essential: bool,
}

fn default_essential() -> bool {
    true
}

/// Load balancer attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerSpec {
    pub network: ResourceId,
    #[serde(default = "default_internet_facing")]
    pub internet_facing: bool,
}

fn default_internet_facing() -> bool {
    true
}

/// Listener attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub load_balancer: ResourceId,
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub target_groups: Vec<ResourceId>,
}

/// Target health probing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default = "default_health_check_path")]
    pub path: String,
    #[serde(default = "default_health_check_protocol")]
    pub protocol: Protocol,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
    #[serde(default = "default_healthy_threshold")]
    pub healthy_threshold: u32,
    #[serde(default = "default_unhealthy_threshold")]
    pub unhealthy_threshold: u32,
}

fn default_health_check_path() -> String {
    "/".to_string()
}

fn default_health_check_protocol() -> Protocol {
    Protocol::Http
}

fn default_interval_secs() -> u32 {
    30
}

fn default_timeout_secs() -> u32 {
    5
}

fn default_healthy_threshold() -> u32 {
    2
}

fn default_unhealthy_threshold() -> u32 {
    10
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            path: default_health_check_path(),
            protocol: default_health_check_protocol(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
            healthy_threshold: default_healthy_threshold(),
            unhealthy_threshold: default_unhealthy_threshold(),
        }
    }
}

/// Target group attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetGroupSpec {
    pub network: ResourceId,
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub health_check: HealthCheck,
}

/// A single ingress rule on a security group.
///
/// The peer is a bare string: either a CIDR literal (`10.0.0.0/16`) or the
/// identifier of another security group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressRule {
    pub peer: String,
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Security group attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupSpec {
    pub network: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingress: Vec<IngressRule>,
}

/// The typed attribute schema for each resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceSpec {
    Network(NetworkSpec),
    Subnet(SubnetSpec),
    Cluster(ClusterSpec),
    TaskDefinition(TaskDefinitionSpec),
    Container(ContainerSpec),
    LoadBalancer(LoadBalancerSpec),
    Listener(ListenerSpec),
    TargetGroup(TargetGroupSpec),
    SecurityGroup(SecurityGroupSpec),
}

impl ResourceSpec {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceSpec::Network(_) => ResourceKind::Network,
            ResourceSpec::Subnet(_) => ResourceKind::Subnet,
            ResourceSpec::Cluster(_) => ResourceKind::Cluster,
            ResourceSpec::TaskDefinition(_) => ResourceKind::TaskDefinition,
            ResourceSpec::Container(_) => ResourceKind::Container,
            ResourceSpec::LoadBalancer(_) => ResourceKind::LoadBalancer,
            ResourceSpec::Listener(_) => ResourceKind::Listener,
            ResourceSpec::TargetGroup(_) => ResourceKind::TargetGroup,
            ResourceSpec::SecurityGroup(_) => ResourceKind::SecurityGroup,
        }
    }

    /// Identifier attributes that must resolve to other declared resources.
    ///
    /// Security group ingress peers are not listed here: a peer may be a CIDR
    /// literal instead of an identifier, so peer resolution is a validation
    /// rule rather than a hard reference.
    pub fn references(&self) -> Vec<AttributeRef> {
        match self {
            ResourceSpec::Network(_) => Vec::new(),
            ResourceSpec::Subnet(spec) => vec![AttributeRef::new(
                ReferenceKind::WithinNetwork,
                "network",
                spec.network.clone(),
            )],
            ResourceSpec::Cluster(spec) => vec![AttributeRef::new(
                ReferenceKind::WithinNetwork,
                "network",
                spec.network.clone(),
            )],
            ResourceSpec::TaskDefinition(spec) => spec
                .cluster
                .iter()
                .map(|cluster| {
                    AttributeRef::new(ReferenceKind::ScheduledOn, "cluster", cluster.clone())
                })
                .collect(),
            ResourceSpec::Container(spec) => vec![AttributeRef::new(
                ReferenceKind::BelongsTo,
                "task_definition",
                spec.task_definition.clone(),
            )],
            ResourceSpec::LoadBalancer(spec) => vec![AttributeRef::new(
                ReferenceKind::WithinNetwork,
                "network",
                spec.network.clone(),
            )],
            ResourceSpec::Listener(spec) => {
                let mut refs = vec![AttributeRef::new(
                    ReferenceKind::AttachedTo,
                    "load_balancer",
                    spec.load_balancer.clone(),
                )];
                refs.extend(spec.target_groups.iter().map(|group| {
                    AttributeRef::new(ReferenceKind::RoutesTo, "target_groups", group.clone())
                }));
                refs
            }
            ResourceSpec::TargetGroup(spec) => vec![AttributeRef::new(
                ReferenceKind::WithinNetwork,
                "network",
                spec.network.clone(),
            )],
            ResourceSpec::SecurityGroup(spec) => vec![AttributeRef::new(
                ReferenceKind::WithinNetwork,
                "network",
                spec.network.clone(),
            )],
        }
    }
}

/// A declared resource: identifier plus kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: ResourceId,
    #[serde(flatten)]
    pub spec: ResourceSpec,
}

impl ResourceNode {
    pub fn new(id: impl Into<ResourceId>, spec: ResourceSpec) -> Self {
        Self {
            id: id.into(),
            spec,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.spec.kind()
    }

    /// Check the declaration against its kind schema.
    ///
    /// Shape checks are local to one node: identifier format, CIDR syntax,
    /// non-zero ports and sizes. Anything involving another node is resolver
    /// or validator territory.
    pub fn validate_shape(&self) -> ModelResult<()> {
        if !self.id.is_valid() {
            return Err(ModelError::InvalidIdentifier(self.id.to_string()));
        }

        match &self.spec {
            ResourceSpec::Network(spec) => {
                self.check_cidr(&spec.cidr)?;
                if spec.max_azs == 0 {
                    return Err(self.invalid("max_azs", "must be at least 1"));
                }
            }
            ResourceSpec::Subnet(spec) => {
                self.check_cidr(&spec.cidr)?;
            }
            ResourceSpec::Cluster(_) => {}
            ResourceSpec::TaskDefinition(spec) => {
                if spec.cpu == 0 {
                    return Err(self.invalid("cpu", "must be non-zero"));
                }
                if spec.memory_mib == 0 {
                    return Err(self.invalid("memory_mib", "must be non-zero"));
                }
            }
            ResourceSpec::Container(spec) => {
                if spec.image.is_empty() {
                    return Err(self.invalid("image", "must not be empty"));
                }
                for mapping in &spec.port_mappings {
                    if mapping.container_port == 0 {
                        return Err(self.invalid("port_mappings", "container_port must be non-zero"));
                    }
                }
            }
            ResourceSpec::LoadBalancer(_) => {}
            ResourceSpec::Listener(spec) => {
                if spec.port == 0 {
                    return Err(self.invalid("port", "must be non-zero"));
                }
            }
            ResourceSpec::TargetGroup(spec) => {
                if spec.port == 0 {
                    return Err(self.invalid("port", "must be non-zero"));
                }
                if spec.health_check.interval_secs == 0 {
                    return Err(self.invalid("health_check", "interval_secs must be non-zero"));
                }
                if spec.health_check.timeout_secs == 0 {
                    return Err(self.invalid("health_check", "timeout_secs must be non-zero"));
                }
            }
            ResourceSpec::SecurityGroup(spec) => {
                for rule in &spec.ingress {
                    if rule.peer.is_empty() {
                        return Err(self.invalid("ingress", "peer must not be empty"));
                    }
                    if rule.port == 0 {
                        return Err(self.invalid("ingress", "port must be non-zero"));
                    }
                }
            }
        }

        Ok(())
    }

    fn check_cidr(&self, cidr: &str) -> ModelResult<()> {
        if !is_cidr_literal(cidr) {
            return Err(ModelError::InvalidCidr {
                resource: self.id.clone(),
                cidr: cidr.to_string(),
            });
        }
        Ok(())
    }

    fn invalid(&self, attribute: &'static str, message: impl Into<String>) -> ModelError {
        ModelError::InvalidAttribute {
            resource: self.id.clone(),
            attribute,
            message: message.into(),
        }
    }
}

/// Check whether a string is an IPv4 CIDR literal such as `10.0.0.0/16`.
pub fn is_cidr_literal(value: &str) -> bool {
    let pattern = Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})$")
        .expect("CIDR pattern is well-formed");

    let captures = match pattern.captures(value) {
        Some(captures) => captures,
        None => return false,
    };

    let octets_ok = (1..=4).all(|i| {
        captures[i]
            .parse::<u32>()
            .map_or(false, |octet| octet <= 255)
    });
    let prefix_ok = captures[5]
        .parse::<u32>()
        .map_or(false, |prefix| prefix <= 32);

    octets_ok && prefix_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(id: &str, cidr: &str) -> ResourceNode {
        ResourceNode::new(
            id,
            ResourceSpec::Network(NetworkSpec {
                cidr: cidr.to_string(),
                max_azs: 2,
            }),
        )
    }

    #[test]
    fn test_cidr_literals() {
        assert!(is_cidr_literal("10.0.0.0/16"));
        assert!(is_cidr_literal("192.168.1.0/24"));
        assert!(is_cidr_literal("0.0.0.0/0"));

        assert!(!is_cidr_literal("10.0.0.0"));
        assert!(!is_cidr_literal("10.0.0.256/16"));
        assert!(!is_cidr_literal("10.0.0.0/33"));
        assert!(!is_cidr_literal("web-sg"));
    }

    #[test]
    fn test_shape_valid_network() {
        network("app-network", "10.0.0.0/16").validate_shape().unwrap();
    }

    #[test]
    fn test_shape_rejects_bad_cidr() {
        let err = network("app-network", "not-a-cidr").validate_shape().unwrap_err();
        assert!(matches!(err, ModelError::InvalidCidr { .. }));
    }

    #[test]
    fn test_shape_rejects_bad_identifier() {
        let err = network("App Network", "10.0.0.0/16").validate_shape().unwrap_err();
        assert!(matches!(err, ModelError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_shape_rejects_zero_port() {
        let node = ResourceNode::new(
            "web",
            ResourceSpec::Container(ContainerSpec {
                task_definition: "app-task".into(),
                image: "ghcr.io/example/node:main".to_string(),
                port_mappings: vec![PortMapping::tcp(0)],
                environment: BTreeMap::new(),
                log_stream_prefix: None,
                essential: true,
            }),
        );
        let err = node.validate_shape().unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_references_for_listener() {
        let node = ResourceNode::new(
            "web-listener",
            ResourceSpec::Listener(ListenerSpec {
                load_balancer: "web-lb".into(),
                port: 80,
                protocol: Protocol::Http,
                target_groups: vec!["web-tg".into()],
            }),
        );

        let refs = node.spec.references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, ReferenceKind::AttachedTo);
        assert_eq!(refs[0].target, "web-lb".into());
        assert_eq!(refs[1].kind, ReferenceKind::RoutesTo);
    }

    #[test]
    fn test_manifest_roundtrip() {
        let yaml = r#"
id: web-tg
kind: target_group
network: app-network
port: 80
protocol: http
health_check:
  interval_secs: 200
  timeout_secs: 120
"#;
        let node: ResourceNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.kind(), ResourceKind::TargetGroup);

        match &node.spec {
            ResourceSpec::TargetGroup(spec) => {
                assert_eq!(spec.health_check.interval_secs, 200);
                assert_eq!(spec.health_check.timeout_secs, 120);
                // Unset fields fall back to their defaults.
                assert_eq!(spec.health_check.path, "/");
                assert_eq!(spec.health_check.healthy_threshold, 2);
                assert_eq!(spec.health_check.unhealthy_threshold, 10);
            }
            other => panic!("unexpected spec: {:?}", other),
        }
    }
}
