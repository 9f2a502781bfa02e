//! Rule implementations.

use std::collections::BTreeMap;

use tracing::debug;

use topo_graph::BuildContext;
use topo_model::{is_cidr_literal, ResourceKind, ResourceSpec};

use crate::report::{RuleName, ValidationReport, Violation};

/// Validates a resolved build context.
///
/// Every rule runs against every resource it applies to; findings are
/// collected, never short-circuited, so one pass reports every violation.
pub struct StackValidator;

impl StackValidator {
    /// Run all rules and return the aggregated report.
    pub fn validate(ctx: &BuildContext) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::check_task_definitions(ctx, &mut report);
        Self::check_listeners(ctx, &mut report);
        Self::check_health_checks(ctx, &mut report);
        Self::check_ingress_peers(ctx, &mut report);
        Self::check_container_logging(ctx, &mut report);
        Self::check_network_spread(ctx, &mut report);

        debug!(
            "Validation finished: {} errors, {} warnings",
            report.errors().count(),
            report.warnings().count()
        );
        report
    }

    /// Every task definition needs at least one container, and container
    /// ports within one task definition must be pairwise distinct.
    fn check_task_definitions(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if node.kind() != ResourceKind::TaskDefinition {
                continue;
            }

            let mut container_count = 0usize;
            let mut port_use: BTreeMap<u16, usize> = BTreeMap::new();

            for other in ctx.registry().iter() {
                if let ResourceSpec::Container(container) = &other.spec {
                    if container.task_definition != node.id {
                        continue;
                    }
                    container_count += 1;
                    for mapping in &container.port_mappings {
                        *port_use.entry(mapping.container_port).or_insert(0) += 1;
                    }
                }
            }

            if container_count == 0 {
                report.add(Violation::error(
                    node.id.clone(),
                    RuleName::EmptyTaskDefinition,
                    "task definition has no containers",
                ));
            }

            for (port, uses) in port_use {
                if uses > 1 {
                    report.add(Violation::error(
                        node.id.clone(),
                        RuleName::PortConflict,
                        format!("container port {} mapped by {} containers", port, uses),
                    ));
                }
            }
        }
    }

    /// Every listener must route to at least one target group.
    fn check_listeners(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if let ResourceSpec::Listener(listener) = &node.spec {
                if listener.target_groups.is_empty() {
                    report.add(Violation::error(
                        node.id.clone(),
                        RuleName::MissingTargetGroup,
                        "listener routes to no target group",
                    ));
                }
            }
        }
    }

    /// A health check interval must be strictly greater than its timeout.
    fn check_health_checks(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if let ResourceSpec::TargetGroup(group) = &node.spec {
                let check = &group.health_check;
                if check.interval_secs <= check.timeout_secs {
                    report.add(Violation::error(
                        node.id.clone(),
                        RuleName::InvalidHealthCheck,
                        format!(
                            "health check interval ({}s) must be greater than timeout ({}s)",
                            check.interval_secs, check.timeout_secs
                        ),
                    ));
                }
            }
        }
    }

    /// Every ingress peer must be a CIDR literal or an existing security
    /// group.
    fn check_ingress_peers(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if let ResourceSpec::SecurityGroup(group) = &node.spec {
                for rule in &group.ingress {
                    if is_cidr_literal(&rule.peer) {
                        continue;
                    }

                    let peer_id = rule.peer.as_str().into();
                    match ctx.registry().lookup(&peer_id) {
                        Some(peer) if peer.kind() == ResourceKind::SecurityGroup => {}
                        Some(peer) => {
                            report.add(Violation::error(
                                node.id.clone(),
                                RuleName::UnresolvedIngressPeer,
                                format!(
                                    "ingress peer '{}' is a {}, not a security group",
                                    rule.peer,
                                    peer.kind()
                                ),
                            ));
                        }
                        None => {
                            report.add(Violation::error(
                                node.id.clone(),
                                RuleName::UnresolvedIngressPeer,
                                format!(
                                    "ingress peer '{}' is neither a CIDR literal nor a declared security group",
                                    rule.peer
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }

    /// Advisory: containers without a log stream prefix ship no logs.
    fn check_container_logging(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if let ResourceSpec::Container(container) = &node.spec {
                if container.log_stream_prefix.is_none() {
                    report.add(Violation::warning(
                        node.id.clone(),
                        RuleName::MissingLogPrefix,
                        "container has no log stream prefix",
                    ));
                }
            }
        }
    }

    /// Advisory: a single-AZ network has no zone redundancy.
    fn check_network_spread(ctx: &BuildContext, report: &mut ValidationReport) {
        for node in ctx.registry().iter() {
            if let ResourceSpec::Network(network) = &node.spec {
                if network.max_azs < 2 {
                    report.add(Violation::warning(
                        node.id.clone(),
                        RuleName::SingleAvailabilityZone,
                        "network spans a single availability zone",
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_model::{
        ContainerSpec, HealthCheck, IngressRule, ListenerSpec, NetworkSpec, PortMapping,
        Protocol, ResourceNode, SecurityGroupSpec, TargetGroupSpec, TaskDefinitionSpec,
    };

    fn resolved_context(nodes: Vec<ResourceNode>) -> BuildContext {
        let mut ctx = BuildContext::new();
        ctx.register_all(nodes).unwrap();
        ctx.resolve().unwrap();
        ctx
    }

    fn network(id: &str) -> ResourceNode {
        ResourceNode::new(
            id,
            ResourceSpec::Network(NetworkSpec {
                cidr: "10.0.0.0/16".to_string(),
                max_azs: 2,
            }),
        )
    }

    fn task_definition(id: &str) -> ResourceNode {
        ResourceNode::new(
            id,
            ResourceSpec::TaskDefinition(TaskDefinitionSpec {
                cluster: None,
                cpu: 256,
                memory_mib: 512,
            }),
        )
    }

    fn container(id: &str, task: &str, port: u16) -> ResourceNode {
        ResourceNode::new(
            id,
            ResourceSpec::Container(ContainerSpec {
                task_definition: task.into(),
                image: "ghcr.io/example/node:main".to_string(),
                port_mappings: vec![PortMapping::tcp(port)],
                environment: Default::default(),
                log_stream_prefix: Some("app".to_string()),
                essential: true,
            }),
        )
    }

    #[test]
    fn test_empty_task_definition_reported() {
        let ctx = resolved_context(vec![task_definition("app-task")]);
        let report = StackValidator::validate(&ctx);

        assert!(!report.passed());
        assert!(report
            .errors()
            .any(|v| v.rule == RuleName::EmptyTaskDefinition && v.resource == "app-task".into()));
    }

    #[test]
    fn test_port_conflict_reported_once_per_port() {
        let ctx = resolved_context(vec![
            task_definition("app-task"),
            container("web", "app-task", 80),
            container("web-2", "app-task", 80),
        ]);
        let report = StackValidator::validate(&ctx);

        let conflicts: Vec<_> = report
            .errors()
            .filter(|v| v.rule == RuleName::PortConflict)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].resource, "app-task".into());
        assert!(conflicts[0].message.contains("80"));
    }

    #[test]
    fn test_distinct_ports_pass() {
        let ctx = resolved_context(vec![
            task_definition("app-task"),
            container("web", "app-task", 80),
            container("mongo", "app-task", 27017),
        ]);
        let report = StackValidator::validate(&ctx);
        assert!(report.passed());
    }

    #[test]
    fn test_listener_without_target_group_reported() {
        let ctx = resolved_context(vec![
            network("app-network"),
            ResourceNode::new(
                "web-lb",
                ResourceSpec::LoadBalancer(topo_model::LoadBalancerSpec {
                    network: "app-network".into(),
                    internet_facing: true,
                }),
            ),
            ResourceNode::new(
                "web-listener",
                ResourceSpec::Listener(ListenerSpec {
                    load_balancer: "web-lb".into(),
                    port: 80,
                    protocol: Protocol::Http,
                    target_groups: Vec::new(),
                }),
            ),
        ]);
        let report = StackValidator::validate(&ctx);

        assert!(report
            .errors()
            .any(|v| v.rule == RuleName::MissingTargetGroup && v.resource == "web-listener".into()));
    }

    #[test]
    fn test_invalid_health_check_reported() {
        let ctx = resolved_context(vec![
            network("app-network"),
            ResourceNode::new(
                "web-tg",
                ResourceSpec::TargetGroup(TargetGroupSpec {
                    network: "app-network".into(),
                    port: 80,
                    protocol: Protocol::Http,
                    health_check: HealthCheck {
                        interval_secs: 5,
                        timeout_secs: 30,
                        ..HealthCheck::default()
                    },
                }),
            ),
        ]);
        let report = StackValidator::validate(&ctx);

        assert!(report
            .errors()
            .any(|v| v.rule == RuleName::InvalidHealthCheck && v.resource == "web-tg".into()));
    }

    #[test]
    fn test_ingress_peer_must_be_cidr_or_group() {
        let ctx = resolved_context(vec![
            network("app-network"),
            ResourceNode::new(
                "mongo-sg",
                ResourceSpec::SecurityGroup(SecurityGroupSpec {
                    network: "app-network".into(),
                    description: None,
                    ingress: vec![
                        IngressRule {
                            peer: "10.0.0.0/16".to_string(),
                            port: 27017,
                            protocol: Protocol::Tcp,
                            description: None,
                        },
                        IngressRule {
                            peer: "ghost-sg".to_string(),
                            port: 27017,
                            protocol: Protocol::Tcp,
                            description: None,
                        },
                    ],
                }),
            ),
        ]);
        let report = StackValidator::validate(&ctx);

        let unresolved: Vec<_> = report
            .errors()
            .filter(|v| v.rule == RuleName::UnresolvedIngressPeer)
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert!(unresolved[0].message.contains("ghost-sg"));
    }

    #[test]
    fn test_ingress_peer_of_wrong_kind_reported() {
        let ctx = resolved_context(vec![
            network("app-network"),
            ResourceNode::new(
                "mongo-sg",
                ResourceSpec::SecurityGroup(SecurityGroupSpec {
                    network: "app-network".into(),
                    description: None,
                    ingress: vec![IngressRule {
                        peer: "app-network".to_string(),
                        port: 27017,
                        protocol: Protocol::Tcp,
                        description: None,
                    }],
                }),
            ),
        ]);
        let report = StackValidator::validate(&ctx);

        assert!(report
            .errors()
            .any(|v| v.rule == RuleName::UnresolvedIngressPeer
                && v.message.contains("not a security group")));
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        let ctx = resolved_context(vec![
            task_definition("empty-task"),
            ResourceNode::new(
                "lonely-listener",
                ResourceSpec::Listener(ListenerSpec {
                    load_balancer: "web-lb".into(),
                    port: 80,
                    protocol: Protocol::Http,
                    target_groups: Vec::new(),
                }),
            ),
            ResourceNode::new(
                "web-lb",
                ResourceSpec::LoadBalancer(topo_model::LoadBalancerSpec {
                    network: "app-network".into(),
                    internet_facing: true,
                }),
            ),
            network("app-network"),
        ]);
        let report = StackValidator::validate(&ctx);

        // Both findings surface together; nothing short-circuits.
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_logging_and_spread_warnings() {
        let mut web = container("web", "app-task", 80);
        if let ResourceSpec::Container(spec) = &mut web.spec {
            spec.log_stream_prefix = None;
        }

        let single_az = ResourceNode::new(
            "tiny-network",
            ResourceSpec::Network(NetworkSpec {
                cidr: "10.1.0.0/16".to_string(),
                max_azs: 1,
            }),
        );

        let ctx = resolved_context(vec![task_definition("app-task"), web, single_az]);
        let report = StackValidator::validate(&ctx);

        assert!(report.passed());
        assert!(report.warnings().any(|v| v.rule == RuleName::MissingLogPrefix));
        assert!(report
            .warnings()
            .any(|v| v.rule == RuleName::SingleAvailabilityZone));
    }
}
