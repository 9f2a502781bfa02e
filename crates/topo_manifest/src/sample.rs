//! Sample manifest scaffold.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ManifestError, ManifestResult};

/// A complete service stack: network, cluster, one task with a Node.js and a
/// MongoDB container, a load balancer in front, and security groups wiring
/// web traffic to the application and the application to the database.
pub const SAMPLE_MANIFEST: &str = r#"# topoforge manifest.
#
# Declaration order does not matter: resources may reference identifiers
# declared later in this file (or in a sibling file when building from a
# directory).
version: 1

resources:
  - id: app-network
    kind: network
    cidr: 10.0.0.0/16
    max_azs: 2

  - id: public-subnet
    kind: subnet
    network: app-network
    cidr: 10.0.0.0/24
    visibility: public

  - id: private-subnet
    kind: subnet
    network: app-network
    cidr: 10.0.1.0/24
    visibility: private_with_egress

  - id: app-cluster
    kind: cluster
    network: app-network

  - id: app-task
    kind: task_definition
    cluster: app-cluster
    cpu: 1024
    memory_mib: 4096

  - id: mongo-server
    kind: container
    task_definition: app-task
    image: mongo
    log_stream_prefix: mongo-server
    port_mappings:
      - container_port: 27017
    environment:
      MONGO_INITDB_DATABASE: mydatabase
      MONGO_INITDB_ROOT_USERNAME:
        secret: /worktask/database-username
      MONGO_INITDB_ROOT_PASSWORD:
        secret: /worktask/database-password

  - id: node-server
    kind: container
    task_definition: app-task
    image: ghcr.io/example/node:main
    log_stream_prefix: node-server
    port_mappings:
      - container_port: 80
    environment:
      MONGO_INITDB_DATABASE: mydatabase
      MONGO_INITDB_ROOT_USERNAME:
        secret: /worktask/database-username
      MONGO_INITDB_ROOT_PASSWORD:
        secret: /worktask/database-password

  - id: web-lb
    kind: load_balancer
    network: app-network
    internet_facing: true

  - id: web-tg
    kind: target_group
    network: app-network
    port: 80
    protocol: http
    health_check:
      path: /
      interval_secs: 200
      timeout_secs: 120
      healthy_threshold: 2
      unhealthy_threshold: 10

  - id: web-listener
    kind: listener
    load_balancer: web-lb
    port: 80
    protocol: http
    target_groups:
      - web-tg

  - id: web-sg
    kind: security_group
    network: app-network
    description: Node.js server
    ingress:
      - peer: 0.0.0.0/0
        port: 80

  - id: mongo-sg
    kind: security_group
    network: app-network
    description: MongoDB server
    ingress:
      - peer: web-sg
        port: 27017
        description: Allow inbound access from the Node.js server
"#;

/// Write the sample manifest, refusing to overwrite an existing file.
pub fn write_sample(path: impl AsRef<Path>) -> ManifestResult<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(ManifestError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, SAMPLE_MANIFEST)?;
    info!("Wrote sample manifest to {:?}", path);
    Ok(())
}
