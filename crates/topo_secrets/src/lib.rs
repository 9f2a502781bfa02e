//! # topo_secrets
//!
//! Secret lookup collaborator for topoforge.
//!
//! The compile pipeline never fetches credentials itself: manifests name
//! secrets by path and the manifest loader resolves them through a
//! [`SecretStore`] before the core ever sees them. Stores are deliberately
//! dumb key-value lookups; rotation, caching and access control belong to
//! whatever backs the store.

pub mod error;
pub mod store;

pub use error::{SecretError, SecretResult};
pub use store::{EnvSecretStore, MemorySecretStore, SecretStore};
