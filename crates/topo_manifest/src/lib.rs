//! # topo_manifest
//!
//! Declarative manifest reading for topoforge.
//!
//! A manifest is a YAML document with a `version` and a `resources` list;
//! each resource is `{ id, kind, ...attributes }`. A manifest path may also
//! be a directory, in which case every `*.yaml`/`*.yml` file underneath is
//! read (in sorted path order) and all resources form one declaration batch —
//! references across files resolve because registration completes before
//! resolution.
//!
//! Container environment values may be written as `{ secret: /path }`; the
//! reader resolves them through a [`topo_secrets::SecretStore`] before
//! handing nodes to the core, which only ever sees opaque strings.

pub mod error;
pub mod reader;
pub mod sample;

pub use error::{ManifestError, ManifestResult};
pub use reader::{ManifestReader, SUPPORTED_VERSION};
pub use sample::{write_sample, SAMPLE_MANIFEST};
