//! Option-style builders for Kubernetes API objects.
//!
//! Every resource kind is a thin wrapper around its [`k8s_openapi`] type. A named constructor
//! fills in the identity metadata (name, empty labels, empty annotations) and whatever defaults
//! the kind needs, then applies a list of [`Opt`]s in order. Options are plain values: they can
//! be built once, applied conditionally, applied to several objects or applied after
//! construction.
//!
//! ```
//! use kopts::{
//!     builder::{
//!         deployment::{self, Deployment},
//!         pod::{self, PodTemplate, container::{self, Container}},
//!     },
//!     yaml::ToYaml,
//! };
//!
//! let web = Container::new("web", [
//!     container::image("repo/img:tag"),
//!     container::port("http", 8080),
//! ]);
//!
//! let mut dep = Deployment::new("web", [
//!     deployment::namespace("testing"),
//!     deployment::selector("app", "web"),
//!     deployment::pod_template(PodTemplate::new("web", [pod::container(web)])),
//!     deployment::replicas(3),
//! ]);
//!
//! // Options can be applied after construction too
//! deployment::replicas(1).apply(&mut dep);
//!
//! let yaml = dep.to_yaml().unwrap();
//! assert!(yaml.starts_with("---\n"));
//! assert!(yaml.contains("replicas: 1"));
//! ```

pub mod builder;
pub mod logging;
pub mod opt;
pub mod yaml;

// External re-exports
pub use k8s_openapi;

pub use crate::{builder::meta::Resource, opt::Opt};
