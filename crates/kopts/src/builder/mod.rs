//! This module provides builders for various (Kubernetes) objects.
//!
//! Each submodule holds one resource kind: a wrapper type with a `new` constructor and a set of
//! option functions returning [`Opt`](crate::Opt)s for that wrapper. Constructors never fail,
//! nothing is validated. Whatever ends up in the object is handed to the consumer of the
//! rendered document as is.
//!
pub mod configmap;
pub mod cron_job;
pub mod deployment;
pub mod ingress;
pub mod meta;
pub mod namespace;
pub mod persistent_volume;
pub mod pod;
pub mod rbac;
pub mod secret;
pub mod service;
