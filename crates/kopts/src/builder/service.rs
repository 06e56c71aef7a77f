use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{self, ServicePort, ServiceSpec},
    apimachinery::pkg::util::intstr::IntOrString,
};
use serde::Serialize;

use crate::{
    builder::meta::{self, impl_resource},
    opt::{self, Opt},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum ServiceType {
    ClusterIP,
    NodePort,
    LoadBalancer,
    ExternalName,
}

/// A [`Service`](v1::Service) with a pre-initialized (empty) selector.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Service {
    pub inner: v1::Service,
}

impl_resource!(Service => v1::Service);

impl Service {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut service = Self {
            inner: v1::Service {
                metadata: meta::new_object_meta(name),
                spec: Some(ServiceSpec {
                    selector: Some(BTreeMap::new()),
                    ..ServiceSpec::default()
                }),
                ..v1::Service::default()
            },
        };

        opt::apply_all(&mut service, opts);
        service
    }

    pub fn spec(&self) -> Option<&ServiceSpec> {
        self.inner.spec.as_ref()
    }

    fn spec_mut(&mut self) -> &mut ServiceSpec {
        self.inner.spec.get_or_insert_with(ServiceSpec::default)
    }

    fn push_port(&mut self, port: ServicePort) {
        self.spec_mut().ports.get_or_insert_with(Vec::new).push(port);
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<Service> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Service> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Service> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Service> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Service> {
    meta::annotations(annotations)
}

/// Exposes `port`, forwarding to `target_port` on the selected pods.
pub fn port(port: i32, target_port: i32) -> Opt<Service> {
    let port = ServicePort {
        port,
        target_port: Some(IntOrString::Int(target_port)),
        ..ServicePort::default()
    };
    Opt::new(move |s: &mut Service| s.push_port(port.clone()))
}

/// Like [`port`], with a port name. Names are required once a service exposes several ports.
pub fn named_port(name: impl Into<String>, port: i32, target_port: i32) -> Opt<Service> {
    let port = ServicePort {
        name: Some(name.into()),
        port,
        target_port: Some(IntOrString::Int(target_port)),
        ..ServicePort::default()
    };
    Opt::new(move |s: &mut Service| s.push_port(port.clone()))
}

/// Adds a key/value pair to the pod selector.
pub fn selector(key: impl Into<String>, value: impl Into<String>) -> Opt<Service> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |s: &mut Service| {
        s.spec_mut()
            .selector
            .get_or_insert_with(BTreeMap::new)
            .insert(key.clone(), value.clone());
    })
}

pub fn service_type(service_type: ServiceType) -> Opt<Service> {
    Opt::new(move |s: &mut Service| s.spec_mut().type_ = Some(service_type.to_string()))
}
