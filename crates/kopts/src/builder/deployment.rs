use std::collections::BTreeMap;

use k8s_openapi::{
    api::apps::v1::{self, DeploymentSpec},
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};
use serde::Serialize;

use crate::{
    builder::{
        meta::{self, impl_resource},
        pod::PodTemplate,
    },
    opt::{self, Opt},
};

/// A [`Deployment`](v1::Deployment) with a pre-initialized (empty) `matchLabels` selector.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Deployment {
    pub inner: v1::Deployment,
}

impl_resource!(Deployment => v1::Deployment);

impl Deployment {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut deployment = Self {
            inner: v1::Deployment {
                metadata: meta::new_object_meta(name),
                spec: Some(DeploymentSpec {
                    selector: LabelSelector {
                        match_labels: Some(BTreeMap::new()),
                        ..LabelSelector::default()
                    },
                    ..DeploymentSpec::default()
                }),
                ..v1::Deployment::default()
            },
        };

        opt::apply_all(&mut deployment, opts);
        deployment
    }

    pub fn spec(&self) -> Option<&DeploymentSpec> {
        self.inner.spec.as_ref()
    }

    fn spec_mut(&mut self) -> &mut DeploymentSpec {
        self.inner.spec.get_or_insert_with(DeploymentSpec::default)
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<Deployment> {
    meta::namespace(namespace)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Deployment> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Deployment> {
    meta::annotations(annotations)
}

/// Adds a key/value pair to the `matchLabels` of the deployment selector.
pub fn selector(key: impl Into<String>, value: impl Into<String>) -> Opt<Deployment> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |d: &mut Deployment| {
        d.spec_mut()
            .selector
            .match_labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.clone(), value.clone());
    })
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Deployment> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Deployment> {
    meta::labels(labels)
}

/// Embeds a copy of `template` as the deployment pod template.
pub fn pod_template(template: PodTemplate) -> Opt<Deployment> {
    Opt::new(move |d: &mut Deployment| d.spec_mut().template = template.inner.clone())
}

pub fn replicas(replicas: i32) -> Opt<Deployment> {
    Opt::new(move |d: &mut Deployment| d.spec_mut().replicas = Some(replicas))
}
