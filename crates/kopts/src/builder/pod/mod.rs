use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        ConfigMapVolumeSource, PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec,
        SecretVolumeSource, Volume,
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use serde::Serialize;

use crate::{
    builder::meta,
    opt::{self, Opt},
};

use self::{container::Container, toleration::Toleration};

pub mod container;
pub mod probe;
pub mod toleration;

/// Restart policy for all containers within a pod.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

/// A [`PodTemplateSpec`] to be embedded into workloads such as
/// [`Deployment`](crate::builder::deployment::Deployment)s or
/// [`CronJob`](crate::builder::cron_job::CronJob)s.
///
/// Workloads store a copy of the template, changing the template afterwards does not change
/// workloads which already received it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PodTemplate {
    pub inner: PodTemplateSpec,
}

impl PodTemplate {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut template = Self {
            inner: PodTemplateSpec {
                metadata: Some(meta::new_object_meta(name)),
                spec: Some(PodSpec {
                    containers: Vec::new(),
                    ..PodSpec::default()
                }),
            },
        };

        opt::apply_all(&mut template, opts);
        template
    }

    pub fn metadata(&self) -> Option<&ObjectMeta> {
        self.inner.metadata.as_ref()
    }

    pub fn spec(&self) -> Option<&PodSpec> {
        self.inner.spec.as_ref()
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        self.inner.metadata.get_or_insert_with(ObjectMeta::default)
    }

    fn spec_mut(&mut self) -> &mut PodSpec {
        self.inner.spec.get_or_insert_with(PodSpec::default)
    }

    fn push_volume(&mut self, volume: Volume) {
        self.spec_mut()
            .volumes
            .get_or_insert_with(Vec::new)
            .push(volume);
    }
}

impl From<PodTemplate> for PodTemplateSpec {
    fn from(template: PodTemplate) -> Self {
        template.inner
    }
}

/// Adds a single label to the pod template.
pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<PodTemplate> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |p: &mut PodTemplate| meta::add_label(p.metadata_mut(), &key, &value))
}

/// Adds multiple labels to the pod template.
pub fn labels(labels: BTreeMap<String, String>) -> Opt<PodTemplate> {
    Opt::new(move |p: &mut PodTemplate| {
        let meta = p.metadata_mut();
        for (key, value) in &labels {
            meta::add_label(meta, key, value);
        }
    })
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<PodTemplate> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |p: &mut PodTemplate| meta::add_annotation(p.metadata_mut(), &key, &value))
}

pub fn container(container: Container) -> Opt<PodTemplate> {
    Opt::new(move |p: &mut PodTemplate| p.spec_mut().containers.push(container.inner.clone()))
}

pub fn init_container(container: Container) -> Opt<PodTemplate> {
    Opt::new(move |p: &mut PodTemplate| {
        p.spec_mut()
            .init_containers
            .get_or_insert_with(Vec::new)
            .push(container.inner.clone());
    })
}

/// Adds a volume named `volume` backed by the ConfigMap `config_map`.
pub fn config_map_volume(
    volume: impl Into<String>,
    config_map: impl Into<String>,
) -> Opt<PodTemplate> {
    let volume = Volume {
        name: volume.into(),
        config_map: Some(ConfigMapVolumeSource {
            name: config_map.into(),
            ..ConfigMapVolumeSource::default()
        }),
        ..Volume::default()
    };
    Opt::new(move |p: &mut PodTemplate| p.push_volume(volume.clone()))
}

/// Adds a volume named `volume` backed by the Secret `secret`.
pub fn secret_volume(volume: impl Into<String>, secret: impl Into<String>) -> Opt<PodTemplate> {
    let volume = Volume {
        name: volume.into(),
        secret: Some(SecretVolumeSource {
            secret_name: Some(secret.into()),
            ..SecretVolumeSource::default()
        }),
        ..Volume::default()
    };
    Opt::new(move |p: &mut PodTemplate| p.push_volume(volume.clone()))
}

/// Adds a volume named `volume` backed by the PersistentVolumeClaim `claim`.
pub fn persistent_volume_claim_volume(
    volume: impl Into<String>,
    claim: impl Into<String>,
) -> Opt<PodTemplate> {
    let volume = Volume {
        name: volume.into(),
        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
            claim_name: claim.into(),
            ..PersistentVolumeClaimVolumeSource::default()
        }),
        ..Volume::default()
    };
    Opt::new(move |p: &mut PodTemplate| p.push_volume(volume.clone()))
}

pub fn restart_policy(policy: RestartPolicy) -> Opt<PodTemplate> {
    Opt::new(move |p: &mut PodTemplate| p.spec_mut().restart_policy = Some(policy.to_string()))
}

pub fn service_account(name: impl Into<String>) -> Opt<PodTemplate> {
    let name = name.into();
    Opt::new(move |p: &mut PodTemplate| p.spec_mut().service_account_name = Some(name.clone()))
}

pub fn toleration(toleration: Toleration) -> Opt<PodTemplate> {
    Opt::new(move |p: &mut PodTemplate| {
        p.spec_mut()
            .tolerations
            .get_or_insert_with(Vec::new)
            .push(toleration.inner.clone());
    })
}

pub fn node_selector(key: impl Into<String>, value: impl Into<String>) -> Opt<PodTemplate> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |p: &mut PodTemplate| {
        p.spec_mut()
            .node_selector
            .get_or_insert_with(BTreeMap::new)
            .insert(key.clone(), value.clone());
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::builder::pod::{
        container,
        toleration::{self, TaintEffect},
    };

    #[fixture]
    fn dummy_container() -> Container {
        Container::new("web", [container::image("repo/img:tag")])
    }

    #[rstest]
    fn empty_pod_template() {
        let template = PodTemplate::new("test", []);

        let meta = template.metadata().cloned().unwrap_or_default();
        assert_eq!(meta.name.as_deref(), Some("test"));
        assert_eq!(meta.labels, Some(BTreeMap::new()));
        assert_eq!(template.spec().map(|s| s.containers.len()), Some(0));
    }

    #[rstest]
    fn test_pod_template_builder(dummy_container: Container) {
        let template = PodTemplate::new("test", [
            label("testing", "again"),
            label("app", "web"),
            container(dummy_container.clone()),
            init_container(Container::new("init", [])),
            config_map_volume("config", "myconfigmap"),
            secret_volume("creds", "mysecret"),
            persistent_volume_claim_volume("data", "myclaim"),
            restart_policy(RestartPolicy::OnFailure),
            service_account("runner"),
            toleration(Toleration::new("dedicated", [toleration::effect(
                TaintEffect::NoSchedule,
            )])),
            node_selector("disktype", "ssd"),
        ]);

        let meta = template.metadata().cloned().unwrap_or_default();
        assert_eq!(
            meta.labels,
            Some(BTreeMap::from([
                ("app".to_owned(), "web".to_owned()),
                ("testing".to_owned(), "again".to_owned()),
            ]))
        );

        let spec = template.spec().cloned().unwrap_or_default();
        assert_eq!(spec.containers, vec![dummy_container.inner]);
        assert_eq!(spec.init_containers.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            spec.volumes
                .iter()
                .flatten()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>(),
            vec!["config", "creds", "data"]
        );
        assert_eq!(spec.restart_policy.as_deref(), Some("OnFailure"));
        assert_eq!(spec.service_account_name.as_deref(), Some("runner"));
        assert_eq!(spec.tolerations.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            spec.node_selector,
            Some(BTreeMap::from([("disktype".to_owned(), "ssd".to_owned())]))
        );
    }
}
