use k8s_openapi::api::core::v1;
use serde::Serialize;

use crate::opt::{self, Opt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum TaintEffect {
    NoSchedule,
    PreferNoSchedule,
    NoExecute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum TolerationOperator {
    Exists,
    Equal,
}

/// A node [`Toleration`](v1::Toleration) for a [`PodTemplate`](super::PodTemplate).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Toleration {
    pub inner: v1::Toleration,
}

impl Toleration {
    pub fn new(key: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut toleration = Self {
            inner: v1::Toleration {
                key: Some(key.into()),
                ..v1::Toleration::default()
            },
        };

        opt::apply_all(&mut toleration, opts);
        toleration
    }
}

impl From<Toleration> for v1::Toleration {
    fn from(toleration: Toleration) -> Self {
        toleration.inner
    }
}

pub fn value(value: impl Into<String>) -> Opt<Toleration> {
    let value = value.into();
    Opt::new(move |t: &mut Toleration| t.inner.value = Some(value.clone()))
}

pub fn effect(effect: TaintEffect) -> Opt<Toleration> {
    Opt::new(move |t: &mut Toleration| t.inner.effect = Some(effect.to_string()))
}

pub fn operator(operator: TolerationOperator) -> Opt<Toleration> {
    Opt::new(move |t: &mut Toleration| t.inner.operator = Some(operator.to_string()))
}

/// How long a pod tolerating a `NoExecute` taint stays bound before it is evicted.
pub fn toleration_seconds(seconds: i64) -> Opt<Toleration> {
    Opt::new(move |t: &mut Toleration| t.inner.toleration_seconds = Some(seconds))
}
