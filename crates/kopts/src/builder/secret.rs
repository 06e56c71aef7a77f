use std::collections::BTreeMap;

use k8s_openapi::{ByteString, api::core::v1};
use serde::Serialize;

use crate::{
    builder::meta::{self, impl_resource},
    opt::{self, Opt},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Secret {
    pub inner: v1::Secret,
}

impl_resource!(Secret => v1::Secret);

impl Secret {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut secret = Self {
            inner: v1::Secret {
                metadata: meta::new_object_meta(name),
                ..v1::Secret::default()
            },
        };

        opt::apply_all(&mut secret, opts);
        secret
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<Secret> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Secret> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Secret> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Secret> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Secret> {
    meta::annotations(annotations)
}

/// Sets the secret data to exactly one key/value pair.
///
/// Unlike [`configmap::data`](crate::builder::configmap::data) this does not merge: any data set
/// earlier is dropped.
pub fn data(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Opt<Secret> {
    let (key, value) = (key.into(), ByteString(value.into()));
    Opt::new(move |s: &mut Secret| {
        s.inner.data = Some(BTreeMap::from([(key.clone(), value.clone())]));
    })
}

pub fn immutable(immutable: bool) -> Opt<Secret> {
    Opt::new(move |s: &mut Secret| s.inner.immutable = Some(immutable))
}

/// Sets the secret type, e.g. `Opaque` or `kubernetes.io/tls`.
pub fn secret_type(secret_type: impl Into<String>) -> Opt<Secret> {
    let secret_type = secret_type.into();
    Opt::new(move |s: &mut Secret| s.inner.type_ = Some(secret_type.clone()))
}
