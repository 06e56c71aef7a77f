use std::collections::BTreeMap;

use k8s_openapi::{ByteString, api::core::v1};
use serde::Serialize;

use crate::{
    builder::meta::{self, impl_resource},
    opt::{self, Opt},
};

/// A [`ConfigMap`](v1::ConfigMap) with pre-initialized (empty) `data` and `binaryData`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigMap {
    pub inner: v1::ConfigMap,
}

impl_resource!(ConfigMap => v1::ConfigMap);

impl ConfigMap {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut config_map = Self {
            inner: v1::ConfigMap {
                metadata: meta::new_object_meta(name),
                data: Some(BTreeMap::new()),
                binary_data: Some(BTreeMap::new()),
                ..v1::ConfigMap::default()
            },
        };

        opt::apply_all(&mut config_map, opts);
        config_map
    }

    fn data_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.inner.data.get_or_insert_with(BTreeMap::new)
    }

    fn binary_data_mut(&mut self) -> &mut BTreeMap<String, ByteString> {
        self.inner.binary_data.get_or_insert_with(BTreeMap::new)
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<ConfigMap> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<ConfigMap> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<ConfigMap> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<ConfigMap> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<ConfigMap> {
    meta::annotations(annotations)
}

pub fn immutable(immutable: bool) -> Opt<ConfigMap> {
    Opt::new(move |c: &mut ConfigMap| c.inner.immutable = Some(immutable))
}

/// Sets a single key of the config map data.
pub fn data(key: impl Into<String>, value: impl Into<String>) -> Opt<ConfigMap> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |c: &mut ConfigMap| {
        c.data_mut().insert(key.clone(), value.clone());
    })
}

/// Merges `data` into the config map data.
pub fn data_map(data: BTreeMap<String, String>) -> Opt<ConfigMap> {
    Opt::new(move |c: &mut ConfigMap| {
        c.data_mut()
            .extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
    })
}

/// Sets a single key of the config map binary data.
pub fn binary_data(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Opt<ConfigMap> {
    let (key, value) = (key.into(), ByteString(value.into()));
    Opt::new(move |c: &mut ConfigMap| {
        c.binary_data_mut().insert(key.clone(), value.clone());
    })
}

/// Merges `data` into the config map binary data.
pub fn binary_data_map(data: BTreeMap<String, Vec<u8>>) -> Opt<ConfigMap> {
    Opt::new(move |c: &mut ConfigMap| {
        c.binary_data_mut().extend(
            data.iter()
                .map(|(k, v)| (k.clone(), ByteString(v.clone()))),
        );
    })
}
