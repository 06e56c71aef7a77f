use std::collections::BTreeMap;

use k8s_openapi::api::core::v1;
use serde::Serialize;

use crate::{
    builder::meta::{self, impl_resource},
    opt::{self, Opt},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Namespace {
    pub inner: v1::Namespace,
}

impl_resource!(Namespace => v1::Namespace);

impl Namespace {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut namespace = Self {
            inner: v1::Namespace {
                metadata: meta::new_object_meta(name),
                ..v1::Namespace::default()
            },
        };

        opt::apply_all(&mut namespace, opts);
        namespace
    }
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Namespace> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Namespace> {
    meta::annotations(annotations)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Namespace> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Namespace> {
    meta::labels(labels)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::builder::meta::Resource;

    #[rstest]
    fn test_namespace_builder() {
        let namespace = Namespace::new("test", [
            annotation("test", "test2"),
            annotations(BTreeMap::from([
                ("hey".to_owned(), "there".to_owned()),
                ("yo".to_owned(), "what's up".to_owned()),
            ])),
            label("team", "platform"),
        ]);

        assert_eq!(namespace.name(), "test");
        assert_eq!(Namespace::kind(), "Namespace");
        assert_eq!(namespace.metadata().annotations.as_ref().map(BTreeMap::len), Some(3));
        assert_eq!(namespace.metadata().labels.as_ref().map(BTreeMap::len), Some(1));
        assert_eq!(namespace.inner.spec, None);
    }
}
