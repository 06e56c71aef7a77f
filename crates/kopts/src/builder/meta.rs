//! Identity metadata shared by every resource kind.
//!
//! Constructors call [`new_object_meta`], so labels and annotations are always present (empty)
//! right after construction. The generic options in this module work with any [`Resource`].
use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::opt::Opt;

/// A wrapper around a top-level Kubernetes object which carries [`ObjectMeta`].
///
/// The kind and API version are fixed per wrapper and taken from the wrapped
/// [`k8s_openapi::Resource`].
pub trait Resource: Sized + 'static {
    type Inner: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta>;

    fn inner(&self) -> &Self::Inner;

    fn inner_mut(&mut self) -> &mut Self::Inner;

    fn into_inner(self) -> Self::Inner;

    fn metadata(&self) -> &ObjectMeta {
        k8s_openapi::Metadata::metadata(self.inner())
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        k8s_openapi::Metadata::metadata_mut(self.inner_mut())
    }

    fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    fn kind() -> &'static str {
        <Self::Inner as k8s_openapi::Resource>::KIND
    }

    fn api_version() -> &'static str {
        <Self::Inner as k8s_openapi::Resource>::API_VERSION
    }
}

/// Implements [`Resource`] (and the conversions into the wrapped type) for a wrapper struct with
/// an `inner` field.
macro_rules! impl_resource {
    ($wrapper:ty => $inner:ty) => {
        impl $crate::builder::meta::Resource for $wrapper {
            type Inner = $inner;

            fn inner(&self) -> &$inner {
                &self.inner
            }

            fn inner_mut(&mut self) -> &mut $inner {
                &mut self.inner
            }

            fn into_inner(self) -> $inner {
                self.inner
            }
        }

        impl From<$wrapper> for $inner {
            fn from(wrapper: $wrapper) -> Self {
                wrapper.inner
            }
        }

        impl AsRef<$inner> for $wrapper {
            fn as_ref(&self) -> &$inner {
                &self.inner
            }
        }
    };
}

pub(crate) use impl_resource;

/// Returns [`ObjectMeta`] with the given name and empty labels and annotations.
pub fn new_object_meta(name: impl Into<String>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.into()),
        labels: Some(BTreeMap::new()),
        annotations: Some(BTreeMap::new()),
        ..ObjectMeta::default()
    }
}

pub fn set_namespace(meta: &mut ObjectMeta, namespace: impl Into<String>) {
    meta.namespace = Some(namespace.into());
}

/// This adds a single label to the existing labels.
/// It'll override a label with the same key.
pub fn add_label(meta: &mut ObjectMeta, key: impl Into<String>, value: impl Into<String>) {
    meta.labels
        .get_or_insert_with(BTreeMap::new)
        .insert(key.into(), value.into());
}

/// This adds a single annotation to the existing annotations.
/// It'll override an annotation with the same key.
pub fn add_annotation(meta: &mut ObjectMeta, key: impl Into<String>, value: impl Into<String>) {
    meta.annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(key.into(), value.into());
}

/// Sets the namespace of any [`Resource`].
pub fn namespace<T: Resource>(namespace: impl Into<String>) -> Opt<T> {
    let namespace = namespace.into();
    Opt::new(move |resource: &mut T| set_namespace(resource.metadata_mut(), namespace.as_str()))
}

/// Adds a single label to any [`Resource`].
pub fn label<T: Resource>(key: impl Into<String>, value: impl Into<String>) -> Opt<T> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |resource: &mut T| add_label(resource.metadata_mut(), &key, &value))
}

/// Adds multiple labels to any [`Resource`]. Existing labels with the same keys are overwritten.
pub fn labels<T: Resource>(labels: BTreeMap<String, String>) -> Opt<T> {
    Opt::new(move |resource: &mut T| {
        let meta = resource.metadata_mut();
        for (key, value) in &labels {
            add_label(meta, key, value);
        }
    })
}

/// Adds a single annotation to any [`Resource`].
pub fn annotation<T: Resource>(key: impl Into<String>, value: impl Into<String>) -> Opt<T> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |resource: &mut T| add_annotation(resource.metadata_mut(), &key, &value))
}

/// Adds multiple annotations to any [`Resource`]. Existing annotations with the same keys are
/// overwritten.
pub fn annotations<T: Resource>(annotations: BTreeMap<String, String>) -> Opt<T> {
    Opt::new(move |resource: &mut T| {
        let meta = resource.metadata_mut();
        for (key, value) in &annotations {
            add_annotation(meta, key, value);
        }
    })
}
