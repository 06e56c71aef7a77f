use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{self, HostPathVolumeSource, LocalVolumeSource, PersistentVolumeSpec},
    apimachinery::pkg::api::resource::Quantity,
};
use serde::Serialize;
use tracing::debug;

use crate::{
    builder::meta::{self, Resource, impl_resource},
    opt::{self, Opt},
};

/// The resource name under which the capacity is stored.
pub const CAPACITY_RESOURCE: &str = "storage";

/// Type check performed on a host path before it is mounted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum HostPathType {
    /// No checks are performed
    #[default]
    #[strum(serialize = "")]
    Unset,
    DirectoryOrCreate,
    Directory,
    FileOrCreate,
    File,
    Socket,
    CharDevice,
    BlockDevice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum AccessMode {
    ReadWriteOnce,
    ReadOnlyMany,
    ReadWriteMany,
    ReadWriteOncePod,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum ReclaimPolicy {
    Retain,
    Delete,
    Recycle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PersistentVolume {
    pub inner: v1::PersistentVolume,
}

impl_resource!(PersistentVolume => v1::PersistentVolume);

impl PersistentVolume {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut volume = Self {
            inner: v1::PersistentVolume {
                metadata: meta::new_object_meta(name),
                spec: Some(PersistentVolumeSpec::default()),
                ..v1::PersistentVolume::default()
            },
        };

        opt::apply_all(&mut volume, opts);
        volume
    }

    pub fn spec(&self) -> Option<&PersistentVolumeSpec> {
        self.inner.spec.as_ref()
    }

    /// The capacity set by [`capacity`], if any.
    pub fn capacity(&self) -> Option<&Quantity> {
        self.spec()
            .and_then(|spec| spec.capacity.as_ref())
            .and_then(|capacity| capacity.get(CAPACITY_RESOURCE))
    }

    fn spec_mut(&mut self) -> &mut PersistentVolumeSpec {
        self.inner
            .spec
            .get_or_insert_with(PersistentVolumeSpec::default)
    }
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<PersistentVolume> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<PersistentVolume> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<PersistentVolume> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<PersistentVolume> {
    meta::annotations(annotations)
}

/// Sets the capacity of the volume.
///
/// Only the first capacity sticks, later calls are ignored.
pub fn capacity(capacity: Quantity) -> Opt<PersistentVolume> {
    Opt::new(move |pv: &mut PersistentVolume| {
        if let Some(existing) = pv.capacity() {
            debug!(
                volume = pv.name(),
                existing = %existing.0,
                ignored = %capacity.0,
                "persistent volume capacity already set, ignoring"
            );
            return;
        }

        pv.spec_mut().capacity = Some(BTreeMap::from([(
            CAPACITY_RESOURCE.to_owned(),
            capacity.clone(),
        )]));
    })
}

/// Backs the volume by a directory on the host. Replaces a local path set earlier.
///
/// [`HostPathType::Unset`] leaves the type out, so no checks are performed.
pub fn host_path(path: impl Into<String>, path_type: HostPathType) -> Opt<PersistentVolume> {
    let source = HostPathVolumeSource {
        path: path.into(),
        type_: match path_type {
            HostPathType::Unset => None,
            path_type => Some(path_type.to_string()),
        },
    };
    Opt::new(move |pv: &mut PersistentVolume| {
        let spec = pv.spec_mut();
        spec.local = None;
        spec.host_path = Some(source.clone());
    })
}

/// Backs the volume by a local disk or directory. Replaces a host path set earlier.
pub fn local(path: impl Into<String>, fs_type: impl Into<String>) -> Opt<PersistentVolume> {
    let source = LocalVolumeSource {
        path: path.into(),
        fs_type: Some(fs_type.into()),
    };
    Opt::new(move |pv: &mut PersistentVolume| {
        let spec = pv.spec_mut();
        spec.host_path = None;
        spec.local = Some(source.clone());
    })
}

pub fn access_mode(mode: AccessMode) -> Opt<PersistentVolume> {
    Opt::new(move |pv: &mut PersistentVolume| {
        pv.spec_mut()
            .access_modes
            .get_or_insert_with(Vec::new)
            .push(mode.to_string());
    })
}

pub fn storage_class(class: impl Into<String>) -> Opt<PersistentVolume> {
    let class = class.into();
    Opt::new(move |pv: &mut PersistentVolume| {
        pv.spec_mut().storage_class_name = Some(class.clone());
    })
}

pub fn reclaim_policy(policy: ReclaimPolicy) -> Opt<PersistentVolume> {
    Opt::new(move |pv: &mut PersistentVolume| {
        pv.spec_mut().persistent_volume_reclaim_policy = Some(policy.to_string());
    })
}
