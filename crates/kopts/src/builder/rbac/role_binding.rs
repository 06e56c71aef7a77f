use std::collections::BTreeMap;

use k8s_openapi::api::rbac::v1::{self, RoleRef, Subject};
use serde::Serialize;

use crate::{
    builder::{
        meta::{self, Resource, impl_resource},
        rbac::{RBAC_API_GROUP, role::Role},
    },
    opt::{self, Opt},
};

/// Binds the permissions of a [`Role`] to a list of subjects within a namespace.
///
/// The role reference starts out empty and is expected to be set with [`role`] or [`role_ref`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoleBinding {
    pub inner: v1::RoleBinding,
}

impl_resource!(RoleBinding => v1::RoleBinding);

impl RoleBinding {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut binding = Self {
            inner: v1::RoleBinding {
                metadata: meta::new_object_meta(name),
                ..v1::RoleBinding::default()
            },
        };

        opt::apply_all(&mut binding, opts);
        binding
    }

    pub fn role_ref(&self) -> &RoleRef {
        &self.inner.role_ref
    }

    pub fn subjects(&self) -> &[Subject] {
        self.inner.subjects.as_deref().unwrap_or_default()
    }
}

/// A [`Subject`] for the service account `name` in `namespace`.
pub fn service_account_subject(name: impl Into<String>, namespace: impl Into<String>) -> Subject {
    Subject {
        kind: "ServiceAccount".to_owned(),
        name: name.into(),
        namespace: Some(namespace.into()),
        ..Subject::default()
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<RoleBinding> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<RoleBinding> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<RoleBinding> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<RoleBinding> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<RoleBinding> {
    meta::annotations(annotations)
}

pub fn subject(subject: Subject) -> Opt<RoleBinding> {
    subjects([subject])
}

pub fn subjects(subjects: impl IntoIterator<Item = Subject>) -> Opt<RoleBinding> {
    let subjects: Vec<Subject> = subjects.into_iter().collect();
    Opt::new(move |b: &mut RoleBinding| {
        b.inner
            .subjects
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&subjects);
    })
}

/// Binds the service account `name` in `namespace`.
pub fn service_account(name: impl Into<String>, namespace: impl Into<String>) -> Opt<RoleBinding> {
    subject(service_account_subject(name, namespace))
}

/// Replaces the role reference.
pub fn role_ref(role_ref: RoleRef) -> Opt<RoleBinding> {
    Opt::new(move |b: &mut RoleBinding| b.inner.role_ref = role_ref.clone())
}

/// References `role` by name.
pub fn role(role: &Role) -> Opt<RoleBinding> {
    role_ref(RoleRef {
        api_group: RBAC_API_GROUP.to_owned(),
        kind: Role::kind().to_owned(),
        name: role.name().to_owned(),
    })
}
