use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{self, LocalObjectReference};
use serde::Serialize;

use crate::{
    builder::meta::{self, impl_resource},
    opt::{self, Opt},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServiceAccount {
    pub inner: v1::ServiceAccount,
}

impl_resource!(ServiceAccount => v1::ServiceAccount);

impl ServiceAccount {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut account = Self {
            inner: v1::ServiceAccount {
                metadata: meta::new_object_meta(name),
                ..v1::ServiceAccount::default()
            },
        };

        opt::apply_all(&mut account, opts);
        account
    }

    /// Names of the referenced image pull secrets, in order.
    pub fn image_pull_secrets(&self) -> impl Iterator<Item = &str> {
        self.inner
            .image_pull_secrets
            .iter()
            .flatten()
            .map(|secret| secret.name.as_str())
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<ServiceAccount> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<ServiceAccount> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<ServiceAccount> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<ServiceAccount> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<ServiceAccount> {
    meta::annotations(annotations)
}

/// References a secret holding registry credentials.
pub fn image_pull_secret(name: impl Into<String>) -> Opt<ServiceAccount> {
    image_pull_secrets([name])
}

pub fn image_pull_secrets(
    names: impl IntoIterator<Item = impl Into<String>>,
) -> Opt<ServiceAccount> {
    let secrets: Vec<LocalObjectReference> = names
        .into_iter()
        .map(|name| LocalObjectReference { name: name.into() })
        .collect();
    Opt::new(move |sa: &mut ServiceAccount| {
        sa.inner
            .image_pull_secrets
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&secrets);
    })
}

/// Whether pods running as this account get an API token mounted.
pub fn automount_token(automount: bool) -> Opt<ServiceAccount> {
    Opt::new(move |sa: &mut ServiceAccount| {
        sa.inner.automount_service_account_token = Some(automount);
    })
}
