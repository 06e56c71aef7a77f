use k8s_openapi::api::rbac::v1;
use serde::Serialize;

use crate::opt::{self, Opt};

/// An action on a resource which a [`PolicyRule`] can allow.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    Create,
    Delete,
    Deletecollection,
    Get,
    List,
    Patch,
    Update,
    Watch,
}

/// A [`PolicyRule`](v1::PolicyRule) for a [`Role`](super::role::Role).
///
/// Policy rules have no name of their own. All options append to the respective list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PolicyRule {
    pub inner: v1::PolicyRule,
}

impl PolicyRule {
    pub fn new(opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut rule = Self::default();
        opt::apply_all(&mut rule, opts);
        rule
    }
}

impl From<PolicyRule> for v1::PolicyRule {
    fn from(rule: PolicyRule) -> Self {
        rule.inner
    }
}

fn extend(list: &mut Option<Vec<String>>, items: &[String]) {
    list.get_or_insert_with(Vec::new).extend_from_slice(items);
}

fn collect(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

pub fn verb(verb: Verb) -> Opt<PolicyRule> {
    verbs([verb])
}

pub fn verbs(verbs: impl IntoIterator<Item = Verb>) -> Opt<PolicyRule> {
    let verbs: Vec<String> = verbs.into_iter().map(|v| v.to_string()).collect();
    Opt::new(move |r: &mut PolicyRule| r.inner.verbs.extend_from_slice(&verbs))
}

pub fn api_group(group: impl Into<String>) -> Opt<PolicyRule> {
    api_groups([group])
}

/// Adds API groups. The core API group is the empty string.
pub fn api_groups(groups: impl IntoIterator<Item = impl Into<String>>) -> Opt<PolicyRule> {
    let groups = collect(groups);
    Opt::new(move |r: &mut PolicyRule| extend(&mut r.inner.api_groups, &groups))
}

pub fn resource(resource: impl Into<String>) -> Opt<PolicyRule> {
    resources([resource])
}

pub fn resources(resources: impl IntoIterator<Item = impl Into<String>>) -> Opt<PolicyRule> {
    let resources = collect(resources);
    Opt::new(move |r: &mut PolicyRule| extend(&mut r.inner.resources, &resources))
}

pub fn resource_name(name: impl Into<String>) -> Opt<PolicyRule> {
    resource_names([name])
}

pub fn resource_names(names: impl IntoIterator<Item = impl Into<String>>) -> Opt<PolicyRule> {
    let names = collect(names);
    Opt::new(move |r: &mut PolicyRule| extend(&mut r.inner.resource_names, &names))
}

pub fn non_resource_url(url: impl Into<String>) -> Opt<PolicyRule> {
    non_resource_urls([url])
}

pub fn non_resource_urls(urls: impl IntoIterator<Item = impl Into<String>>) -> Opt<PolicyRule> {
    let urls = collect(urls);
    Opt::new(move |r: &mut PolicyRule| extend(&mut r.inner.non_resource_urls, &urls))
}
