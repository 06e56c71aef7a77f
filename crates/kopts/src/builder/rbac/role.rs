use std::collections::BTreeMap;

use k8s_openapi::api::rbac::v1;
use serde::Serialize;

use crate::{
    builder::{
        meta::{self, impl_resource},
        rbac::policy_rule::PolicyRule,
    },
    opt::{self, Opt},
};

/// A namespaced [`Role`](v1::Role) granting the permissions of its [`PolicyRule`]s.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Role {
    pub inner: v1::Role,
}

impl_resource!(Role => v1::Role);

impl Role {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut role = Self {
            inner: v1::Role {
                metadata: meta::new_object_meta(name),
                ..v1::Role::default()
            },
        };

        opt::apply_all(&mut role, opts);
        role
    }

    pub fn rules(&self) -> &[v1::PolicyRule] {
        self.inner.rules.as_deref().unwrap_or_default()
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<Role> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Role> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Role> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Role> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Role> {
    meta::annotations(annotations)
}

/// Appends a rule. The rule is copied, so it can be reused for other roles.
pub fn policy_rule(rule: &PolicyRule) -> Opt<Role> {
    policy_rules([rule])
}

pub fn policy_rules<'a>(rules: impl IntoIterator<Item = &'a PolicyRule>) -> Opt<Role> {
    let rules: Vec<v1::PolicyRule> = rules.into_iter().map(|r| r.inner.clone()).collect();
    Opt::new(move |r: &mut Role| {
        r.inner
            .rules
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&rules);
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::builder::{
        meta::Resource,
        rbac::policy_rule::{self, Verb},
    };

    #[fixture]
    fn read_pods() -> PolicyRule {
        PolicyRule::new([
            policy_rule::api_group(""),
            policy_rule::resource("pods"),
            policy_rule::verbs([Verb::Get, Verb::List]),
        ])
    }

    #[rstest]
    fn empty_role() {
        let role = Role::new("reader", []);

        assert_eq!(role.name(), "reader");
        assert_eq!(Role::kind(), "Role");
        assert_eq!(Role::api_version(), "rbac.authorization.k8s.io/v1");
        assert!(role.rules().is_empty());
    }

    #[rstest]
    fn test_role_builder(read_pods: PolicyRule) {
        let write_pods = PolicyRule::new([
            policy_rule::resource("pods"),
            policy_rule::verb(Verb::Update),
        ]);
        let role = Role::new("reader", [
            namespace("testing"),
            label("app", "web"),
            policy_rule(&read_pods),
            policy_rules([&write_pods, &read_pods]),
        ]);

        assert_eq!(role.metadata().namespace.as_deref(), Some("testing"));
        assert_eq!(role.rules().to_vec(), vec![
            read_pods.inner.clone(),
            write_pods.inner,
            read_pods.inner
        ]);
    }

    #[rstest]
    fn rule_is_shared_between_roles(read_pods: PolicyRule) {
        let opt = policy_rule(&read_pods);
        let mut a = Role::new("a", [namespace("one")]);
        let mut b = Role::new("b", [namespace("two")]);
        opt.apply(&mut a);
        opt.apply(&mut b);

        assert_eq!(a.rules(), b.rules());
        assert_eq!(a.rules().len(), 1);
    }
}
