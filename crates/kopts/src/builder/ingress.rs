use std::collections::BTreeMap;

use k8s_openapi::api::networking::v1::{
    self, HTTPIngressPath, HTTPIngressRuleValue, IngressBackend, IngressRule, IngressServiceBackend,
    IngressSpec, IngressTLS, ServiceBackendPort,
};
use serde::Serialize;

use crate::{
    builder::meta::{self, Resource, impl_resource},
    opt::{self, Opt},
};

/// Annotation asking cert-manager to issue the TLS certificates of an ingress.
pub const CLUSTER_ISSUER_ANNOTATION: &str = "cert-manager.io/cluster-issuer";

/// Cluster issuer used for TLS rules unless [`cluster_issuer`] says otherwise.
pub const DEFAULT_CLUSTER_ISSUER: &str = "letsencrypt-prod";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum PathType {
    Exact,
    #[default]
    Prefix,
    ImplementationSpecific,
}

/// A routing rule for a single host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rule {
    pub host: String,
    pub paths: Vec<Path>,

    /// Terminates TLS for `host` with the secret `<ingress name>-tls`.
    pub tls: bool,

    /// Has cert-manager issue the TLS secret through the cluster issuer of the ingress. Implies
    /// [`tls`](Self::tls).
    pub cert_manager: bool,
}

/// A path of a [`Rule`], routed to port `port` of the service `service`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub path: String,
    pub service: String,
    pub port: i32,
    pub path_type: PathType,
}

impl Path {
    fn build(&self) -> HTTPIngressPath {
        HTTPIngressPath {
            path: Some(self.path.clone()),
            path_type: self.path_type.to_string(),
            backend: IngressBackend {
                service: Some(IngressServiceBackend {
                    name: self.service.clone(),
                    port: Some(ServiceBackendPort {
                        number: Some(self.port),
                        ..ServiceBackendPort::default()
                    }),
                }),
                ..IngressBackend::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ingress {
    pub inner: v1::Ingress,
}

impl_resource!(Ingress => v1::Ingress);

impl Ingress {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut ingress = Self {
            inner: v1::Ingress {
                metadata: meta::new_object_meta(name),
                spec: Some(IngressSpec::default()),
                ..v1::Ingress::default()
            },
        };

        opt::apply_all(&mut ingress, opts);
        ingress
    }

    pub fn spec(&self) -> Option<&IngressSpec> {
        self.inner.spec.as_ref()
    }

    fn spec_mut(&mut self) -> &mut IngressSpec {
        self.inner.spec.get_or_insert_with(IngressSpec::default)
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<Ingress> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<Ingress> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<Ingress> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<Ingress> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<Ingress> {
    meta::annotations(annotations)
}

pub fn class(class: impl Into<String>) -> Opt<Ingress> {
    let class = class.into();
    Opt::new(move |i: &mut Ingress| i.spec_mut().ingress_class_name = Some(class.clone()))
}

/// Sets the cluster issuer for the TLS certificates, overriding [`DEFAULT_CLUSTER_ISSUER`].
pub fn cluster_issuer(issuer: impl Into<String>) -> Opt<Ingress> {
    meta::annotation(CLUSTER_ISSUER_ANNOTATION, issuer)
}

/// Appends a routing rule.
///
/// A TLS rule also adds a TLS entry for its host. The secret is named after the ingress, so the
/// name in effect when the option is applied is used. A cert-manager rule additionally sets the
/// cluster issuer annotation, unless an issuer is already set.
pub fn rule(rule: Rule) -> Opt<Ingress> {
    let ingress_rule = IngressRule {
        host: Some(rule.host.clone()),
        http: Some(HTTPIngressRuleValue {
            paths: rule.paths.iter().map(Path::build).collect(),
        }),
    };

    Opt::new(move |i: &mut Ingress| {
        if rule.cert_manager {
            i.metadata_mut()
                .annotations
                .get_or_insert_with(Default::default)
                .entry(CLUSTER_ISSUER_ANNOTATION.to_owned())
                .or_insert_with(|| DEFAULT_CLUSTER_ISSUER.to_owned());
        }

        if rule.tls || rule.cert_manager {
            let secret_name = format!("{name}-tls", name = i.name());
            i.spec_mut()
                .tls
                .get_or_insert_with(Vec::new)
                .push(IngressTLS {
                    hosts: Some(vec![rule.host.clone()]),
                    secret_name: Some(secret_name),
                });
        }

        i.spec_mut()
            .rules
            .get_or_insert_with(Vec::new)
            .push(ingress_rule.clone());
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn tls_rule() -> Rule {
        Rule {
            host: "test.test.com".to_owned(),
            tls: true,
            cert_manager: true,
            paths: vec![Path {
                path: "/test".to_owned(),
                service: "test".to_owned(),
                port: 8080,
                path_type: PathType::Prefix,
            }],
        }
    }

    #[rstest]
    fn empty_ingress() {
        let ingress = Ingress::new("test", []);

        assert_eq!(ingress.name(), "test");
        assert_eq!(Ingress::kind(), "Ingress");
        assert_eq!(Ingress::api_version(), "networking.k8s.io/v1");
        assert_eq!(ingress.metadata().annotations, Some(Default::default()));
    }

    #[rstest]
    fn cert_manager_rule_adds_issuer_and_secret(tls_rule: Rule) {
        let ingress = Ingress::new("r", [
            class("nginx"),
            namespace("testing"),
            rule(tls_rule),
        ]);

        assert_eq!(
            ingress
                .metadata()
                .annotations
                .as_ref()
                .and_then(|a| a.get(CLUSTER_ISSUER_ANNOTATION))
                .map(String::as_str),
            Some(DEFAULT_CLUSTER_ISSUER)
        );

        let spec = ingress.spec().cloned().unwrap_or_default();
        assert_eq!(spec.ingress_class_name.as_deref(), Some("nginx"));
        assert_eq!(
            spec.tls,
            Some(vec![IngressTLS {
                hosts: Some(vec!["test.test.com".to_owned()]),
                secret_name: Some("r-tls".to_owned()),
            }])
        );

        let rules = spec.rules.unwrap_or_default();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].host.as_deref(), Some("test.test.com"));
        let paths = rules[0].http.clone().unwrap_or_default().paths;
        assert_eq!(paths, vec![HTTPIngressPath {
            path: Some("/test".to_owned()),
            path_type: "Prefix".to_owned(),
            backend: IngressBackend {
                service: Some(IngressServiceBackend {
                    name: "test".to_owned(),
                    port: Some(ServiceBackendPort {
                        number: Some(8080),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
        }]);
    }

    #[rstest]
    #[case::before_rule(true)]
    #[case::after_rule(false)]
    fn custom_cluster_issuer(tls_rule: Rule, #[case] issuer_first: bool) {
        let opts = if issuer_first {
            vec![cluster_issuer("internal-ca"), rule(tls_rule)]
        } else {
            vec![rule(tls_rule), cluster_issuer("internal-ca")]
        };
        let ingress = Ingress::new("r", opts);

        assert_eq!(
            ingress
                .metadata()
                .annotations
                .as_ref()
                .and_then(|a| a.get(CLUSTER_ISSUER_ANNOTATION))
                .map(String::as_str),
            Some("internal-ca")
        );
    }

    #[rstest]
    fn tls_without_cert_manager_has_no_issuer(mut tls_rule: Rule) {
        tls_rule.cert_manager = false;
        let ingress = Ingress::new("r", [rule(tls_rule)]);

        assert_eq!(ingress.metadata().annotations, Some(Default::default()));
        assert_eq!(
            ingress
                .spec()
                .and_then(|s| s.tls.as_ref())
                .map(|tls| tls.iter().map(|t| t.secret_name.clone()).collect::<Vec<_>>()),
            Some(vec![Some("r-tls".to_owned())])
        );
    }

    #[rstest]
    fn cert_manager_implies_tls(mut tls_rule: Rule) {
        tls_rule.tls = false;
        let ingress = Ingress::new("r", [rule(tls_rule)]);

        assert_eq!(ingress.spec().and_then(|s| s.tls.as_ref()).map(Vec::len), Some(1));
        assert!(
            ingress
                .metadata()
                .annotations
                .as_ref()
                .is_some_and(|a| a.contains_key(CLUSTER_ISSUER_ANNOTATION))
        );
    }

    #[rstest]
    fn plain_rule_has_no_tls(mut tls_rule: Rule) {
        tls_rule.tls = false;
        tls_rule.cert_manager = false;
        let ingress = Ingress::new("r", [rule(tls_rule)]);

        assert_eq!(ingress.spec().and_then(|s| s.tls.as_ref()), None);
        assert_eq!(ingress.metadata().annotations, Some(Default::default()));
    }
}
