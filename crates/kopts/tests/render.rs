use k8s_openapi::{api::apps::v1 as apps, apimachinery::pkg::api::resource::Quantity};
use kopts::{
    Resource,
    builder::{
        configmap::{self, ConfigMap},
        cron_job::{self, CronJob, CronSchedule},
        deployment::{self, Deployment},
        ingress::{self, Ingress, Path, PathType, Rule},
        namespace::Namespace,
        persistent_volume::{self, HostPathType, PersistentVolume},
        pod::{
            self, PodTemplate,
            container::{self, Container},
        },
        rbac::{
            policy_rule::{self, PolicyRule, Verb},
            role::{self, Role},
            role_binding::{self, RoleBinding},
            service_account::{self, ServiceAccount},
        },
        secret::{self, Secret},
        service::{self, Service},
    },
    yaml::ToYaml,
};
use rstest::{fixture, rstest};

#[fixture]
fn template() -> PodTemplate {
    PodTemplate::new("web", [pod::container(Container::new("web", [
        container::image("repo/img:tag"),
        container::env_var("HTTP_PORT", "8080"),
        container::port("http", 8080),
    ]))])
}

#[rstest]
fn replicas_overridden_after_construction(template: PodTemplate) {
    let mut dep = Deployment::new("web", [
        deployment::namespace("testing"),
        deployment::selector("app", "web"),
        deployment::pod_template(template),
        deployment::replicas(3),
    ]);

    let override_replicas = deployment::replicas(1);
    override_replicas.apply(&mut dep);

    let rendered = dep.to_yaml().unwrap();
    let parsed: apps::Deployment = serde_yaml::from_str(&rendered).unwrap();
    let spec = parsed.spec.unwrap();
    let containers = spec.template.spec.unwrap().containers;

    assert_eq!(parsed.metadata.namespace.as_deref(), Some("testing"));
    assert_eq!(spec.replicas, Some(1));
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].image.as_deref(), Some("repo/img:tag"));
    assert_eq!(containers[0].ports.as_ref().map(Vec::len), Some(1));
}

#[rstest]
fn tls_ingress_renders_issuer_and_secret() {
    let ingress = Ingress::new("shop", [
        ingress::namespace("testing"),
        ingress::rule(Rule {
            host: "shop.example.com".to_owned(),
            tls: true,
            cert_manager: true,
            paths: vec![Path {
                path: "/".to_owned(),
                service: "shop".to_owned(),
                port: 80,
                path_type: PathType::Prefix,
            }],
        }),
    ]);

    let rendered = ingress.to_yaml().unwrap();

    assert!(rendered.contains("cert-manager.io/cluster-issuer: letsencrypt-prod"));
    assert!(rendered.contains("secretName: shop-tls"));
    assert!(rendered.contains("pathType: Prefix"));
}

fn render<T: Resource + ToYaml>(resource: &T) -> (String, &'static str, String) {
    (
        resource.to_yaml().unwrap(),
        T::kind(),
        resource.name().to_owned(),
    )
}

#[rstest]
fn every_kind_renders_as_document(template: PodTemplate) {
    let role = Role::new("reader", [
        role::namespace("testing"),
        role::policy_rule(&PolicyRule::new([
            policy_rule::resource("pods"),
            policy_rule::verb(Verb::Get),
        ])),
    ]);

    let documents = [
        render(&ConfigMap::new("config", [configmap::data("a", "b")])),
        render(&CronJob::new("nightly", [
            cron_job::schedule(CronSchedule::Daily),
            cron_job::pod_template(template.clone()),
        ])),
        render(&Deployment::new("web", [deployment::pod_template(template)])),
        render(&Ingress::new("web", [ingress::class("nginx")])),
        render(&Namespace::new("testing", [])),
        render(&PersistentVolume::new("data", [
            persistent_volume::capacity(Quantity("1Gi".to_owned())),
            persistent_volume::host_path("/data", HostPathType::Directory),
        ])),
        render(&RoleBinding::new("reader", [
            role_binding::role(&role),
            role_binding::service_account("web", "testing"),
        ])),
        render(&role),
        render(&Secret::new("creds", [secret::data("key", "value")])),
        render(&Service::new("web", [service::port(80, 8080)])),
        render(&ServiceAccount::new("web", [service_account::image_pull_secret("registry")])),
    ];

    for (rendered, kind, name) in documents {
        assert!(rendered.starts_with("---\n"), "{kind} is no explicit document");
        assert!(rendered.ends_with("\n\n"), "{kind} has no trailing blank line");
        assert!(rendered.contains(&format!("kind: {kind}\n")), "{kind} misses its kind");
        assert!(rendered.contains(&format!("name: {name}\n")), "{kind} misses its name");
    }
}
