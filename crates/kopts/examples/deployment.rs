//! Assembles a small web application (storage, configuration, workload, networking and RBAC) and
//! prints every object as a YAML document to stdout.
//!
//! ```shell
//! KOPTS_LOG=debug cargo run --example deployment -- --namespace staging --replicas 2
//! ```
use std::{collections::BTreeMap, time::Duration};

use clap::Parser;
use kopts::{
    Resource,
    builder::{
        configmap::{self, ConfigMap},
        deployment::{self, Deployment},
        ingress::{self, Ingress, Path, PathType, Rule},
        namespace::{self, Namespace},
        persistent_volume::{self, HostPathType, PersistentVolume},
        pod::{
            self, PodTemplate,
            container::{self, Container, PullPolicy},
            probe::HttpProbe,
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
    k8s_openapi::apimachinery::pkg::api::resource::Quantity,
    logging,
    yaml::{self, ToYaml},
};
use snafu::{ResultExt, Snafu};

const APP_NAME: &str = "kopts-example";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitializeLogging { source: logging::Error },

    #[snafu(display("failed to print {kind} {name:?}"))]
    Print {
        source: yaml::Error,
        kind: &'static str,
        name: String,
    },
}

#[derive(Debug, Parser)]
#[command(about = "Print the manifests of an example web application")]
struct Args {
    /// Namespace of all namespaced objects.
    #[arg(long, env = "KOPTS_NAMESPACE", default_value = "testing")]
    namespace: String,

    /// Image of the web container.
    #[arg(long, env = "KOPTS_IMAGE", default_value = "myrepo/myimage:latest")]
    image: String,

    /// Replica count, applied after the deployment has been built.
    #[arg(long, env = "KOPTS_REPLICAS", default_value_t = 1)]
    replicas: i32,

    /// Public host name of the ingress.
    #[arg(long, env = "KOPTS_HOST", default_value = "test.test.com")]
    host: String,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::initialize_logging("KOPTS_LOG", APP_NAME).context(InitializeLoggingSnafu)?;

    let ns = args.namespace.as_str();

    let volume = PersistentVolume::new("myvolume", [
        persistent_volume::capacity(Quantity("1Gi".to_owned())),
        persistent_volume::host_path("/", HostPathType::Directory),
    ]);
    print(&volume)?;

    print(&Namespace::new(ns, [
        namespace::annotation("test", "test2"),
        namespace::annotations(BTreeMap::from([
            ("hey".to_owned(), "there".to_owned()),
            ("yo".to_owned(), "what's up".to_owned()),
        ])),
    ]))?;

    print(&ConfigMap::new("myconfigmap", [
        configmap::namespace(ns),
        configmap::data("multiline", "this is\na multiline\nconfig\n"),
        configmap::data_map(BTreeMap::from([
            ("testing".to_owned(), "123".to_owned()),
            ("hey".to_owned(), "this is a test".to_owned()),
        ])),
        configmap::binary_data("test", "gimme some bytes"),
    ]))?;

    let probe = HttpProbe {
        path: "/healthz".to_owned(),
        port: 8080,
        initial_delay: Duration::from_secs(10),
        period: Duration::from_secs(10),
    };

    let mut web = Container::new("test", [
        container::image(args.image.as_str()),
        container::env_var("hey", "there"),
        container::env_from_secret("test", "thing", "apiKey"),
        container::image_pull_policy(PullPolicy::Always),
        container::args(["server", "start"]),
        container::port("http", 8080),
        container::port("https", 443),
        container::volume_mount_for("/data", &volume),
        container::liveness_probe_http(&probe),
    ]);

    // Options can also be applied later, e.g. conditionally
    if args.replicas > 1 {
        container::env_var("CLUSTERED", "true").apply(&mut web);
    }

    let account = ServiceAccount::new("web", [
        service_account::namespace(ns),
        service_account::automount_token(false),
    ]);

    let template = PodTemplate::new("test", [
        pod::label("testing", "again"),
        pod::container(web),
        pod::service_account(account.name()),
        pod::persistent_volume_claim_volume(volume.name(), "myclaim"),
    ]);

    let mut deployment = Deployment::new("testing", [
        deployment::namespace(ns),
        deployment::selector("app", "testing"),
        deployment::pod_template(template),
        deployment::replicas(3),
    ]);
    deployment::replicas(args.replicas).apply(&mut deployment);
    print(&deployment)?;

    print(&Service::new("test", [
        service::namespace(ns),
        service::port(80, 8080),
        service::selector("app", "testing"),
    ]))?;

    print(&Ingress::new("test", [
        ingress::class("nginx"),
        ingress::namespace(ns),
        ingress::rule(Rule {
            host: args.host.clone(),
            tls: true,
            cert_manager: true,
            paths: vec![Path {
                path: "/test".to_owned(),
                service: "test".to_owned(),
                port: 80,
                path_type: PathType::Prefix,
            }],
        }),
    ]))?;

    print(&Secret::new("test", [
        secret::namespace(ns),
        secret::data("apiKey", "thekey"),
    ]))?;

    let role = Role::new("config-reader", [
        role::namespace(ns),
        role::policy_rule(&PolicyRule::new([
            policy_rule::api_group(""),
            policy_rule::resources(["configmaps", "secrets"]),
            policy_rule::verbs([Verb::Get, Verb::List, Verb::Watch]),
        ])),
    ]);

    print(&account)?;
    print(&RoleBinding::new("web-config-reader", [
        role_binding::namespace(ns),
        role_binding::role(&role),
        role_binding::service_account(account.name(), ns),
    ]))?;
    print(&role)
}

fn print<T: Resource + ToYaml>(resource: &T) -> Result<(), Error> {
    resource.print_yaml().context(PrintSnafu {
        kind: T::kind(),
        name: resource.name(),
    })
}
