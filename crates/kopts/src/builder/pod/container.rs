use k8s_openapi::api::core::v1::{
    self, ConfigMapKeySelector, ContainerPort, EnvVar, EnvVarSource, SecretKeySelector,
    VolumeMount,
};
use serde::Serialize;

use crate::{
    Resource,
    builder::{persistent_volume::PersistentVolume, pod::probe::HttpProbe},
    opt::{self, Opt},
};

/// Image pull policy of a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum PullPolicy {
    Always,
    IfNotPresent,
    Never,
}

/// A [`Container`](v1::Container) to be embedded into a [`PodTemplate`](super::PodTemplate).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Container {
    pub inner: v1::Container,
}

impl Container {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut container = Self {
            inner: v1::Container {
                name: name.into(),
                ..v1::Container::default()
            },
        };

        opt::apply_all(&mut container, opts);
        container
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    fn push_env(&mut self, env_var: EnvVar) {
        self.inner.env.get_or_insert_with(Vec::new).push(env_var);
    }
}

impl From<Container> for v1::Container {
    fn from(container: Container) -> Self {
        container.inner
    }
}

pub fn image(image: impl Into<String>) -> Opt<Container> {
    let image = image.into();
    Opt::new(move |c: &mut Container| c.inner.image = Some(image.clone()))
}

pub fn image_pull_policy(policy: PullPolicy) -> Opt<Container> {
    Opt::new(move |c: &mut Container| c.inner.image_pull_policy = Some(policy.to_string()))
}

/// Adds an environment variable with a literal value.
pub fn env_var(name: impl Into<String>, value: impl Into<String>) -> Opt<Container> {
    let env_var = EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..EnvVar::default()
    };
    Opt::new(move |c: &mut Container| c.push_env(env_var.clone()))
}

/// Adds an environment variable `name` read from `key` of the Secret `secret`.
pub fn env_from_secret(
    secret: impl Into<String>,
    name: impl Into<String>,
    key: impl Into<String>,
) -> Opt<Container> {
    let env_var = EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret.into(),
                key: key.into(),
                ..SecretKeySelector::default()
            }),
            ..EnvVarSource::default()
        }),
        ..EnvVar::default()
    };
    Opt::new(move |c: &mut Container| c.push_env(env_var.clone()))
}

/// Adds an environment variable `name` read from `key` of the ConfigMap `config_map`.
pub fn env_from_config_map(
    config_map: impl Into<String>,
    name: impl Into<String>,
    key: impl Into<String>,
) -> Opt<Container> {
    let env_var = EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            config_map_key_ref: Some(ConfigMapKeySelector {
                name: config_map.into(),
                key: key.into(),
                ..ConfigMapKeySelector::default()
            }),
            ..EnvVarSource::default()
        }),
        ..EnvVar::default()
    };
    Opt::new(move |c: &mut Container| c.push_env(env_var.clone()))
}

/// Replaces the container command.
pub fn command(command: impl IntoIterator<Item = impl Into<String>>) -> Opt<Container> {
    let command: Vec<String> = command.into_iter().map(Into::into).collect();
    Opt::new(move |c: &mut Container| c.inner.command = Some(command.clone()))
}

/// Replaces the container arguments.
pub fn args(args: impl IntoIterator<Item = impl Into<String>>) -> Opt<Container> {
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    Opt::new(move |c: &mut Container| c.inner.args = Some(args.clone()))
}

/// Adds a named container port.
pub fn port(name: impl Into<String>, port: i32) -> Opt<Container> {
    let port = ContainerPort {
        name: Some(name.into()),
        container_port: port,
        ..ContainerPort::default()
    };
    Opt::new(move |c: &mut Container| {
        c.inner.ports.get_or_insert_with(Vec::new).push(port.clone());
    })
}

/// Mounts the volume `volume` at `path`.
pub fn volume_mount(path: impl Into<String>, volume: impl Into<String>) -> Opt<Container> {
    let mount = VolumeMount {
        mount_path: path.into(),
        name: volume.into(),
        ..VolumeMount::default()
    };
    Opt::new(move |c: &mut Container| {
        c.inner
            .volume_mounts
            .get_or_insert_with(Vec::new)
            .push(mount.clone());
    })
}

/// Mounts a volume named after the given [`PersistentVolume`] at `path`.
pub fn volume_mount_for(path: impl Into<String>, volume: &PersistentVolume) -> Opt<Container> {
    volume_mount(path, volume.name())
}

pub fn liveness_probe_http(probe: &HttpProbe) -> Opt<Container> {
    let probe = probe.build();
    Opt::new(move |c: &mut Container| c.inner.liveness_probe = Some(probe.clone()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn probe() -> HttpProbe {
        HttpProbe {
            path: "/healthz".to_owned(),
            port: 8080,
            initial_delay: Duration::from_secs(10),
            period: Duration::from_secs(10),
        }
    }

    #[rstest]
    fn test_container_builder(probe: HttpProbe) {
        let container = Container::new("test", [
            image("myrepo/myimage:latest"),
            env_var("hey", "there"),
            env_from_secret("testsecret", "thing", "apiKey"),
            env_from_config_map("testconfig", "other", "setting"),
            image_pull_policy(PullPolicy::Always),
            args(["server", "start"]),
            command(["/bin/app"]),
            port("http", 8080),
            port("https", 443),
            volume_mount("/data", "data"),
            liveness_probe_http(&probe),
        ]);

        let inner = &container.inner;
        assert_eq!(container.name(), "test");
        assert_eq!(inner.image.as_deref(), Some("myrepo/myimage:latest"));
        assert_eq!(inner.image_pull_policy.as_deref(), Some("Always"));
        assert_eq!(
            inner.args,
            Some(vec!["server".to_owned(), "start".to_owned()])
        );
        assert_eq!(inner.command, Some(vec!["/bin/app".to_owned()]));

        let env = inner.env.as_deref().unwrap_or_default();
        assert_eq!(env.len(), 3);
        assert_eq!(env[0].value.as_deref(), Some("there"));
        assert!(matches!(
            env[1].value_from.as_ref().and_then(|v| v.secret_key_ref.as_ref()),
            Some(SecretKeySelector { name, key, .. }) if name == "testsecret" && key == "apiKey"
        ));
        assert!(matches!(
            env[2].value_from.as_ref().and_then(|v| v.config_map_key_ref.as_ref()),
            Some(ConfigMapKeySelector { name, key, .. }) if name == "testconfig" && key == "setting"
        ));

        let ports = inner.ports.as_deref().unwrap_or_default();
        assert_eq!(
            ports
                .iter()
                .map(|p| (p.name.as_deref(), p.container_port))
                .collect::<Vec<_>>(),
            vec![(Some("http"), 8080), (Some("https"), 443)]
        );
        assert_eq!(inner.volume_mounts.as_ref().map(Vec::len), Some(1));
        assert_eq!(inner.liveness_probe, Some(probe.build()));
    }

    #[rstest]
    fn options_can_be_applied_later() {
        let mut container = Container::new("test", [env_var("hey", "there")]);
        env_var("added", "later").apply(&mut container);

        let names: Vec<_> = container
            .inner
            .env
            .iter()
            .flatten()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["hey", "added"]);
    }

    #[rstest]
    fn mount_persistent_volume() {
        let pv = PersistentVolume::new("myvolume", []);
        let container = Container::new("test", [volume_mount_for("/mnt", &pv)]);

        assert_eq!(
            container.inner.volume_mounts,
            Some(vec![VolumeMount {
                mount_path: "/mnt".to_owned(),
                name: "myvolume".to_owned(),
                ..Default::default()
            }])
        );
    }

    #[rstest]
    #[case("Always", PullPolicy::Always)]
    #[case("IfNotPresent", PullPolicy::IfNotPresent)]
    #[case("Never", PullPolicy::Never)]
    fn pull_policy_names(#[case] input: &str, #[case] expected: PullPolicy) {
        assert_eq!(input.parse::<PullPolicy>(), Ok(expected));
        assert_eq!(expected.as_ref(), input);
    }
}
