use std::time::Duration;

use k8s_openapi::{
    api::core::v1::{HTTPGetAction, Probe},
    apimachinery::pkg::util::intstr::IntOrString,
};

/// An HTTP GET probe, used as a liveness probe on a [`Container`](super::container::Container).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpProbe {
    pub path: String,
    pub port: i32,
    pub initial_delay: Duration,
    pub period: Duration,
}

impl HttpProbe {
    pub fn build(&self) -> Probe {
        Probe {
            http_get: Some(HTTPGetAction {
                path: Some(self.path.clone()),
                port: IntOrString::Int(self.port),
                ..HTTPGetAction::default()
            }),
            initial_delay_seconds: Some(saturating_secs(self.initial_delay)),
            period_seconds: Some(saturating_secs(self.period)),
            ..Probe::default()
        }
    }
}

// Kubernetes wants whole seconds as i32
fn saturating_secs(duration: Duration) -> i32 {
    i32::try_from(duration.as_secs()).unwrap_or(i32::MAX)
}
