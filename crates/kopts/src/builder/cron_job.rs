use std::{collections::BTreeMap, fmt};

use k8s_openapi::{
    api::batch::v1::{self, CronJobSpec, JobSpec, JobTemplateSpec},
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};
use serde::Serialize;

use crate::{
    builder::{
        meta::{self, impl_resource},
        pod::{PodTemplate, RestartPolicy},
    },
    opt::{self, Opt},
};

/// The schedule of a [`CronJob`], either one of the common presets or any cron expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CronSchedule {
    EveryMinute,
    Every5Minutes,
    Every10Minutes,
    Every15Minutes,
    EveryHalfHour,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom(String),
}

impl CronSchedule {
    pub fn custom(expression: impl Into<String>) -> Self {
        Self::Custom(expression.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::EveryMinute => "* * * * *",
            Self::Every5Minutes => "*/5 * * * *",
            Self::Every10Minutes => "*/10 * * * *",
            Self::Every15Minutes => "*/15 * * * *",
            Self::EveryHalfHour => "*/30 * * * *",
            Self::Hourly => "0 * * * *",
            Self::Daily => "0 0 * * *",
            Self::Weekly => "0 0 * * 0",
            Self::Monthly => "0 0 1 * *",
            Self::Yearly => "0 0 1 1 *",
            Self::Custom(expression) => expression,
        }
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How concurrent executions of a [`CronJob`] are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum ConcurrencyPolicy {
    Allow,
    Forbid,
    Replace,
}

/// A [`CronJob`](v1::CronJob) with a pre-initialized (empty) job template.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CronJob {
    pub inner: v1::CronJob,
}

impl_resource!(CronJob => v1::CronJob);

impl CronJob {
    pub fn new(name: impl Into<String>, opts: impl IntoIterator<Item = Opt<Self>>) -> Self {
        let mut cron_job = Self {
            inner: v1::CronJob {
                metadata: meta::new_object_meta(name),
                spec: Some(CronJobSpec {
                    job_template: JobTemplateSpec {
                        spec: Some(JobSpec::default()),
                        ..JobTemplateSpec::default()
                    },
                    ..CronJobSpec::default()
                }),
                ..v1::CronJob::default()
            },
        };

        opt::apply_all(&mut cron_job, opts);
        cron_job
    }

    pub fn spec(&self) -> Option<&CronJobSpec> {
        self.inner.spec.as_ref()
    }

    pub fn job_spec(&self) -> Option<&JobSpec> {
        self.spec().and_then(|spec| spec.job_template.spec.as_ref())
    }

    fn spec_mut(&mut self) -> &mut CronJobSpec {
        self.inner.spec.get_or_insert_with(CronJobSpec::default)
    }

    fn job_spec_mut(&mut self) -> &mut JobSpec {
        self.spec_mut()
            .job_template
            .spec
            .get_or_insert_with(JobSpec::default)
    }
}

pub fn namespace(namespace: impl Into<String>) -> Opt<CronJob> {
    meta::namespace(namespace)
}

pub fn label(key: impl Into<String>, value: impl Into<String>) -> Opt<CronJob> {
    meta::label(key, value)
}

pub fn labels(labels: BTreeMap<String, String>) -> Opt<CronJob> {
    meta::labels(labels)
}

pub fn annotation(key: impl Into<String>, value: impl Into<String>) -> Opt<CronJob> {
    meta::annotation(key, value)
}

pub fn annotations(annotations: BTreeMap<String, String>) -> Opt<CronJob> {
    meta::annotations(annotations)
}

pub fn schedule(schedule: CronSchedule) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.spec_mut().schedule = schedule.to_string())
}

pub fn concurrency(policy: ConcurrencyPolicy) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.spec_mut().concurrency_policy = Some(policy.to_string()))
}

/// Sets the restart policy of the job pods.
///
/// A [`pod_template`] applied afterwards replaces the whole pod spec, including this value.
pub fn restart_policy(policy: RestartPolicy) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| {
        c.job_spec_mut()
            .template
            .spec
            .get_or_insert_with(Default::default)
            .restart_policy = Some(policy.to_string());
    })
}

pub fn parallelism(parallelism: i32) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.job_spec_mut().parallelism = Some(parallelism))
}

pub fn completions(completions: i32) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.job_spec_mut().completions = Some(completions))
}

pub fn backoff_limit(limit: i32) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.job_spec_mut().backoff_limit = Some(limit))
}

pub fn active_deadline_seconds(seconds: i64) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.job_spec_mut().active_deadline_seconds = Some(seconds))
}

/// Embeds a copy of `template` as the job pod template.
pub fn pod_template(template: PodTemplate) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.job_spec_mut().template = template.inner.clone())
}

/// Adds a key/value pair to the job label selector, creating the selector if necessary.
pub fn selector(key: impl Into<String>, value: impl Into<String>) -> Opt<CronJob> {
    let (key, value) = (key.into(), value.into());
    Opt::new(move |c: &mut CronJob| {
        c.job_spec_mut()
            .selector
            .get_or_insert_with(LabelSelector::default)
            .match_labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.clone(), value.clone());
    })
}

pub fn suspend(suspend: bool) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.spec_mut().suspend = Some(suspend))
}

pub fn successful_jobs_history_limit(limit: i32) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.spec_mut().successful_jobs_history_limit = Some(limit))
}

pub fn failed_jobs_history_limit(limit: i32) -> Opt<CronJob> {
    Opt::new(move |c: &mut CronJob| c.spec_mut().failed_jobs_history_limit = Some(limit))
}
