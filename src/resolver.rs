//! Transformation of a dashboard's widget list into job descriptors.
//!
//! Resolution walks widgets in order, keeps only those backed by a job that
//! passes the job filter, locates the job among the discovered job files and
//! wires up its registered run and init behaviour. Descriptor order follows
//! widget order, which downstream consumers rely on.

use std::{fmt, path::PathBuf};

use serde::Serialize;
use tracing::{debug, error};

use crate::{
    config::{ConfigKey, ConfigObject, DashboardDefinition, WidgetEntry},
    discover::{self, Discovery, ItemKind},
    error::Error,
    filter::Filters,
    registry::{JobHandler, JobRegistry},
};

/// Resolved, ready-to-run job taken from a dashboard widget.
#[derive(Clone, Serialize,)]
pub struct JobDescriptor
{
    /// Configuration key or keys copied from the widget.
    #[serde(rename = "configKey", skip_serializing_if = "Option::is_none")]
    pub config_key:     Option<ConfigKey,>,
    /// Name of the dashboard the widget belongs to.
    pub dashboard_name: String,
    /// Job reference exactly as written in the widget.
    pub job_name:       String,
    /// Complete widget entry.
    pub widget_item:    WidgetEntry,
    /// Run behaviour of the job.
    #[serde(skip)]
    pub on_run:         JobHandler,
    /// Init behaviour; `None` when the implementation is a bare run handler.
    #[serde(skip)]
    pub on_init:        Option<JobHandler,>,
    /// Configuration resolved for the job.
    pub config:         ConfigObject,
}

impl fmt::Debug for JobDescriptor
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("JobDescriptor",)
            .field("config_key", &self.config_key,)
            .field("dashboard_name", &self.dashboard_name,)
            .field("job_name", &self.job_name,)
            .field("widget_item", &self.widget_item,)
            .field("on_init", &self.on_init.is_some(),)
            .field("config", &self.config,)
            .finish_non_exhaustive()
    }
}

/// Builds the job descriptors of one dashboard.
///
/// `all_jobs` lists every discovered job file. Descriptors are returned with
/// an empty `config`; the pipeline attaches the merged configuration.
///
/// # Errors
///
/// Returns [`Error::DashboardStructure`] when the dashboard has no widget
/// list, [`Error::UnresolvedJob`] when a referenced job has no job file and
/// [`Error::MissingImplementation`] when a job file has nothing registered
/// behind it.
pub fn resolve_jobs<D,>(
    discovery: &D,
    all_jobs: &[PathBuf],
    dashboard: &DashboardDefinition,
    filters: &Filters,
    registry: &JobRegistry,
) -> Result<Vec<JobDescriptor,>, Error,>
where
    D: Discovery + ?Sized,
{
    let dashboard_name = dashboard.name();
    let widgets = dashboard.widgets()?;
    let mut jobs = Vec::with_capacity(widgets.len(),);

    for widget in widgets {
        let Some(job_name,) = widget.job_name() else {
            continue;
        };
        if !filters.accepts_job(job_name,) {
            debug!("Skipping job {} filtered out of dashboard {}", job_name, dashboard_name);
            continue;
        }

        let candidates = discovery.resolve_candidates(all_jobs, job_name, ItemKind::Jobs,);
        if candidates.is_empty() {
            error!(
                "ERROR RESOLVING JOB {}: no job file found. Check dashboard {}",
                job_name, dashboard_name
            );
        }

        let (on_run, on_init,) = load_implementation(&candidates, job_name, &dashboard_name, registry,)?;

        jobs.push(JobDescriptor {
            config_key: widget.config.clone(),
            dashboard_name: dashboard_name.clone(),
            job_name: job_name.to_owned(),
            widget_item: widget.clone(),
            on_run,
            on_init,
            config: ConfigObject::new(),
        },);
    }

    Ok(jobs,)
}

/// Loads the implementation behind the first candidate job file.
///
/// The candidate's package takes part in the lookup, so a plain reference
/// shared by several packages loads the one contributed first.
fn load_implementation(
    candidates: &[PathBuf],
    job_name: &str,
    dashboard_name: &str,
    registry: &JobRegistry,
) -> Result<(JobHandler, Option<JobHandler,>,), Error,>
{
    let candidate = candidates.first().ok_or_else(|| Error::UnresolvedJob {
        job:       job_name.to_owned(),
        dashboard: dashboard_name.to_owned(),
    },)?;

    let name = discover::item_name(candidate,).unwrap_or(job_name,);
    let package = discover::item_package(candidate, ItemKind::Jobs,);
    let implementation = registry.lookup_candidate(job_name, package, name,).ok_or_else(|| {
        Error::MissingImplementation {
            job:  name.to_owned(),
            path: candidate.clone(),
        }
    },)?;

    Ok(implementation.handlers(),)
}
