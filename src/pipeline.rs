// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Aggregation of every dashboard's jobs into one manifest.
///
/// The pipeline reads the shared configuration, discovers dashboards and job
/// files, resolves each dashboard's jobs and attaches merged configuration.
/// The first failure aborts the whole run; no partial manifest is produced.
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, error, info};

use crate::{
    config::{ConfigMap, GlobalConfigDocument},
    dashboard,
    discover::{Discovery, ItemKind},
    error::Error,
    filter::Filters,
    merge,
    registry::JobRegistry,
    resolver::{self, JobDescriptor},
};

/// File name of the configuration shared by all dashboards.
pub const GLOBAL_CONFIG_FILE: &str = "dashboard_common.json";

/// Inputs of a single aggregation run.
#[derive(Debug, Clone, Default,)]
pub struct GetJobsOptions
{
    /// Package roots scanned for dashboards and jobs, in priority order.
    pub packages_paths: Vec<PathBuf,>,
    /// Directory holding [`GLOBAL_CONFIG_FILE`].
    pub config_path:    PathBuf,
    /// Dashboard and job filters.
    pub filters:        Filters,
}

/// Serializable job manifest.
#[derive(Debug, Serialize,)]
pub struct JobsDocument
{
    /// Resolved jobs in dashboard then widget order.
    pub jobs: Vec<JobDescriptor,>,
}

/// Aggregates the jobs of every discovered dashboard.
///
/// Dashboards are processed one after the other in discovery order and
/// their descriptors are concatenated, so the result follows dashboard order
/// first and widget order second.
///
/// # Errors
///
/// Returns [`Error::Validation`] when no packages path is given. Otherwise
/// fails with the first error met: an unreadable or invalid shared
/// configuration, a discovery failure, or any error reading a dashboard or
/// resolving its jobs.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
///
/// use dashboard_jobs::{
///     GetJobsOptions, JobImplementation, JobRegistry, PackageScanner, get_jobs,
/// };
///
/// # async fn example() -> Result<(), dashboard_jobs::Error> {
/// let options = GetJobsOptions {
///     packages_paths: vec![PathBuf::from("packages",)],
///     config_path: PathBuf::from("config",),
///     ..GetJobsOptions::default()
/// };
/// let registry = JobRegistry::new().with_fallback(JobImplementation::Inert,);
/// let jobs = get_jobs(&options, &PackageScanner, &registry,).await?;
/// for job in jobs {
///     println!("{}: {}", job.dashboard_name, job.job_name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_jobs<D,>(
    options: &GetJobsOptions,
    discovery: &D,
    registry: &JobRegistry,
) -> Result<Vec<JobDescriptor,>, Error,>
where
    D: Discovery + ?Sized,
{
    if options.packages_paths.is_empty() {
        return Err(Error::validation("at least one packages path is required",),);
    }

    let global_config = load_global_config(&options.config_path,).await?;

    let dashboards = discovery.discover(&options.packages_paths, ItemKind::Dashboards,).await?;
    let all_jobs = discovery.discover(&options.packages_paths, ItemKind::Jobs,).await?;
    info!("Processing {} dashboards against {} job files", dashboards.len(), all_jobs.len());

    let jobs = dashboards.iter().try_fold(Vec::new(), |mut accumulated, path| {
        accumulated.extend(process_dashboard(
            discovery,
            path,
            &all_jobs,
            &global_config,
            &options.filters,
            registry,
        )?,);
        Ok::<_, Error,>(accumulated,)
    },)?;

    info!("Resolved {} jobs", jobs.len());
    Ok(jobs,)
}

/// Reads the shared configuration stored under `config_path`.
///
/// A missing file yields an empty mapping.
///
/// # Errors
///
/// Returns [`Error::ConfigRead`] when the file exists but cannot be read and
/// the errors of [`parse_global_config`] otherwise.
pub async fn load_global_config(config_path: &Path,) -> Result<ConfigMap, Error,>
{
    let path = config_path.join(GLOBAL_CONFIG_FILE,);
    let contents = match fs::read_to_string(&path,).await {
        Ok(contents,) => contents,
        Err(source,) if source.kind() == ErrorKind::NotFound => {
            debug!("No general config file at {}", path.display());
            return Ok(ConfigMap::new(),);
        }
        Err(source,) => {
            return Err(Error::ConfigRead {
                path,
                source,
            },);
        }
    };

    parse_global_config(&path, &contents,)
}

/// Parses the shared configuration document read from `path`.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] when `contents` is not a valid document
/// and [`Error::MissingConfigProperty`] when it has no `config` object.
pub fn parse_global_config(path: &Path, contents: &str,) -> Result<ConfigMap, Error,>
{
    let document: GlobalConfigDocument =
        serde_json::from_str(contents,).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        },)?;

    document.config.ok_or_else(|| {
        error!("Invalid general config file {}: config property not found", path.display());
        Error::MissingConfigProperty {
            path: path.to_path_buf(),
        }
    },)
}

fn process_dashboard<D,>(
    discovery: &D,
    path: &Path,
    all_jobs: &[PathBuf],
    global_config: &ConfigMap,
    filters: &Filters,
    registry: &JobRegistry,
) -> Result<Vec<JobDescriptor,>, Error,>
where
    D: Discovery + ?Sized,
{
    let file_name = path.file_name().map(|name| name.to_string_lossy(),).unwrap_or_default();
    if !filters.accepts_dashboard(&file_name,) {
        debug!("Skipping dashboard {} filtered out", path.display());
        return Ok(Vec::new(),);
    }

    let dashboard = dashboard::read_dashboard(path,)?;
    let mut jobs = resolver::resolve_jobs(discovery, all_jobs, &dashboard, filters, registry,)?;
    for job in &mut jobs {
        job.config = merge::resolve_config(job.config_key.as_ref(), global_config, &dashboard.config,);
    }

    debug!("Dashboard {} contributed {} jobs", dashboard.name(), jobs.len());
    Ok(jobs,)
}
