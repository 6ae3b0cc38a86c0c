//! Command-line interface for the dashboard-jobs binary.
//!
//! The CLI resolves the job manifest of a package tree and prints it as JSON.
//! No job code is linked into the binary, so every discovered job resolves to
//! an inert implementation; the manifest shows which jobs would run, on which
//! dashboards, with which configuration.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use dashboard_jobs::{
    Discovery, Error, Filters, GetJobsOptions, ItemKind, JobImplementation, JobRegistry,
    JobsDocument, PackageScanner, get_jobs,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Command line interface for inspecting dashboard job manifests.
#[derive(Debug, Parser,)]
#[command(name = "dashboard-jobs", version, about = "Resolve the jobs of dashboard packages")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Print the resolved job manifest.
    List(ListArgs,),
    /// Print the dashboard files found in the package tree.
    Dashboards(DashboardsArgs,),
}

#[derive(Debug, Args,)]
struct PackageArgs
{
    /// Package roots to scan, in priority order.
    #[arg(
        long = "packages",
        value_name = "DIR",
        env = "DASHBOARD_JOBS_PACKAGES",
        value_delimiter = ',',
        required = true
    )]
    packages: Vec<PathBuf,>,

    /// Regular expression selecting dashboards by file name.
    #[arg(long = "dashboard-filter", value_name = "REGEX")]
    dashboard_filter: Option<String,>,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `list` subcommand.
struct ListArgs
{
    #[command(flatten)]
    packages: PackageArgs,

    /// Directory containing dashboard_common.json.
    #[arg(long = "config", value_name = "DIR", env = "DASHBOARD_JOBS_CONFIG", default_value = "config")]
    config: PathBuf,

    /// Regular expression selecting jobs by name.
    #[arg(long = "job-filter", value_name = "REGEX")]
    job_filter: Option<String,>,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `dashboards` subcommand.
struct DashboardsArgs
{
    #[command(flatten)]
    packages: PackageArgs,
}

#[derive(Debug, Serialize,)]
struct DashboardsDocument
{
    dashboards: Vec<PathBuf,>,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info`
/// default.
fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the parsed command.
///
/// # Errors
///
/// Propagates errors from filter compilation, discovery and resolution.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::List(args,) => run_list(args, &mut handle,).await,
        Command::Dashboards(args,) => run_dashboards(args, &mut handle,).await,
    }
}

async fn run_list<W: io::Write,>(args: ListArgs, writer: &mut W,) -> Result<(), Error,>
{
    let options = GetJobsOptions {
        filters:        Filters::new(
            args.packages.dashboard_filter.as_deref(),
            args.job_filter.as_deref(),
        )?,
        packages_paths: args.packages.packages,
        config_path:    args.config,
    };
    let registry = JobRegistry::new().with_fallback(JobImplementation::Inert,);

    let jobs = get_jobs(&options, &PackageScanner, &registry,).await?;
    write_document(writer, &JobsDocument {
        jobs,
    }, args.packages.pretty,)
}

async fn run_dashboards<W: io::Write,>(args: DashboardsArgs, writer: &mut W,) -> Result<(), Error,>
{
    let filters = Filters::new(args.packages.dashboard_filter.as_deref(), None,)?;
    let dashboards = PackageScanner
        .discover(&args.packages.packages, ItemKind::Dashboards,)
        .await?
        .into_iter()
        .filter(|path| {
            let file_name = path.file_name().map(|name| name.to_string_lossy(),).unwrap_or_default();
            filters.accepts_dashboard(&file_name,)
        },)
        .collect();

    write_document(writer, &DashboardsDocument {
        dashboards,
    }, args.packages.pretty,)
}

fn write_document<W: io::Write, T: Serialize,>(
    writer: &mut W,
    document: &T,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, document,)?;
    } else {
        serde_json::to_writer(writer, document,)?;
    }

    Ok((),)
}
