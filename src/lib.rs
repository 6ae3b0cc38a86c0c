//! Aggregation of the jobs referenced by dashboard packages.
//!
//! The library discovers dashboard definitions and job files across package
//! directories, resolves every widget's job reference to a registered
//! implementation and merges the shared and dashboard-local configuration
//! each job receives. The result is a flat job manifest in dashboard and
//! widget order; running the jobs is left to the caller.

mod config;
mod dashboard;
mod discover;
mod error;
mod filter;
mod merge;
mod pipeline;
mod registry;
mod resolver;
#[cfg(test)]
mod test_support;

pub use config::{
    ConfigKey, ConfigMap, ConfigObject, DashboardDefinition, GlobalConfigDocument, Layout,
    WidgetEntry, dashboard_name,
};
pub use dashboard::{parse_dashboard, read_dashboard};
pub use discover::{
    Discovery, ItemKind, PackageScanner, item_name, item_package, resolve_candidates,
};
pub use error::Error;
pub use filter::{Filters, matches};
pub use merge::{merge, resolve_config};
pub use pipeline::{
    GLOBAL_CONFIG_FILE, GetJobsOptions, JobsDocument, get_jobs, load_global_config,
    parse_global_config,
};
pub use registry::{JobHandler, JobImplementation, JobRegistry, noop_handler};
pub use resolver::{JobDescriptor, resolve_jobs};
