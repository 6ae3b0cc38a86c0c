// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Reading of dashboard definition files.
use std::{fs, path::Path};

use tracing::error;

use crate::{
    config::DashboardDefinition,
    error::{Error, dashboard_io_error, dashboard_parse_error},
};

/// Reads and checks the dashboard stored at `path`.
///
/// A dashboard missing `layout` or `layout.widgets` is reported through the
/// log and still returned; resolving its jobs fails later with
/// [`Error::DashboardStructure`].
///
/// The file is read with blocking I/O on the calling thread.
///
/// # Errors
///
/// Returns [`Error::DashboardRead`] when the file cannot be read and
/// [`Error::MalformedDashboard`] when it is not valid JSON.
pub fn read_dashboard(path: &Path,) -> Result<DashboardDefinition, Error,>
{
    let contents =
        fs::read_to_string(path,).map_err(|source| dashboard_io_error(path, source,),)?;
    parse_dashboard(path, &contents,)
}

/// Parses dashboard `contents` attributed to `path`.
///
/// # Errors
///
/// Returns [`Error::MalformedDashboard`] when `contents` is not a valid
/// dashboard document.
pub fn parse_dashboard(path: &Path, contents: &str,) -> Result<DashboardDefinition, Error,>
{
    let mut dashboard: DashboardDefinition = serde_json::from_str(contents,)
        .map_err(|source| dashboard_parse_error(path, source,),)?;
    dashboard.path = path.to_path_buf();

    match dashboard.layout.as_ref() {
        None => error!("No layout field found in {}", path.display()),
        Some(layout,) if layout.widgets.is_none() => {
            error!("No widgets field found in {}", path.display())
        }
        Some(_,) => {}
    }

    Ok(dashboard,)
}
