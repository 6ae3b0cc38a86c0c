#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the job aggregation crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

use crate::discover::ItemKind;

/// Unified error type returned by the aggregation pipeline and CLI.
///
/// Every variant is fatal for the run that produced it: the pipeline never
/// returns partial job lists. Variants carry the offending path or name so a
/// single line of output is enough to locate the broken package.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The global configuration file exists but could not be read.
    #[error("failed to read general config file {path:?}: {source}")]
    ConfigRead {
        /// Location of the global configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The global configuration file is not valid JSON.
    #[error("failed to parse general config file {path:?}: {source}")]
    ConfigParse {
        /// Location of the global configuration file.
        path:   PathBuf,
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// The global configuration file parsed but carries no `config` object.
    #[error("invalid general config file {path:?}: config property not found")]
    MissingConfigProperty {
        /// Location of the global configuration file.
        path: PathBuf
    },
    /// The package scanner failed while enumerating items.
    #[error("failed to discover {kind} under {path:?}: {source}")]
    Discovery {
        /// Kind of item being enumerated.
        kind:   ItemKind,
        /// Directory that could not be listed.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// A dashboard file could not be read.
    #[error("failed to read dashboard {path:?}: {source}")]
    DashboardRead {
        /// Location of the dashboard definition.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// A dashboard file is not valid JSON.
    #[error("malformed dashboard {path:?}: {source}")]
    MalformedDashboard {
        /// Location of the dashboard definition.
        path:   PathBuf,
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// A dashboard lacks `layout` or `layout.widgets` when its widgets are
    /// walked.
    #[error("dashboard {path:?} has no {field} field")]
    DashboardStructure {
        /// Location of the dashboard definition.
        path:  PathBuf,
        /// Dotted name of the missing field.
        field: &'static str
    },
    /// No job file matches a widget's job reference.
    #[error("no job file found for job '{job}' referenced by dashboard '{dashboard}'")]
    UnresolvedJob {
        /// Raw job reference taken from the widget.
        job:       String,
        /// Name of the dashboard that references the job.
        dashboard: String
    },
    /// A job file was discovered but nothing is registered under its name.
    #[error("no implementation registered for job '{job}' discovered at {path:?}")]
    MissingImplementation {
        /// Job name derived from the candidate location.
        job:  String,
        /// Candidate location selected for the job.
        path: PathBuf
    },
    /// A dashboard or job filter is not a valid regular expression.
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        /// Pattern supplied by the caller.
        pattern: String,
        /// Compilation error reported by the regex engine.
        source:  regex::Error
    },
    /// Returned when caller-supplied options violate invariants.
    #[error("invalid options: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps serialization errors when writing the job manifest.
    #[error("failed to serialize jobs: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Discovery`] variant capturing the failing directory.
///
/// # Parameters
///
/// * `kind` - Item kind that was being enumerated.
/// * `path` - Directory that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn discovery_error(kind: ItemKind, path: &Path, source: std::io::Error) -> Error {
    Error::Discovery {
        kind,
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::DashboardRead`] variant for an unreadable
/// dashboard file.
pub fn dashboard_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::DashboardRead {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::MalformedDashboard`] variant for a dashboard file that is
/// not valid JSON.
pub fn dashboard_parse_error(path: &Path, source: serde_json::Error) -> Error {
    Error::MalformedDashboard {
        path: path.to_path_buf(),
        source
    }
}
