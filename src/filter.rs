// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Optional name filters applied to dashboards and jobs.
//!
//! Patterns are regular expressions tested with unanchored search semantics,
//! so `"weather"` accepts `"weather-forecast"` while `"^weather$"` accepts
//! only the exact name. An absent pattern accepts every name.

use regex::Regex;

use crate::error::Error;

/// Dashboard and job filters compiled once per run.
///
/// # Examples
///
/// ```
/// use dashboard_jobs::Filters;
///
/// let filters = Filters::new(Some("^ops",), None,).expect("valid patterns",);
/// assert!(filters.accepts_dashboard("ops-overview.json"));
/// assert!(!filters.accepts_dashboard("sales.json"));
/// assert!(filters.accepts_job("anything"));
/// ```
#[derive(Debug, Clone, Default,)]
pub struct Filters
{
    /// Pattern tested against a dashboard's file name, extension included.
    pub dashboard_filter: Option<Regex,>,
    /// Pattern tested against a widget's job reference.
    pub job_filter:       Option<Regex,>,
}

impl Filters
{
    /// Compiles the provided patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] when either pattern is not a valid
    /// regular expression.
    pub fn new(dashboard_filter: Option<&str,>, job_filter: Option<&str,>,) -> Result<Self, Error,>
    {
        Ok(Self {
            dashboard_filter: dashboard_filter.map(compile,).transpose()?,
            job_filter:       job_filter.map(compile,).transpose()?,
        },)
    }

    /// Returns `true` when the dashboard file name passes the dashboard filter.
    pub fn accepts_dashboard(&self, file_name: &str,) -> bool
    {
        matches(file_name, self.dashboard_filter.as_ref(),)
    }

    /// Returns `true` when the job reference passes the job filter.
    pub fn accepts_job(&self, job_name: &str,) -> bool
    {
        matches(job_name, self.job_filter.as_ref(),)
    }
}

/// Tests `candidate` against an optional pattern.
///
/// Returns `true` when `pattern` is `None`.
pub fn matches(candidate: &str, pattern: Option<&Regex,>,) -> bool
{
    pattern.is_none_or(|regex| regex.is_match(candidate,),)
}

fn compile(pattern: &str,) -> Result<Regex, Error,>
{
    Regex::new(pattern,).map_err(|source| Error::InvalidFilter {
        pattern: pattern.to_owned(),
        source,
    },)
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn absent_pattern_accepts_every_name(name in ".{0,32}") {
            prop_assert!(matches(&name, None));
        }

        #[test]
        fn literal_pattern_accepts_names_containing_it(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
            let regex = Regex::new("weather").expect("valid regex");
            let name = format!("{prefix}weather{suffix}");
            prop_assert!(matches(&name, Some(&regex)));
        }
    }

    #[test]
    fn pattern_uses_unanchored_search()
    {
        let filters = Filters::new(None, Some("build",),).expect("valid patterns",);
        assert!(filters.accepts_job("ci-build-status"));
        assert!(!filters.accepts_job("weather"));
    }

    #[test]
    fn anchors_restrict_to_exact_names()
    {
        let filters = Filters::new(Some("^main\\.json$",), None,).expect("valid patterns",);
        assert!(filters.accepts_dashboard("main.json"));
        assert!(!filters.accepts_dashboard("main.json.bak"));
        assert!(!filters.accepts_dashboard("domain.json"));
    }

    #[test]
    fn default_filters_accept_everything()
    {
        let filters = Filters::default();
        assert!(filters.accepts_dashboard("any.json"));
        assert!(filters.accepts_job(""));
    }

    #[test]
    fn invalid_pattern_is_rejected_at_construction()
    {
        let error = Filters::new(None, Some("(unclosed",),).expect_err("expected invalid filter",);
        match error {
            Error::InvalidFilter {
                pattern, ..
            } => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected invalid filter error, got {other:?}"),
        }
    }
}
