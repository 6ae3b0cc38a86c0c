// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Registration table mapping job names to their implementations.
///
/// Job files discovered in packages only name a job; the code behind the
/// name is registered here before the pipeline runs and looked up while
/// widgets are resolved.
use std::{collections::BTreeMap, fmt, sync::Arc};

use serde_json::Value;

use crate::config::ConfigObject;

/// Callable run or init behaviour of a job.
pub type JobHandler = Arc<dyn Fn(&ConfigObject,) -> Value + Send + Sync,>;

/// Returns a handler that ignores its configuration and yields `null`.
pub fn noop_handler() -> JobHandler
{
    Arc::new(|_: &ConfigObject| Value::Null,)
}

/// Shapes a job implementation can take.
#[derive(Clone,)]
pub enum JobImplementation
{
    /// The implementation is its own run behaviour and has no init step.
    RunOnly(JobHandler,),
    /// The implementation exposes optional run and init behaviour.
    Structured
    {
        /// Run behaviour, a no-op when absent.
        on_run:  Option<JobHandler,>,
        /// Init behaviour, a no-op when absent.
        on_init: Option<JobHandler,>,
    },
    /// The implementation carries no behaviour at all.
    Inert,
}

impl JobImplementation
{
    /// Wraps a closure as a [`JobImplementation::RunOnly`] implementation.
    pub fn run_only<F,>(handler: F,) -> Self
    where
        F: Fn(&ConfigObject,) -> Value + Send + Sync + 'static,
    {
        Self::RunOnly(Arc::new(handler,),)
    }

    /// Normalizes the implementation into `(on_run, on_init)` handlers.
    ///
    /// `on_init` is `None` only for [`JobImplementation::RunOnly`]; the other
    /// shapes fall back to no-op handlers for whatever they do not provide.
    pub fn handlers(&self,) -> (JobHandler, Option<JobHandler,>,)
    {
        match self {
            Self::RunOnly(on_run,) => (Arc::clone(on_run,), None,),
            Self::Structured {
                on_run,
                on_init,
            } => (
                on_run.clone().unwrap_or_else(noop_handler,),
                Some(on_init.clone().unwrap_or_else(noop_handler,),),
            ),
            Self::Inert => (noop_handler(), Some(noop_handler(),),),
        }
    }
}

impl fmt::Debug for JobImplementation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            Self::RunOnly(_,) => f.write_str("RunOnly",),
            Self::Structured {
                on_run,
                on_init,
            } => f
                .debug_struct("Structured",)
                .field("on_run", &on_run.is_some(),)
                .field("on_init", &on_init.is_some(),)
                .finish(),
            Self::Inert => f.write_str("Inert",),
        }
    }
}

/// Table of registered job implementations.
///
/// # Examples
///
/// ```
/// use dashboard_jobs::{JobImplementation, JobRegistry};
/// use serde_json::json;
///
/// let mut registry = JobRegistry::new();
/// registry.register("clock", JobImplementation::run_only(|_| json!("12:00"),),);
/// assert!(registry.lookup("clock").is_some());
/// assert!(registry.lookup("weather").is_none());
/// ```
#[derive(Debug, Clone, Default,)]
pub struct JobRegistry
{
    jobs:     BTreeMap<String, JobImplementation,>,
    fallback: Option<JobImplementation,>,
}

impl JobRegistry
{
    /// Creates an empty registry without a fallback.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Sets the implementation returned for names that were never
    /// registered.
    pub fn with_fallback(mut self, implementation: JobImplementation,) -> Self
    {
        self.fallback = Some(implementation,);
        self
    }

    /// Registers `implementation` under `name`, replacing any previous entry.
    ///
    /// `name` is either a bare job name or a `package#job` reference; the
    /// qualified form takes precedence during lookup.
    pub fn register<N,>(&mut self, name: N, implementation: JobImplementation,) -> &mut Self
    where
        N: Into<String,>,
    {
        self.jobs.insert(name.into(), implementation,);
        self
    }

    /// Looks up the implementation registered under `name`, falling back to
    /// the registry's fallback implementation.
    pub fn lookup(&self, name: &str,) -> Option<&JobImplementation,>
    {
        self.jobs.get(name,).or(self.fallback.as_ref(),)
    }

    /// Looks up the job behind a selected job file.
    ///
    /// The widget `reference` is tried first, then `package#name` for the
    /// package that contributed the file, then the bare `name` and the
    /// fallback.
    pub(crate) fn lookup_candidate(
        &self,
        reference: &str,
        package: Option<&str,>,
        name: &str,
    ) -> Option<&JobImplementation,>
    {
        self.jobs
            .get(reference,)
            .or_else(|| package.and_then(|package| self.jobs.get(&format!("{package}#{name}"),),),)
            .or_else(|| self.lookup(name,),)
    }

    /// Registered names in sorted order.
    pub fn names(&self,) -> impl Iterator<Item = &str,>
    {
        self.jobs.keys().map(String::as_str,)
    }

    /// Number of registered implementations, the fallback excluded.
    pub fn len(&self,) -> usize
    {
        self.jobs.len()
    }

    /// Returns `true` when nothing has been registered.
    pub fn is_empty(&self,) -> bool
    {
        self.jobs.is_empty()
    }
}
