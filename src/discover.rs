// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Discovers dashboards and job files across package directories.
///
/// Every child directory of a packages root is a package. A package
/// contributes dashboards as `<package>/dashboards/<name>.json` and jobs as
/// `<package>/jobs/<name>/<name>.js`.
use std::{
    fmt,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use crate::error::{self, Error};

/// Kind of item a package can contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum ItemKind
{
    /// Dashboard definitions.
    Dashboards,
    /// Job implementations.
    Jobs,
}

impl ItemKind
{
    /// Directory inside a package holding items of this kind.
    pub const fn directory(self,) -> &'static str
    {
        match self {
            Self::Dashboards => "dashboards",
            Self::Jobs => "jobs",
        }
    }

    /// File extension of items of this kind, without the leading dot.
    pub const fn extension(self,) -> &'static str
    {
        match self {
            Self::Dashboards => "json",
            Self::Jobs => "js",
        }
    }
}

impl fmt::Display for ItemKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.directory(),)
    }
}

/// Source of dashboard and job locations.
///
/// [`PackageScanner`] reads them from disk; tests and embedders can provide
/// fixed lists instead.
pub trait Discovery
{
    /// Lists every item of `kind` found under `roots`, in a stable order.
    fn discover(
        &self,
        roots: &[PathBuf],
        kind: ItemKind,
    ) -> impl Future<Output = Result<Vec<PathBuf,>, Error,>,> + Send;

    /// Selects the items matching a (possibly `package#name` qualified)
    /// reference.
    fn resolve_candidates(&self, items: &[PathBuf], name: &str, kind: ItemKind,) -> Vec<PathBuf,>
    {
        resolve_candidates(items, name, kind,)
    }
}

/// Filesystem-backed [`Discovery`] implementation.
#[derive(Debug, Clone, Copy, Default,)]
pub struct PackageScanner;

impl Discovery for PackageScanner
{
    async fn discover(&self, roots: &[PathBuf], kind: ItemKind,) -> Result<Vec<PathBuf,>, Error,>
    {
        let mut items = Vec::new();

        for root in roots {
            for package in sorted_entries(root, kind,).await? {
                if !is_dir(&package,).await {
                    continue;
                }

                let directory = package.join(kind.directory(),);
                match kind {
                    ItemKind::Dashboards => {
                        for entry in sorted_entries(&directory, kind,).await? {
                            if has_extension(&entry, kind,) && is_file(&entry,).await {
                                items.push(entry,);
                            }
                        }
                    }
                    ItemKind::Jobs => {
                        for entry in sorted_entries(&directory, kind,).await? {
                            let Some(name,) = entry.file_name().and_then(|name| name.to_str(),)
                            else {
                                continue;
                            };
                            let file = entry.join(format!("{name}.{}", kind.extension()),);
                            if is_file(&file,).await {
                                items.push(file,);
                            }
                        }
                    }
                }
            }
        }

        debug!("Discovered {} {} under {} root(s)", items.len(), kind, roots.len());
        Ok(items,)
    }
}

/// Selects the items matching `name` for the given `kind`.
///
/// A plain `name` matches the item in any package; `package#name` only
/// matches the item contributed by `package`. Input order is preserved.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
///
/// use dashboard_jobs::{ItemKind, resolve_candidates};
///
/// let items = vec![
///     PathBuf::from("packages/core/jobs/clock/clock.js",),
///     PathBuf::from("packages/demo/jobs/clock/clock.js",),
/// ];
/// assert_eq!(resolve_candidates(&items, "clock", ItemKind::Jobs,).len(), 2);
/// assert_eq!(resolve_candidates(&items, "demo#clock", ItemKind::Jobs,), [items[1].clone()]);
/// ```
pub fn resolve_candidates(items: &[PathBuf], name: &str, kind: ItemKind,) -> Vec<PathBuf,>
{
    let (package, name,) = match name.split_once('#',) {
        Some((package, name,),) => (Some(package,), name,),
        None => (None, name,),
    };

    items.iter().filter(|item| is_candidate(item, package, name, kind,),).cloned().collect()
}

/// Returns the item name encoded in a discovered location.
pub fn item_name(path: &Path,) -> Option<&str,>
{
    path.file_stem().and_then(|stem| stem.to_str(),)
}

/// Returns the package that contributed a discovered location.
///
/// The package is the directory holding the kind's `dashboards` or `jobs`
/// directory; locations that do not follow the package layout yield `None`.
pub fn item_package(path: &Path, kind: ItemKind,) -> Option<&str,>
{
    let mut directory = path.parent()?;
    if kind == ItemKind::Jobs {
        directory = directory.parent()?;
    }
    if directory.file_name()? != kind.directory() {
        return None;
    }

    directory.parent()?.file_name()?.to_str()
}

fn is_candidate(item: &Path, package: Option<&str,>, name: &str, kind: ItemKind,) -> bool
{
    let file = format!("{name}.{}", kind.extension());
    let mut segments = item.iter().rev().map(|segment| segment.to_str(),);

    if segments.next() != Some(Some(file.as_str(),),) {
        return false;
    }
    if kind == ItemKind::Jobs && segments.next() != Some(Some(name,),) {
        return false;
    }
    if segments.next() != Some(Some(kind.directory(),),) {
        return false;
    }

    package.is_none_or(|package| segments.next() == Some(Some(package,),),)
}

async fn sorted_entries(directory: &Path, kind: ItemKind,) -> Result<Vec<PathBuf,>, Error,>
{
    let mut reader = match fs::read_dir(directory,).await {
        Ok(reader,) => reader,
        Err(source,) if source.kind() == ErrorKind::NotFound => return Ok(Vec::new(),),
        Err(source,) => return Err(error::discovery_error(kind, directory, source,),),
    };

    let mut entries = Vec::new();
    while let Some(entry,) =
        reader.next_entry().await.map_err(|source| error::discovery_error(kind, directory, source,),)?
    {
        entries.push(entry.path(),);
    }

    entries.sort();
    Ok(entries,)
}

fn has_extension(path: &Path, kind: ItemKind,) -> bool
{
    path.extension().is_some_and(|extension| extension == kind.extension(),)
}

async fn is_dir(path: &Path,) -> bool
{
    fs::metadata(path,).await.is_ok_and(|metadata| metadata.is_dir(),)
}

async fn is_file(path: &Path,) -> bool
{
    fs::metadata(path,).await.is_ok_and(|metadata| metadata.is_file(),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::PathBuf};

    use tempfile::tempdir;

    use super::*;

    fn touch(path: &Path,)
    {
        fs::create_dir_all(path.parent().expect("parent directory",),)
            .expect("failed to create directories",);
        fs::write(path, "{}",).expect("failed to write file",);
    }

    #[test]
    fn item_kind_display_uses_directory_name()
    {
        assert_eq!(ItemKind::Dashboards.to_string(), "dashboards");
        assert_eq!(ItemKind::Jobs.to_string(), "jobs");
    }

    #[test]
    fn resolve_candidates_matches_plain_names_in_any_package()
    {
        let items = vec![
            PathBuf::from("packages/core/jobs/weather/weather.js",),
            PathBuf::from("packages/core/jobs/clock/clock.js",),
            PathBuf::from("packages/extra/jobs/weather/weather.js",),
        ];
        let candidates = resolve_candidates(&items, "weather", ItemKind::Jobs,);
        assert_eq!(candidates, [items[0].clone(), items[2].clone()]);
    }

    #[test]
    fn resolve_candidates_honours_package_qualifier()
    {
        let items = vec![
            PathBuf::from("packages/core/jobs/weather/weather.js",),
            PathBuf::from("packages/extra/jobs/weather/weather.js",),
        ];
        let candidates = resolve_candidates(&items, "extra#weather", ItemKind::Jobs,);
        assert_eq!(candidates, [items[1].clone()]);
    }

    #[test]
    fn resolve_candidates_requires_whole_segment_match()
    {
        let items = vec![PathBuf::from("packages/core/jobs/weather-map/weather-map.js",)];
        assert!(resolve_candidates(&items, "weather", ItemKind::Jobs,).is_empty());
        assert!(resolve_candidates(&items, "map", ItemKind::Jobs,).is_empty());
    }

    #[test]
    fn resolve_candidates_supports_dashboards()
    {
        let items = vec![PathBuf::from("packages/core/dashboards/office.json",)];
        assert_eq!(resolve_candidates(&items, "office", ItemKind::Dashboards,).len(), 1);
    }

    #[test]
    fn item_name_uses_file_stem()
    {
        let path = PathBuf::from("packages/core/jobs/clock/clock.js",);
        assert_eq!(item_name(&path,), Some("clock"));
    }

    #[test]
    fn item_package_names_the_contributing_package()
    {
        let job = PathBuf::from("packages/local/jobs/clock/clock.js",);
        let dashboard = PathBuf::from("packages/core/dashboards/office.json",);
        assert_eq!(item_package(&job, ItemKind::Jobs,), Some("local"));
        assert_eq!(item_package(&dashboard, ItemKind::Dashboards,), Some("core"));
        assert_eq!(item_package(Path::new("clock.js",), ItemKind::Jobs,), None);
        assert_eq!(item_package(Path::new("core/misc/clock/clock.js",), ItemKind::Jobs,), None);
    }

    #[tokio::test]
    async fn scanner_lists_dashboards_and_jobs_in_sorted_order()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let root = temp.path().join("packages",);
        touch(&root.join("zeta/dashboards/b.json",),);
        touch(&root.join("alpha/dashboards/main.json",),);
        touch(&root.join("alpha/dashboards/notes.txt",),);
        touch(&root.join("alpha/jobs/clock/clock.js",),);
        touch(&root.join("alpha/jobs/stray/other.js",),);
        touch(&root.join("zeta/jobs/weather/weather.js",),);

        let roots = vec![root.clone()];
        let dashboards =
            PackageScanner.discover(&roots, ItemKind::Dashboards,).await.expect("discovery",);
        assert_eq!(dashboards, [
            root.join("alpha/dashboards/main.json"),
            root.join("zeta/dashboards/b.json")
        ]);

        let jobs = PackageScanner.discover(&roots, ItemKind::Jobs,).await.expect("discovery",);
        assert_eq!(jobs, [
            root.join("alpha/jobs/clock/clock.js"),
            root.join("zeta/jobs/weather/weather.js")
        ]);
    }

    #[tokio::test]
    async fn scanner_visits_roots_in_order()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let first = temp.path().join("local",);
        let second = temp.path().join("core",);
        touch(&first.join("pkg/dashboards/z.json",),);
        touch(&second.join("pkg/dashboards/a.json",),);

        let dashboards = PackageScanner
            .discover(&[first.clone(), second.clone()], ItemKind::Dashboards,)
            .await
            .expect("discovery",);
        assert_eq!(dashboards, [first.join("pkg/dashboards/z.json"), second.join("pkg/dashboards/a.json")]);
    }

    #[tokio::test]
    async fn scanner_ignores_missing_roots()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let roots = vec![temp.path().join("does-not-exist",)];
        let jobs = PackageScanner.discover(&roots, ItemKind::Jobs,).await.expect("discovery",);
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn scanner_reports_roots_that_are_not_directories()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let root = temp.path().join("packages",);
        fs::write(&root, "not a directory",).expect("failed to write file",);

        let error = PackageScanner
            .discover(&[root], ItemKind::Dashboards,)
            .await
            .expect_err("expected discovery error",);
        assert!(matches!(error, Error::Discovery { kind: ItemKind::Dashboards, .. }));
    }
}
