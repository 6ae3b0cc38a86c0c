//! Document types describing dashboard definitions and the shared
//! configuration file.
//!
//! The types mirror the JSON documents found in package trees. Display-only
//! widget fields are kept verbatim so the resolved job manifest can hand the
//! complete widget back to whatever renders it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Mapping from configuration key to configuration object.
pub type ConfigMap = Map<String, Value,>;

/// Resolved configuration handed to a job after merging.
pub type ConfigObject = Map<String, Value,>;

/// Shared configuration document stored as `dashboard_common.json`.
///
/// # Examples
///
/// ```
/// use dashboard_jobs::GlobalConfigDocument;
///
/// let json = r#"{ "config": { "weather": { "city": "Sydney" } } }"#;
/// let document: GlobalConfigDocument = serde_json::from_str(json,).expect("valid document",);
/// assert!(document.config.expect("config present",).contains_key("weather"));
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default,)]
pub struct GlobalConfigDocument
{
    /// Named configuration objects shared by every dashboard.
    #[serde(default)]
    pub config: Option<ConfigMap,>,
}

/// Dashboard definition loaded from a package's `dashboards` directory.
///
/// `layout` and `layout.widgets` are required for the dashboard to be
/// usable, but they are kept optional here so a structurally broken dashboard
/// can still be read and reported before it is rejected.
#[derive(Debug, Deserialize, Serialize, Clone, Default,)]
pub struct DashboardDefinition
{
    /// File the definition was read from.
    #[serde(skip)]
    pub path: PathBuf,

    /// Widget layout of the dashboard.
    #[serde(default)]
    pub layout: Option<Layout,>,

    /// Dashboard-local configuration objects.
    #[serde(default)]
    pub config: ConfigMap,
}

/// Layout section of a dashboard definition.
#[derive(Debug, Deserialize, Serialize, Clone, Default,)]
pub struct Layout
{
    /// Ordered widget list; order determines rendering order downstream.
    #[serde(default)]
    pub widgets: Option<Vec<WidgetEntry,>,>,
}

/// Single widget of a dashboard.
///
/// # Examples
///
/// ```
/// use dashboard_jobs::{ConfigKey, WidgetEntry};
///
/// let json = r#"{ "row": 1, "col": 2, "widget": "weather", "job": "weather", "config": "sydney" }"#;
/// let widget: WidgetEntry = serde_json::from_str(json,).expect("valid widget",);
/// assert_eq!(widget.job.as_deref(), Some("weather"));
/// assert_eq!(widget.config, Some(ConfigKey::Single("sydney".to_owned())));
/// assert_eq!(widget.display["row"], 1);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq,)]
pub struct WidgetEntry
{
    /// Name of the job feeding this widget, absent for static widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String,>,

    /// Configuration key or keys the job should receive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigKey,>,

    /// Display-only fields, passed through untouched.
    #[serde(flatten)]
    pub display: Map<String, Value,>,
}

impl WidgetEntry
{
    /// Returns the job reference when the widget carries a non-empty one.
    pub fn job_name(&self,) -> Option<&str,>
    {
        self.job.as_deref().filter(|name| !name.is_empty(),)
    }
}

/// Configuration key reference carried by a widget.
///
/// A widget either names one configuration object or an ordered list whose
/// resolved objects are layered on top of each other.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
#[serde(untagged)]
pub enum ConfigKey
{
    /// Single configuration key.
    Single(String,),
    /// Ordered configuration keys; later keys take precedence.
    Sequence(Vec<String,>,),
}

impl ConfigKey
{
    /// Returns the referenced keys in precedence order.
    pub fn keys(&self,) -> Vec<&str,>
    {
        match self {
            Self::Single(key,) => vec![key.as_str()],
            Self::Sequence(keys,) => keys.iter().map(String::as_str,).collect(),
        }
    }
}

impl DashboardDefinition
{
    /// Name of the dashboard: its file name with the extension stripped.
    pub fn name(&self,) -> String
    {
        dashboard_name(&self.path,)
    }

    /// Returns the ordered widget list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DashboardStructure`] when `layout` or
    /// `layout.widgets` is missing.
    pub fn widgets(&self,) -> Result<&[WidgetEntry], Error,>
    {
        let layout = self.layout.as_ref().ok_or_else(|| Error::DashboardStructure {
            path:  self.path.clone(),
            field: "layout",
        },)?;

        layout.widgets.as_deref().ok_or_else(|| Error::DashboardStructure {
            path:  self.path.clone(),
            field: "layout.widgets",
        },)
    }
}

/// Derives a dashboard name from its file path.
pub fn dashboard_name(path: &Path,) -> String
{
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned(),).unwrap_or_default()
}
