//! # View Columns
//!
//! Columns are named in YAML by short identifiers (`status`, `last-success`,
//! ...) and looked up in a fixed registry. Most identifiers map to a single
//! empty element; a few Extra Columns plugin entries also carry fixed child
//! settings, which is what [`ColumnDef::Composite`] is for.
//!
//! The one parameterized column, `{extra-build-parameter: NAME}`, shows a
//! single build parameter and is built directly rather than from the registry.
//!
//! Column order is display order, so it is preserved exactly. Unknown
//! identifiers are skipped with a warning.

use log::warn;
use serde_yaml::Value;

use crate::config::{lookup, render_value, Config};
use crate::error::{Error, Result};
use crate::xml::XmlElement;

const EXTRA_COLUMNS: Option<&str> = Some("extra-columns");

/// Element of the parameterized build-parameter column.
pub const BUILD_PARAMETERS_COLUMN: &str = "jenkins.plugins.extracolumns.BuildParametersColumn";

/// How a registered column identifier is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDef {
    /// A single empty element.
    Simple {
        tag: &'static str,
        plugin: Option<&'static str>,
    },
    /// An element with fixed `(tag, text)` children. A `None` text yields an
    /// empty child element.
    Composite {
        tag: &'static str,
        plugin: Option<&'static str>,
        aux: &'static [(&'static str, Option<&'static str>)],
    },
}

impl ColumnDef {
    const fn simple(tag: &'static str) -> Self {
        ColumnDef::Simple { tag, plugin: None }
    }

    const fn with_plugin(tag: &'static str, plugin: &'static str) -> Self {
        ColumnDef::Simple {
            tag,
            plugin: Some(plugin),
        }
    }

    /// Build the column element.
    pub fn to_element(&self) -> XmlElement {
        match *self {
            ColumnDef::Simple { tag, plugin } => plugin_element(tag, plugin),
            ColumnDef::Composite { tag, plugin, aux } => {
                let mut element = plugin_element(tag, plugin);
                for (child, text) in aux {
                    match text {
                        Some(text) => element.text_element(*child, *text),
                        None => {
                            element.sub_element(*child);
                        }
                    }
                }
                element
            }
        }
    }
}

fn plugin_element(tag: &str, plugin: Option<&str>) -> XmlElement {
    let element = XmlElement::new(tag);
    match plugin {
        Some(plugin) => element.with_attr("plugin", plugin),
        None => element,
    }
}

/// A fixed table of column identifiers.
pub type ColumnRegistry = &'static [(&'static str, ColumnDef)];

/// Columns available on nested views and the nested root.
pub const NESTED_COLUMNS: ColumnRegistry = &[
    ("status", ColumnDef::simple("hudson.views.StatusColumn")),
    ("weather", ColumnDef::simple("hudson.views.WeatherColumn")),
];

/// Columns a nested view shows when none are configured.
pub const NESTED_DEFAULT_COLUMNS: &[&str] = &["status", "weather"];

const fn test_result(aux: &'static [(&'static str, Option<&'static str>)]) -> ColumnDef {
    ColumnDef::Composite {
        tag: "jenkins.plugins.extracolumns.TestResultColumn",
        plugin: EXTRA_COLUMNS,
        aux,
    }
}

/// Columns available on list views.
pub const LIST_COLUMNS: ColumnRegistry = &[
    ("status", ColumnDef::simple("hudson.views.StatusColumn")),
    ("weather", ColumnDef::simple("hudson.views.WeatherColumn")),
    ("job", ColumnDef::simple("hudson.views.JobColumn")),
    ("last-success", ColumnDef::simple("hudson.views.LastSuccessColumn")),
    ("last-failure", ColumnDef::simple("hudson.views.LastFailureColumn")),
    ("last-duration", ColumnDef::simple("hudson.views.LastDurationColumn")),
    ("build-button", ColumnDef::simple("hudson.views.BuildButtonColumn")),
    ("last-stable", ColumnDef::simple("hudson.views.LastStableColumn")),
    ("robot-list", ColumnDef::simple("hudson.plugins.robot.view.RobotListViewColumn")),
    ("find-bugs", ColumnDef::simple("hudson.plugins.findbugs.FindBugsColumn")),
    ("jacoco", ColumnDef::simple("hudson.plugins.jacococoveragecolumn.JaCoCoColumn")),
    ("git-branch", ColumnDef::simple("hudson.plugins.git.GitBranchSpecifierColumn")),
    (
        "schedule-build",
        ColumnDef::simple("org.jenkinsci.plugins.schedulebuild.ScheduleBuildButtonColumn"),
    ),
    ("priority-sorter", ColumnDef::simple("jenkins.advancedqueue.PrioritySorterJobColumn")),
    ("build-filter", ColumnDef::simple("hudson.views.BuildFilterColumn")),
    ("desc", ColumnDef::simple("jenkins.branch.DescriptionColumn")),
    (
        "policy-violations",
        ColumnDef::with_plugin("com.sonatype.insight.ci.hudson.QualityColumn", "sonatype-clm-ci"),
    ),
    (
        "member-graph-view",
        ColumnDef::with_plugin("com.barchart.jenkins.cascade.GraphViewColumn", "maven-release-cascade"),
    ),
    ("extra-tests-total", test_result(&[("testResultFormat", Some("2"))])),
    ("extra-tests-failed", test_result(&[("testResultFormat", Some("3"))])),
    ("extra-tests-passed", test_result(&[("testResultFormat", Some("4"))])),
    ("extra-tests-skipped", test_result(&[("testResultFormat", Some("5"))])),
    ("extra-tests-format-0", test_result(&[("testResultFormat", Some("0"))])),
    ("extra-tests-format-1", test_result(&[("testResultFormat", Some("1"))])),
    (
        "extra-build-description",
        ColumnDef::Composite {
            tag: "jenkins.plugins.extracolumns.BuildDescriptionColumn",
            plugin: EXTRA_COLUMNS,
            aux: &[("columnWidth", Some("3")), ("forceWidth", Some("false"))],
        },
    ),
    (
        "extra-build-parameters",
        ColumnDef::Composite {
            tag: BUILD_PARAMETERS_COLUMN,
            plugin: EXTRA_COLUMNS,
            aux: &[("singlePara", Some("false")), ("parameterName", None)],
        },
    ),
    (
        "extra-last-user-name",
        ColumnDef::with_plugin("jenkins.plugins.extracolumns.UserNameColumn", "extra-columns"),
    ),
    (
        "extra-last-output",
        ColumnDef::with_plugin("jenkins.plugins.extracolumns.LastBuildConsoleColumn", "extra-columns"),
    ),
    (
        "extra-workspace-link",
        ColumnDef::with_plugin("jenkins.plugins.extracolumns.WorkspaceColumn", "extra-columns"),
    ),
    (
        "extra-configure-button",
        ColumnDef::with_plugin("jenkins.plugins.extracolumns.ConfigureProjectColumn", "extra-columns"),
    ),
];

/// Columns a list view shows when none are configured.
pub const LIST_DEFAULT_COLUMNS: &[&str] = &[
    "status",
    "weather",
    "job",
    "last-success",
    "last-failure",
    "last-duration",
    "build-button",
];

/// A column as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// A registry identifier.
    Named(String),
    /// `{extra-build-parameter: NAME}`.
    BuildParameter(String),
    /// Anything else; emitted as nothing.
    Unrecognized(String),
}

impl ColumnSpec {
    fn from_value(value: &Value) -> Result<ColumnSpec> {
        match value {
            Value::String(name) => Ok(ColumnSpec::Named(name.clone())),
            Value::Mapping(map) => match map.get("extra-build-parameter") {
                Some(param) => Ok(ColumnSpec::BuildParameter(render_value(param)?)),
                None => Ok(ColumnSpec::Unrecognized(render_value(value)?)),
            },
            other => Ok(ColumnSpec::Unrecognized(render_value(other)?)),
        }
    }
}

/// Read the `columns` key, falling back to `defaults` when it is absent.
pub fn parse_column_specs(config: &Config, defaults: &[&str]) -> Result<Vec<ColumnSpec>> {
    match lookup(config, "columns") {
        Some(Value::Sequence(items)) => items.iter().map(ColumnSpec::from_value).collect(),
        Some(_) => Err(Error::ConfigParse {
            message: "columns must be a list".to_string(),
            hint: Some("Write columns as `columns: [status, weather, ...]`".to_string()),
        }),
        None => Ok(defaults
            .iter()
            .map(|name| ColumnSpec::Named(name.to_string()))
            .collect()),
    }
}

/// Look an identifier up in a registry.
pub fn lookup_column(registry: ColumnRegistry, name: &str) -> Option<ColumnDef> {
    registry
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, def)| *def)
}

/// Append one element per recognized column to `container`, in input order.
pub fn build_columns(container: &mut XmlElement, specs: &[ColumnSpec], registry: ColumnRegistry) {
    for spec in specs {
        match spec {
            ColumnSpec::BuildParameter(param) => {
                let mut column = XmlElement::new(BUILD_PARAMETERS_COLUMN)
                    .with_attr("plugin", "extra-columns");
                column.text_element("singlePara", "true");
                column.text_element("parameterName", param.as_str());
                container.push(column);
            }
            ColumnSpec::Named(name) => match lookup_column(registry, name) {
                Some(def) => container.push(def.to_element()),
                None => warn!("Skipping unknown column '{}'", name),
            },
            ColumnSpec::Unrecognized(raw) => warn!("Skipping unrecognized column {}", raw),
        }
    }
}
