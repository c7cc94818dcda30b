//! # Job Filters
//!
//! List views can narrow or widen their job list with the filters of the
//! View Job Filters plugin. Each filter kind maps to one Java class and a
//! fixed set of child fields; [`FilterKind`] carries both, so emitting a
//! filter is a table lookup followed by a field-mapper pass.
//!
//! Filters are evaluated by Jenkins in document order, so [`build_job_filters`]
//! never reorders or deduplicates them.
//!
//! ## Accepted shapes
//!
//! ```yaml
//! # bare names, parameters taken from a top-level key of the same name
//! job-filters: [most-recent]
//! most-recent:
//!   max-to-include: 5
//!
//! # inline parameters
//! job-filters:
//!   - regex-job:
//!       regex: "deploy-.*"
//!
//! # a mapping, in document order
//! job-filters:
//!   job-status: {failed: true}
//!   unclassified: {}
//! ```
//!
//! Unknown filter kinds are skipped with a warning.

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use crate::config::{get_mapping, lookup, Config};
use crate::error::{Error, Result};
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::xml::XmlElement;

/// Value of the `plugin` attribute on every emitted filter.
pub const FILTER_PLUGIN: &str = "view-job-filters";

const MATCH_TYPE: FieldMapping = FieldMapping::new(
    "match-type",
    "includeExcludeTypeString",
    FieldDefault::Str("includeMatched"),
);

const fn flag(key: &'static str, tag: &'static str) -> FieldMapping {
    FieldMapping::new(key, tag, FieldDefault::Bool(false))
}

const MOST_RECENT: &[FieldMapping] = &[
    FieldMapping::new("max-to-include", "maxToInclude", FieldDefault::Str("0")),
    flag("check-start-time", "checkStartTime"),
];

const BUILD_DURATION: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("build-duration-type", "buildCountTypeString", FieldDefault::Str("Latest")),
    FieldMapping::new("amount-type", "amountTypeString", FieldDefault::Str("Hours")),
    FieldMapping::new("amount", "amount", FieldDefault::Str("0")),
    FieldMapping::new("less-than", "lessThan", FieldDefault::Bool(true)),
    FieldMapping::new("build-duration-minutes", "buildDurationMinutes", FieldDefault::Str("0")),
];

const BUILD_TREND: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("build-trend-type", "buildCountTypeString", FieldDefault::Str("Latest")),
    FieldMapping::new("amount-type", "amountTypeString", FieldDefault::Str("Hours")),
    FieldMapping::new("amount", "amount", FieldDefault::Str("0")),
    FieldMapping::new("status", "statusTypeString", FieldDefault::Str("Completed")),
];

const JOB_STATUS: &[FieldMapping] = &[
    MATCH_TYPE,
    flag("unstable", "unstable"),
    flag("failed", "failed"),
    flag("aborted", "aborted"),
    flag("disabled", "disabled"),
    flag("stable", "stable"),
];

const UPSTREAM_DOWNSTREAM: &[FieldMapping] = &[
    flag("include-upstream", "includeUpstream"),
    flag("include-downstream", "includeDownstream"),
    flag("recursive", "recursive"),
    flag("exclude-originals", "excludeOriginals"),
];

const FALLBACK: &[FieldMapping] = &[
    FieldMapping::new("fallback-type", "fallbackTypeString", FieldDefault::Str("REMOVE_ALL_IF_ALL_INCLUDED")),
    FieldMapping::new("fallback-type", "fallbackType", FieldDefault::Str("REMOVE_ALL_IF_ALL_INCLUDED")),
];

const BUILD_STATUS: &[FieldMapping] = &[
    MATCH_TYPE,
    flag("never-built", "neverBuilt"),
    flag("building", "building"),
    flag("in-build-queue", "inBuildQueue"),
];

const USER_RELEVANCE: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("build-count", "buildCountTypeString", FieldDefault::Str("AtLeastOne")),
    FieldMapping::new("amount-type", "amountTypeString", FieldDefault::Str("Hours")),
    FieldMapping::new("amount", "amount", FieldDefault::Str("0")),
    flag("match-user-id", "matchUserId"),
    flag("match-user-fullname", "matchUserFullName"),
    flag("ignore-case", "ignoreCase"),
    flag("ignore-whitespace", "ignoreWhitespace"),
    flag("ignore-non-alphaNumeric", "ignoreNonAlphaNumeric"),
    flag("match-builder", "matchBuilder"),
    flag("match-email", "matchEmail"),
    flag("match-scm-changes", "matchScmChanges"),
];

const REGEX_JOB: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("regex-name", "valueTypeString", FieldDefault::Str("")),
    FieldMapping::new("regex", "regex", FieldDefault::Str("")),
];

const JOB_TYPE: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("job-type", "jobType", FieldDefault::Str("hudson.model.FreeStyleProject")),
];

const PARAMETER: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("name", "nameRegex", FieldDefault::Str("")),
    FieldMapping::new("value", "valueRegex", FieldDefault::Str("")),
    FieldMapping::new("description", "descriptionRegex", FieldDefault::Str("")),
    flag("use-default", "useDefaultValue"),
    flag("match-builds-in-progress", "matchBuildsInProgress"),
    flag("match-all-builds", "matchAllBuilds"),
    FieldMapping::new("max-builds-to-match", "maxBuildsToMatch", FieldDefault::Int(0)),
];

const OTHER_VIEWS: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new(
        "view-name",
        "otherViewName",
        FieldDefault::Str("<select a view other than this one>"),
    ),
];

const SCM: &[FieldMapping] = &[
    MATCH_TYPE,
    FieldMapping::new("scm-type", "scmType", FieldDefault::Str("hudson.scm.NullSCM")),
];

const MATCH_TYPE_ONLY: &[FieldMapping] = &[MATCH_TYPE];

const USER_PERMISSIONS: &[FieldMapping] = &[
    MATCH_TYPE,
    flag("configure", "configure"),
    flag("build", "build"),
    flag("workspace", "workspace"),
    FieldMapping::new("permission-check", "permissionCheckType", FieldDefault::Str("MustMatchAll")),
];

/// Every filter kind the generator knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    MostRecent,
    BuildDuration,
    BuildTrend,
    JobStatus,
    UpstreamDownstream,
    Fallback,
    BuildStatus,
    UserRelevance,
    RegexJob,
    JobType,
    Parameter,
    OtherViews,
    Scm,
    SecuredJob,
    UserPermissions,
    Unclassified,
}

impl FilterKind {
    pub const ALL: [FilterKind; 16] = [
        FilterKind::MostRecent,
        FilterKind::BuildDuration,
        FilterKind::BuildTrend,
        FilterKind::JobStatus,
        FilterKind::UpstreamDownstream,
        FilterKind::Fallback,
        FilterKind::BuildStatus,
        FilterKind::UserRelevance,
        FilterKind::RegexJob,
        FilterKind::JobType,
        FilterKind::Parameter,
        FilterKind::OtherViews,
        FilterKind::Scm,
        FilterKind::SecuredJob,
        FilterKind::UserPermissions,
        FilterKind::Unclassified,
    ];

    /// Look a kind up by its YAML name.
    ///
    /// `user-relevence` is accepted as a spelling of `user-relevance` because
    /// older definitions use it.
    pub fn from_name(name: &str) -> Option<FilterKind> {
        if name == "user-relevence" {
            return Some(FilterKind::UserRelevance);
        }
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The YAML name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::MostRecent => "most-recent",
            FilterKind::BuildDuration => "build-duration",
            FilterKind::BuildTrend => "build-trend",
            FilterKind::JobStatus => "job-status",
            FilterKind::UpstreamDownstream => "upstream-downstream",
            FilterKind::Fallback => "fallback",
            FilterKind::BuildStatus => "build-status",
            FilterKind::UserRelevance => "user-relevance",
            FilterKind::RegexJob => "regex-job",
            FilterKind::JobType => "job-type",
            FilterKind::Parameter => "parameter",
            FilterKind::OtherViews => "other-views",
            FilterKind::Scm => "scm",
            FilterKind::SecuredJob => "secured-job",
            FilterKind::UserPermissions => "user-permissions",
            FilterKind::Unclassified => "unclassified",
        }
    }

    /// The Java class used as the filter's element name.
    pub fn element(self) -> &'static str {
        match self {
            FilterKind::MostRecent => "hudson.views.MostRecentJobsFilter",
            FilterKind::BuildDuration => "hudson.views.BuildDurationFilter",
            FilterKind::BuildTrend => "hudson.views.BuildTrendFilter",
            FilterKind::JobStatus => "hudson.views.JobStatusFilter",
            FilterKind::UpstreamDownstream => "hudson.views.UpstreamDownstreamJobsFilter",
            FilterKind::Fallback => "hudson.views.AddRemoveFallbackFilter",
            FilterKind::BuildStatus => "hudson.views.BuildStatusFilter",
            FilterKind::UserRelevance => "hudson.views.UserRelevanceFilter",
            FilterKind::RegexJob => "hudson.views.RegExJobFilter",
            FilterKind::JobType => "hudson.views.JobTypeFilter",
            FilterKind::Parameter => "hudson.views.ParameterFilter",
            FilterKind::OtherViews => "hudson.views.OtherViewsFilter",
            FilterKind::Scm => "hudson.views.ScmTypeFilter",
            FilterKind::SecuredJob => "hudson.views.SecuredJobsFilter",
            FilterKind::UserPermissions => "hudson.views.SecurityFilter",
            FilterKind::Unclassified => "hudson.views.UnclassifiedJobsFilter",
        }
    }

    /// The kind's field table, in emission order.
    pub fn fields(self) -> &'static [FieldMapping] {
        match self {
            FilterKind::MostRecent => MOST_RECENT,
            FilterKind::BuildDuration => BUILD_DURATION,
            FilterKind::BuildTrend => BUILD_TREND,
            FilterKind::JobStatus => JOB_STATUS,
            FilterKind::UpstreamDownstream => UPSTREAM_DOWNSTREAM,
            FilterKind::Fallback => FALLBACK,
            FilterKind::BuildStatus => BUILD_STATUS,
            FilterKind::UserRelevance => USER_RELEVANCE,
            FilterKind::RegexJob => REGEX_JOB,
            FilterKind::JobType => JOB_TYPE,
            FilterKind::Parameter => PARAMETER,
            FilterKind::OtherViews => OTHER_VIEWS,
            FilterKind::Scm => SCM,
            FilterKind::SecuredJob | FilterKind::Unclassified => MATCH_TYPE_ONLY,
            FilterKind::UserPermissions => USER_PERMISSIONS,
        }
    }

    /// Emit this filter with the given parameters.
    pub fn to_element(self, params: &Mapping) -> Result<XmlElement> {
        let mut element = XmlElement::new(self.element()).with_attr("plugin", FILTER_PLUGIN);
        convert_mapping_to_xml(&mut element, params, self.fields(), true)?;
        Ok(element)
    }
}

/// A filter as written in the configuration: a kind name plus parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub name: String,
    pub params: Mapping,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, params: Mapping) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Read the `job-filters` key of a view configuration into filter specs.
///
/// A bare name takes its parameters from the top-level key of the same name.
pub fn parse_filter_specs(config: &Config) -> Result<Vec<FilterSpec>> {
    let Some(value) = lookup(config, "job-filters") else {
        return Ok(Vec::new());
    };

    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| parse_filter_item(config, item))
            .collect(),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, params)| spec_for(filter_name(key)?, params))
            .collect(),
        _ => Err(Error::ConfigParse {
            message: "job-filters must be a list or a mapping".to_string(),
            hint: Some("Write filters as `job-filters: [most-recent, ...]`".to_string()),
        }),
    }
}

fn parse_filter_item(config: &Config, item: &Value) -> Result<FilterSpec> {
    match item {
        Value::String(name) => {
            let params = get_mapping(config, name).cloned().unwrap_or_default();
            Ok(FilterSpec::new(name.clone(), params))
        }
        Value::Mapping(map) if map.len() == 1 => {
            let (key, params) = map
                .iter()
                .next()
                .ok_or_else(|| Error::config("Empty job filter mapping"))?;
            spec_for(filter_name(key)?, params)
        }
        _ => Err(Error::config(
            "Each job filter must be a name or a single-key mapping",
        )),
    }
}

fn filter_name(key: &Value) -> Result<String> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::config("Job filter names must be strings"))
}

/// Parameters of unknown kinds are not inspected; the filter is skipped later.
fn spec_for(name: String, params: &Value) -> Result<FilterSpec> {
    let params = match FilterKind::from_name(&name) {
        Some(_) => params_of(params)?,
        None => Mapping::new(),
    };
    Ok(FilterSpec::new(name, params))
}

fn params_of(value: &Value) -> Result<Mapping> {
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map.clone()),
        _ => Err(Error::config("Job filter parameters must be a mapping")),
    }
}

/// Emit one element per recognized filter, in input order.
pub fn build_job_filters(specs: &[FilterSpec]) -> Result<XmlElement> {
    let mut container = XmlElement::new("jobFilters");
    for spec in specs {
        match FilterKind::from_name(&spec.name) {
            Some(kind) => {
                debug!("Emitting job filter '{}' as {}", spec.name, kind.element());
                container.push(kind.to_element(&spec.params)?);
            }
            None => warn!("Skipping unknown job filter '{}'", spec.name),
        }
    }
    Ok(container)
}
