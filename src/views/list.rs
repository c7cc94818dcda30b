//! # List Views
//!
//! `hudson.model.ListView` (`sublist`): an explicit, sorted job list, the
//! view-job-filters chain and a column layout, plus optional regex and status
//! filters.

use serde_yaml::Value;

use crate::columns::{build_columns, parse_column_specs, LIST_COLUMNS, LIST_DEFAULT_COLUMNS};
use crate::config::{lookup, render_value, Config};
use crate::error::Result;
use crate::filters::{build_job_filters, parse_filter_specs};
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::names::job_names_element;
use crate::registry::Registry;
use crate::views::{columns_container, properties_element, push_owner};
use crate::xml::XmlElement;

pub const LIST_VIEW: &str = "hudson.model.ListView";

const HEADER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("name", "name", FieldDefault::Required),
    FieldMapping::new("description", "description", FieldDefault::Str("")),
    FieldMapping::new("filter-executors", "filterExecutors", FieldDefault::Bool(false)),
    FieldMapping::new("filter-queue", "filterQueue", FieldDefault::Bool(false)),
];

/// Applied without `fail_required`: absent optional fields emit nothing.
const TRAILER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("regex", "includeRegex", FieldDefault::Required),
    FieldMapping::new("recurse", "recurse", FieldDefault::Bool(false)),
    FieldMapping::new("status-filter", "statusFilter", FieldDefault::Required),
];

/// Read `job-name`, which is either a list of names or a single name.
pub fn job_names(config: &Config) -> Result<Vec<String>> {
    match lookup(config, "job-name") {
        None => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items.iter().map(render_value).collect(),
        Some(other) => Ok(vec![render_value(other)?]),
    }
}

pub fn generate(_registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = XmlElement::new(LIST_VIEW);
    convert_mapping_to_xml(&mut view, config, HEADER_FIELDS, true)?;
    let parent = push_owner(&mut view, config);
    view.push(properties_element());
    view.push(job_names_element(&job_names(config)?));
    view.push(build_job_filters(&parse_filter_specs(config)?)?);

    let columns = parse_column_specs(config, LIST_DEFAULT_COLUMNS)?;
    build_columns(columns_container(&mut view, parent), &columns, LIST_COLUMNS);

    convert_mapping_to_xml(&mut view, config, TRAILER_FIELDS, false)?;
    Ok(view)
}
