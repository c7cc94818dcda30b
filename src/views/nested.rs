//! # Nested Views
//!
//! `hudson.plugins.nested_view.NestedView` groups other views. It appears
//! either as a view inside a `views:` list (`nested`) or as a top-level job
//! (`nested_root`); in both cases its child views are expanded into its own
//! `<views>` element.

use crate::columns::{build_columns, parse_column_specs, NESTED_COLUMNS, NESTED_DEFAULT_COLUMNS};
use crate::config::Config;
use crate::error::Result;
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::registry::Registry;
use crate::views::{build_views, columns_container, push_owner, ParentKind, FILTER_FIELDS};
use crate::xml::XmlElement;

pub const NESTED_VIEW: &str = "hudson.plugins.nested_view.NestedView";
pub const NESTED_VIEW_PLUGIN: &str = "nested-view";

const HEADER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("name", "name", FieldDefault::Required),
    FieldMapping::new("description", "description", FieldDefault::Empty),
];

const DEFAULT_VIEW_FIELD: &[FieldMapping] =
    &[FieldMapping::new("default-view", "defaultView", FieldDefault::Empty)];

fn push_columns(
    view: &mut XmlElement,
    config: &Config,
    parent: Option<ParentKind>,
) -> Result<()> {
    let specs = parse_column_specs(config, NESTED_DEFAULT_COLUMNS)?;
    build_columns(columns_container(view, parent), &specs, NESTED_COLUMNS);
    Ok(())
}

/// Generate a nested view from a `views:` entry.
pub fn generate(registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = XmlElement::new(NESTED_VIEW);
    convert_mapping_to_xml(&mut view, config, HEADER_FIELDS, true)?;
    let parent = push_owner(&mut view, config);
    convert_mapping_to_xml(&mut view, config, FILTER_FIELDS, true)?;
    convert_mapping_to_xml(&mut view, config, DEFAULT_VIEW_FIELD, true)?;
    view.push(build_views(registry, config)?);
    push_columns(&mut view, config, parent)?;
    Ok(view)
}

/// Generate a nested view job. The root has no owner and always wraps its
/// columns twice.
pub fn generate_root(registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut root = XmlElement::new(NESTED_VIEW).with_attr("plugin", NESTED_VIEW_PLUGIN);
    convert_mapping_to_xml(&mut root, config, HEADER_FIELDS, true)?;
    convert_mapping_to_xml(&mut root, config, FILTER_FIELDS, true)?;
    convert_mapping_to_xml(&mut root, config, DEFAULT_VIEW_FIELD, true)?;
    root.push(build_views(registry, config)?);
    push_columns(&mut root, config, Some(ParentKind::NestedView))?;
    Ok(root)
}
