//! # View Generators
//!
//! One submodule per Jenkins view type. They share a few building blocks,
//! defined here:
//!
//! - **Parent reference**: a view living inside a folder, a nested view or a
//!   list view records an `<owner>` back-reference whose class depends on the
//!   parent kind ([`ParentKind`]).
//! - **Property list**: every view carries an empty
//!   `hudson.model.View$PropertyList`.
//! - **Views container**: folders, nested views and the nested root hold a
//!   `<views>` element built from a `views:` list ([`build_views`]). Each entry
//!   is `{template-or-kind: data}`; the data has defaults applied, is expanded
//!   through a view template when one matches, and is then dispatched through
//!   the registry.

pub mod all;
pub mod build_pipeline;
pub mod list;
pub mod nested;
pub mod pipeline;

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use crate::config::{get_sequence, get_str, is_truthy, lookup, Config};
use crate::error::{Error, Result};
use crate::mapping::{FieldDefault, FieldMapping};
use crate::registry::Registry;
use crate::template::expand_template;
use crate::xml::XmlElement;

/// Class of the (always empty) view property list.
pub const PROPERTY_LIST: &str = "hudson.model.View$PropertyList";

/// Relative path from a view's owner element back to its parent.
pub const OWNER_REFERENCE: &str = "../../..";

/// `filterExecutors` / `filterQueue`, shared by every view type.
pub const FILTER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("filter-executors", "filterExecutors", FieldDefault::Bool(false)),
    FieldMapping::new("filter-queue", "filterQueue", FieldDefault::Bool(false)),
];

/// The container a view is declared to live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Folder,
    NestedView,
    ListView,
}

impl ParentKind {
    /// Read the `parent` key. Unset or false means the view has no declared
    /// parent; any value other than `nested-view` or `list-view` means a
    /// folder.
    pub fn from_config(config: &Config) -> Option<ParentKind> {
        let value = lookup(config, "parent").filter(|v| is_truthy(v))?;
        Some(match value.as_str() {
            Some("nested-view") => ParentKind::NestedView,
            Some("list-view") => ParentKind::ListView,
            _ => ParentKind::Folder,
        })
    }

    /// Java class recorded on the owner element.
    pub fn class(self) -> &'static str {
        match self {
            ParentKind::Folder => "com.cloudbees.hudson.plugins.folder.Folder",
            ParentKind::NestedView => "hudson.plugins.nested_view.NestedView",
            ParentKind::ListView => "hudson.model.ListView",
        }
    }

    pub fn owner_element(self) -> XmlElement {
        XmlElement::new("owner")
            .with_attr("class", self.class())
            .with_attr("reference", OWNER_REFERENCE)
    }
}

/// Append an `<owner>` element when the view declares a parent, and return
/// the parent kind.
pub fn push_owner(view: &mut XmlElement, config: &Config) -> Option<ParentKind> {
    let parent = ParentKind::from_config(config);
    debug!(
        "Read parent {:?} for view '{}'",
        parent,
        get_str(config, "name").unwrap_or("<unnamed>")
    );
    if let Some(kind) = parent {
        view.push(kind.owner_element());
    }
    parent
}

pub fn properties_element() -> XmlElement {
    XmlElement::new("properties").with_attr("class", PROPERTY_LIST)
}

/// Append the column container. Inside a nested view the column list is
/// wrapped in a second `<columns>` element.
pub fn columns_container(view: &mut XmlElement, parent: Option<ParentKind>) -> &mut XmlElement {
    let columns = view.sub_element("columns");
    if parent == Some(ParentKind::NestedView) {
        columns.sub_element("columns")
    } else {
        columns
    }
}

/// Build the `<views>` container from the `views:` list of `config`.
pub fn build_views(registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    registry.descend(|| collect_views(registry, config))
}

fn collect_views(registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut container = XmlElement::new("views");
    let Some(entries) = get_sequence(config, "views") else {
        return Ok(container);
    };

    for entry in entries {
        let Some((key, data)) = view_entry(entry) else {
            warn!("Skipping views entry that is not a single-key mapping: {:?}", entry);
            continue;
        };

        for view_config in expand_view_entry(registry, key, data)? {
            let kind = get_str(&view_config, "view-type").unwrap_or(key);
            container.push(registry.dispatch_view(kind, &view_config)?);
        }
    }

    Ok(container)
}

/// Split `{key: data}`; data that is not a mapping counts as empty.
fn view_entry(entry: &Value) -> Option<(&str, Config)> {
    let map = entry.as_mapping()?;
    let (key, data) = map.iter().next()?;
    let data = data.as_mapping().cloned().unwrap_or_default();
    Some((key.as_str()?, data))
}

fn expand_view_entry(registry: &Registry<'_>, key: &str, data: Config) -> Result<Vec<Config>> {
    // A `views:` list inherited from defaults belongs to the job, not to each child view.
    let declares_views = data.contains_key("views");
    let mut data = registry.resolver().apply_defaults(data)?;
    if !declares_views {
        data.remove("views");
    }

    match registry.resolver().resolve_template(key) {
        Some(template) => {
            debug!("Expanding view template '{}'", key);
            data.remove("views");
            Ok(vec![expand_template(&template, &data)?])
        }
        None => {
            debug!(
                "Expanding view '{}'",
                get_str(&data, "name").unwrap_or("<unnamed>")
            );
            Ok(vec![data])
        }
    }
}

/// Read a list of mappings under `key`, e.g. pipeline components.
pub(crate) fn mapping_list<'a>(config: &'a Config, key: &str) -> Result<Vec<&'a Mapping>> {
    get_sequence(config, key)
        .unwrap_or_default()
        .iter()
        .map(|item| {
            item.as_mapping()
                .ok_or_else(|| Error::config(format!("Each entry of '{}' must be a mapping", key)))
        })
        .collect()
}
