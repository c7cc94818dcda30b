//! `hudson.model.AllView`, the built-in view listing every job.

use crate::config::Config;
use crate::error::Result;
use crate::mapping::convert_mapping_to_xml;
use crate::registry::Registry;
use crate::views::{properties_element, push_owner, FILTER_FIELDS};
use crate::xml::XmlElement;

pub const ALL_VIEW: &str = "hudson.model.AllView";

/// The view name Jenkins expects for the all-jobs view.
pub const ALL_VIEW_NAME: &str = "All";

pub fn generate(_registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = XmlElement::new(ALL_VIEW);
    view.text_element("name", ALL_VIEW_NAME);
    push_owner(&mut view, config);
    convert_mapping_to_xml(&mut view, config, FILTER_FIELDS, true)?;
    view.push(properties_element());
    Ok(view)
}
