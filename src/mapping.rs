//! # Field Mapper
//!
//! Most of a Jenkins view configuration is a flat list of child elements whose
//! text comes straight from a YAML key, or from a default when the key is
//! absent. Generators describe those children as static tables of
//! [`FieldMapping`]s and hand them to [`convert_mapping_to_xml`], which emits
//! one element per row, in table order.
//!
//! ```
//! use jenkins_job_addons::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
//! use jenkins_job_addons::xml::XmlElement;
//!
//! const FIELDS: &[FieldMapping] = &[
//!     FieldMapping::new("max-to-include", "maxToInclude", FieldDefault::Str("0")),
//!     FieldMapping::new("check-start-time", "checkStartTime", FieldDefault::Bool(false)),
//! ];
//!
//! let config = serde_yaml::from_str("max-to-include: 5").unwrap();
//! let mut parent = XmlElement::new("hudson.views.MostRecentJobsFilter");
//! convert_mapping_to_xml(&mut parent, &config, FIELDS, true).unwrap();
//!
//! assert_eq!(parent.child_text("maxToInclude"), Some("5"));
//! assert_eq!(parent.child_text("checkStartTime"), Some("false"));
//! ```

use crate::config::{lookup, render_value, Config};
use crate::error::{Error, Result};
use crate::xml::XmlElement;

/// What to emit when a field's key is absent from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// No default. Absence fails with `MissingRequiredField` when the table is
    /// applied with `fail_required`, and emits nothing otherwise.
    Required,
    /// Emit the element with no text.
    Empty,
    Str(&'static str),
    Bool(bool),
    Int(i64),
}

/// One row of a field-mapping table: YAML key, XML tag, default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub key: &'static str,
    pub tag: &'static str,
    pub default: FieldDefault,
    /// Allowed values; empty means unrestricted.
    pub choices: &'static [&'static str],
}

impl FieldMapping {
    pub const fn new(key: &'static str, tag: &'static str, default: FieldDefault) -> Self {
        Self {
            key,
            tag,
            default,
            choices: &[],
        }
    }

    /// Restrict the field to a fixed set of values.
    pub const fn one_of(self, choices: &'static [&'static str]) -> Self {
        Self { choices, ..self }
    }

    /// Resolve the text for this row, or `None` when nothing is emitted.
    fn resolve(&self, config: &Config, fail_required: bool) -> Result<Option<Option<String>>> {
        let text = match lookup(config, self.key) {
            Some(value) => Some(render_value(value)?),
            None => match self.default {
                FieldDefault::Required if fail_required => {
                    return Err(Error::MissingRequiredField {
                        field: self.key.to_string(),
                    })
                }
                FieldDefault::Required => return Ok(None),
                FieldDefault::Empty => None,
                FieldDefault::Str(s) => Some(s.to_string()),
                FieldDefault::Bool(b) => Some(b.to_string()),
                FieldDefault::Int(i) => Some(i.to_string()),
            },
        };

        if let Some(value) = &text {
            check_choice(self.key, value, self.choices)?;
        }
        Ok(Some(text))
    }
}

/// Fail with `InvalidEnumValue` unless `value` is one of `choices`.
///
/// An empty `choices` slice accepts everything.
pub fn check_choice(field: &str, value: &str, choices: &[&str]) -> Result<()> {
    if choices.is_empty() || choices.contains(&value) {
        return Ok(());
    }
    Err(Error::InvalidEnumValue {
        field: field.to_string(),
        value: value.to_string(),
        allowed: choices.iter().map(|c| c.to_string()).collect(),
    })
}

/// Apply `mapping` to `config`, appending one child to `parent` per row.
///
/// Rows are processed in order and the first failure aborts the call; the
/// children already appended stay on `parent`, but callers discard the whole
/// tree on error.
pub fn convert_mapping_to_xml(
    parent: &mut XmlElement,
    config: &Config,
    mapping: &[FieldMapping],
    fail_required: bool,
) -> Result<()> {
    for field in mapping {
        match field.resolve(config, fail_required)? {
            Some(Some(text)) => parent.text_element(field.tag, text),
            Some(None) => {
                parent.sub_element(field.tag);
            }
            None => {}
        }
    }
    Ok(())
}
