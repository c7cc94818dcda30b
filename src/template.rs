//! # View Templates and Defaults
//!
//! Template lookup and defaults application belong to whatever loaded the
//! configuration, not to the generators. Generators reach them through the
//! [`TemplateResolver`] trait; the CLI's implementation is
//! [`Definitions`](crate::definitions::Definitions), and library users with no
//! templates can pass [`NoTemplates`].
//!
//! Template expansion itself is shared: string values may contain `{param}`
//! placeholders that are filled from the parameters of the view entry that
//! referenced the template. `{{` and `}}` produce literal braces.

use serde_yaml::{Mapping, Value};

use crate::config::{render_value, Config};
use crate::error::{Error, Result};

/// Host capabilities needed to expand a `views:` list.
pub trait TemplateResolver {
    /// Find the view template registered under `name`.
    fn resolve_template(&self, name: &str) -> Option<Config>;

    /// Overlay `data` on the defaults it selects.
    fn apply_defaults(&self, data: Config) -> Result<Config> {
        Ok(data)
    }
}

/// A resolver with no templates and no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateResolver for NoTemplates {
    fn resolve_template(&self, _name: &str) -> Option<Config> {
        None
    }
}

/// Expand `template` with `params`.
///
/// Keys of `params` that the template does not define are carried over
/// unchanged, so a view entry can still set `view-type` or any field the
/// template leaves open.
pub fn expand_template(template: &Config, params: &Config) -> Result<Config> {
    let mut expanded = format_mapping(template, params)?;
    for (key, value) in params {
        if !expanded.contains_key(key) {
            expanded.insert(key.clone(), value.clone());
        }
    }
    Ok(expanded)
}

fn format_mapping(mapping: &Mapping, params: &Config) -> Result<Mapping> {
    let mut out = Mapping::new();
    for (key, value) in mapping {
        out.insert(format_value(key, params)?, format_value(value, params)?);
    }
    Ok(out)
}

fn format_value(value: &Value, params: &Config) -> Result<Value> {
    match value {
        Value::String(s) => {
            // A lone placeholder keeps the parameter's own type.
            if let Some(name) = sole_placeholder(s) {
                if let Some(param) = params.get(name) {
                    return Ok(param.clone());
                }
            }
            Ok(Value::String(format_str(s, params)?))
        }
        Value::Sequence(items) => items
            .iter()
            .map(|item| format_value(item, params))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Value::Mapping(map) => format_mapping(map, params).map(Value::Mapping),
        other => Ok(other.clone()),
    }
}

fn sole_placeholder(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains(['{', '}']) {
        return None;
    }
    Some(inner)
}

/// Substitute `{param}` placeholders in `template`.
pub fn format_str(template: &str, params: &Config) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    name.push(next);
                }
                if !closed {
                    return Err(Error::Template {
                        message: format!("Unclosed placeholder in '{}'", template),
                        variable: Some(name),
                    });
                }
                let value = params.get(name.as_str()).ok_or_else(|| Error::Template {
                    message: format!("Missing template parameter in '{}'", template),
                    variable: Some(name.clone()),
                })?;
                out.push_str(&render_value(value)?);
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}
