//! # Definition Files
//!
//! Loads the YAML files the CLI works from. A definitions file is a list of
//! single-key entries:
//!
//! ```yaml
//! - defaults:
//!     name: global
//!     description: Managed by jenkins-job-addons
//! - view-template:
//!     name: "{team}-list"
//!     view-type: sublist
//!     regex: "{team}-.*"
//! - job:
//!     name: teams
//!     project-type: folder
//!     views:
//!       - "{team}-list":
//!           team: platform
//! - view:
//!     name: Everything
//!     view-type: all
//! ```
//!
//! Jobs and standalone views are generated units. View templates and defaults
//! are only reachable through the [`TemplateResolver`] implementation, which
//! is how generators expanding a `views:` list see them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_yaml::Value;
use walkdir::WalkDir;

use crate::config::{get_str, Config};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::template::TemplateResolver;
use crate::xml::XmlElement;

/// Defaults selected by units that do not name any.
pub const GLOBAL_DEFAULTS: &str = "global";

const ENTRY_HINT: &str = "Each entry must be one of `- job:`, `- view:`, `- view-template:` or `- defaults:` followed by a mapping";

/// What a generated unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Job,
    View,
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Job => "job",
            UnitKind::View => "view",
        }
    }
}

/// One generated configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub name: String,
    pub kind: UnitKind,
    pub xml: XmlElement,
}

impl GeneratedUnit {
    /// The serialized document, with its XML declaration.
    pub fn to_document(&self) -> Result<String> {
        self.xml.to_document()
    }
}

/// Everything read from one or more definition files.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    jobs: Vec<Config>,
    views: Vec<Config>,
    view_templates: HashMap<String, Config>,
    defaults: HashMap<String, Config>,
}

impl Definitions {
    /// Parse the contents of one definitions file.
    pub fn parse(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let entries = match root {
            Value::Null => return Ok(Self::default()),
            Value::Sequence(entries) => entries,
            _ => {
                return Err(Error::ConfigParse {
                    message: "Definitions must be a YAML list".to_string(),
                    hint: Some(ENTRY_HINT.to_string()),
                })
            }
        };

        let mut definitions = Self::default();
        for entry in entries {
            definitions.add_entry(entry)?;
        }
        Ok(definitions)
    }

    /// Read and parse one definitions file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading definitions from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|err| match err {
            Error::ConfigParse { message, hint } => Error::ConfigParse {
                message: format!("{}: {}", path.display(), message),
                hint,
            },
            other => other,
        })
    }

    /// Load every file named in `paths`. Directories are searched
    /// recursively for `.yaml` and `.yml` files, in name order.
    pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut definitions = Self::default();
        for path in paths {
            for file in definition_files(path.as_ref())? {
                definitions.merge(Self::from_file(&file)?)?;
            }
        }
        info!(
            "Loaded {} job(s), {} view(s), {} view template(s)",
            definitions.jobs.len(),
            definitions.views.len(),
            definitions.view_templates.len()
        );
        Ok(definitions)
    }

    /// Add the entries of `other`. Names must stay unique per category.
    pub fn merge(&mut self, other: Definitions) -> Result<()> {
        for job in other.jobs {
            push_unique(&mut self.jobs, job, "job")?;
        }
        for view in other.views {
            push_unique(&mut self.views, view, "view")?;
        }
        for (name, template) in other.view_templates {
            insert_unique(&mut self.view_templates, name, template, "view-template")?;
        }
        for (name, defaults) in other.defaults {
            insert_unique(&mut self.defaults, name, defaults, "defaults")?;
        }
        Ok(())
    }

    pub fn jobs(&self) -> &[Config] {
        &self.jobs
    }

    pub fn views(&self) -> &[Config] {
        &self.views
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.views.is_empty()
    }

    /// Generate every job and view whose name matches `filter`.
    pub fn generate(&self, filter: Option<&glob::Pattern>) -> Result<Vec<GeneratedUnit>> {
        let registry = Registry::new(self);
        self.generate_with(&registry, filter)
    }

    /// Like [`generate`](Self::generate), dispatching through `registry`.
    pub fn generate_with(
        &self,
        registry: &Registry<'_>,
        filter: Option<&glob::Pattern>,
    ) -> Result<Vec<GeneratedUnit>> {
        let selected = |config: &Config| {
            let name = unit_name(config);
            filter.map_or(true, |pattern| pattern.matches(name))
        };

        let mut units = Vec::new();
        for job in self.jobs.iter().filter(|c| selected(*c)) {
            let data = self.apply_defaults(job.clone())?;
            debug!("Generating job '{}'", unit_name(&data));
            units.push(GeneratedUnit {
                name: unit_name(&data).to_string(),
                kind: UnitKind::Job,
                xml: registry.generate_project(&data)?,
            });
        }
        for view in self.views.iter().filter(|c| selected(*c)) {
            let data = self.apply_defaults(view.clone())?;
            let kind = get_str(&data, "view-type").ok_or_else(|| Error::MissingRequiredField {
                field: "view-type".to_string(),
            })?;
            units.push(GeneratedUnit {
                name: unit_name(&data).to_string(),
                kind: UnitKind::View,
                xml: registry.dispatch_view(kind, &data)?,
            });
        }
        Ok(units)
    }

    fn add_entry(&mut self, entry: Value) -> Result<()> {
        let Value::Mapping(map) = entry else {
            return Err(entry_error("Definition entries must be mappings"));
        };
        if map.len() != 1 {
            return Err(entry_error("Definition entries must have exactly one key"));
        }
        let Some((key, body)) = map.into_iter().next() else {
            return Err(entry_error("Empty definition entry"));
        };
        let key = key
            .as_str()
            .ok_or_else(|| entry_error("Definition keys must be strings"))?
            .to_string();
        let Value::Mapping(body) = body else {
            return Err(entry_error(&format!("The body of '{}' must be a mapping", key)));
        };
        let name = get_str(&body, "name")
            .ok_or_else(|| Error::ConfigParse {
                message: format!("A '{}' entry is missing its name", key),
                hint: Some("Add a `name:` key".to_string()),
            })?
            .to_string();

        match key.as_str() {
            "job" => push_unique(&mut self.jobs, body, "job"),
            "view" => push_unique(&mut self.views, body, "view"),
            "view-template" => insert_unique(&mut self.view_templates, name, body, "view-template"),
            "defaults" => insert_unique(&mut self.defaults, name, body, "defaults"),
            other => Err(entry_error(&format!("Unknown definition type '{}'", other))),
        }
    }
}

impl TemplateResolver for Definitions {
    fn resolve_template(&self, name: &str) -> Option<Config> {
        self.view_templates.get(name).cloned()
    }

    /// Overlay `data` on a copy of the defaults it selects with `defaults:`.
    fn apply_defaults(&self, data: Config) -> Result<Config> {
        let selected = get_str(&data, "defaults").unwrap_or(GLOBAL_DEFAULTS);
        let Some(defaults) = self.defaults.get(selected) else {
            if selected == GLOBAL_DEFAULTS {
                return Ok(data);
            }
            return Err(Error::ConfigParse {
                message: format!("Unknown defaults '{}'", selected),
                hint: Some("Declare it with `- defaults: {name: ...}`".to_string()),
            });
        };

        let mut merged = defaults.clone();
        merged.remove("name");
        for (key, value) in data {
            merged.insert(key, value);
        }
        Ok(merged)
    }
}

/// Compile a `--name` style glob selecting units by name.
pub fn name_filter(pattern: &str) -> Result<glob::Pattern> {
    Ok(glob::Pattern::new(pattern)?)
}

fn unit_name(config: &Config) -> &str {
    get_str(config, "name").unwrap_or_default()
}

fn entry_error(message: &str) -> Error {
    Error::ConfigParse {
        message: message.to_string(),
        hint: Some(ENTRY_HINT.to_string()),
    }
}

fn duplicate_error(category: &str, name: &str) -> Error {
    Error::ConfigParse {
        message: format!("Duplicate {} '{}'", category, name),
        hint: Some("Names must be unique across all definition files".to_string()),
    }
}

fn push_unique(units: &mut Vec<Config>, unit: Config, category: &str) -> Result<()> {
    let name = unit_name(&unit);
    if units.iter().any(|u| unit_name(u) == name) {
        return Err(duplicate_error(category, name));
    }
    units.push(unit);
    Ok(())
}

fn insert_unique(
    table: &mut HashMap<String, Config>,
    name: String,
    value: Config,
    category: &str,
) -> Result<()> {
    if table.contains_key(&name) {
        return Err(duplicate_error(category, &name));
    }
    table.insert(name, value);
    Ok(())
}

fn definition_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_yaml = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
