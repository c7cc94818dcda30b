//! # Generator Registry
//!
//! Routes a view kind (`sublist`, `nested`, ...) or a project type (`folder`,
//! `nested_root`) to the function that generates it. The registry also owns
//! the [`TemplateResolver`] so that generators embedding child views (nested
//! views, folders, the nested root) can expand and dispatch them.

use log::debug;
use std::cell::Cell;

use crate::config::{get_str, Config};
use crate::error::{Error, Result};
use crate::folder;
use crate::template::{NoTemplates, TemplateResolver};
use crate::views;
use crate::xml::XmlElement;

/// Signature shared by every view and project generator.
pub type Generator = fn(&Registry<'_>, &Config) -> Result<XmlElement>;

/// Project type used when a job does not declare `project-type`.
pub const DEFAULT_PROJECT_TYPE: &str = "folder";

/// Deepest allowed chain of views containing views.
pub const MAX_VIEW_DEPTH: usize = 32;

/// Named dispatch of view and project generators.
pub struct Registry<'a> {
    resolver: &'a dyn TemplateResolver,
    views: Vec<(&'static str, Generator)>,
    projects: Vec<(&'static str, Generator)>,
    depth: Cell<usize>,
}

impl<'a> Registry<'a> {
    /// Create a registry with every built-in generator registered.
    pub fn new(resolver: &'a dyn TemplateResolver) -> Self {
        Self {
            resolver,
            views: vec![
                ("all", views::all::generate as Generator),
                ("build_pipeline", views::build_pipeline::generate as Generator),
                ("delivery_pipeline", views::pipeline::generate_delivery as Generator),
                ("workflow_pipeline", views::pipeline::generate_workflow as Generator),
                ("nested", views::nested::generate as Generator),
                ("sublist", views::list::generate as Generator),
            ],
            projects: vec![
                ("folder", folder::generate as Generator),
                ("nested_root", views::nested::generate_root as Generator),
            ],
            depth: Cell::new(0),
        }
    }

    /// Register (or replace) a view generator.
    pub fn register_view(&mut self, kind: &'static str, generator: Generator) {
        register(&mut self.views, kind, generator);
    }

    /// Register (or replace) a project generator.
    pub fn register_project(&mut self, kind: &'static str, generator: Generator) {
        register(&mut self.projects, kind, generator);
    }

    pub fn resolver(&self) -> &dyn TemplateResolver {
        self.resolver
    }

    /// Names of the registered view kinds.
    pub fn view_kinds(&self) -> Vec<&'static str> {
        self.views.iter().map(|(kind, _)| *kind).collect()
    }

    /// Names of the registered project types.
    pub fn project_types(&self) -> Vec<&'static str> {
        self.projects.iter().map(|(kind, _)| *kind).collect()
    }

    /// Run `build` one `<views>` level deeper, failing once the chain of
    /// views containing views exceeds [`MAX_VIEW_DEPTH`].
    pub(crate) fn descend<T>(&self, build: impl FnOnce() -> Result<T>) -> Result<T> {
        let depth = self.depth.get();
        if depth >= MAX_VIEW_DEPTH {
            return Err(Error::ConfigParse {
                message: format!("Views nested deeper than {} levels", MAX_VIEW_DEPTH),
                hint: Some("Check for a view template that contains itself".to_string()),
            });
        }
        self.depth.set(depth + 1);
        let result = build();
        self.depth.set(depth);
        result
    }

    /// Generate the view `kind` from `config`.
    pub fn dispatch_view(&self, kind: &str, config: &Config) -> Result<XmlElement> {
        debug!(
            "Dispatching view '{}' as {}",
            get_str(config, "name").unwrap_or("<unnamed>"),
            kind
        );
        let generator = find(&self.views, kind)?;
        generator(self, config)
    }

    /// Generate a job, dispatching on its `project-type`.
    pub fn generate_project(&self, config: &Config) -> Result<XmlElement> {
        let kind = get_str(config, "project-type").unwrap_or(DEFAULT_PROJECT_TYPE);
        debug!(
            "Generating job '{}' as {}",
            get_str(config, "name").unwrap_or("<unnamed>"),
            kind
        );
        let generator = find(&self.projects, kind)?;
        generator(self, config)
    }
}

impl Default for Registry<'static> {
    fn default() -> Self {
        Registry::new(&NoTemplates)
    }
}

fn register(table: &mut Vec<(&'static str, Generator)>, kind: &'static str, generator: Generator) {
    match table.iter_mut().find(|(k, _)| *k == kind) {
        Some(slot) => slot.1 = generator,
        None => table.push((kind, generator)),
    }
}

fn find(table: &[(&'static str, Generator)], kind: &str) -> Result<Generator> {
    table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, generator)| *generator)
        .ok_or_else(|| Error::UnknownGenerator {
            kind: kind.to_string(),
        })
}
