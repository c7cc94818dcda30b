//! # jenkins-job-addons
//!
//! Generates Jenkins configuration XML for folders and views from declarative
//! YAML configuration. It covers the view types of the Nested View, Delivery
//! Pipeline, Build Pipeline and View Job Filters plugins, plus CloudBees
//! folders. The library is used by the `jenkins-job-addons` command-line tool
//! but every generator can be called directly with a configuration mapping.
//!
//! ## Quick Example
//!
//! ```
//! use jenkins_job_addons::config::parse_mapping;
//! use jenkins_job_addons::registry::Registry;
//!
//! let config = parse_mapping(r#"
//! name: Services
//! job-name: [web-deploy, Api-build]
//! job-filters: [most-recent]
//! columns: [status, job]
//! "#).unwrap();
//!
//! let registry = Registry::default();
//! let view = registry.dispatch_view("sublist", &config).unwrap();
//! assert_eq!(view.name, "hudson.model.ListView");
//!
//! let xml = view.to_xml_string().unwrap();
//! assert!(xml.contains("<string>Api-build</string><string>web-deploy</string>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Field mapping (`mapping`)**: declarative tables of YAML key, XML tag and
//!   default, applied in order to a configuration mapping.
//! - **Job filters (`filters`)** and **columns (`columns`)**: the closed sets of
//!   filter and column kinds a list view accepts, each tied to its Java class.
//! - **Views (`views`)** and **folders (`folder`)**: one generator per Jenkins
//!   view type or job type, routed by name through the `registry`.
//! - **Templates (`template`)**: `views:` lists may reference view templates
//!   whose `{param}` placeholders are filled from the referencing entry. The
//!   generators reach templates and defaults through the `TemplateResolver`
//!   trait.
//! - **Definitions (`definitions`)**: the YAML file format the CLI reads, which
//!   implements `TemplateResolver`.

pub mod columns;
pub mod config;
pub mod definitions;
pub mod error;
pub mod filters;
pub mod folder;
pub mod mapping;
pub mod names;
pub mod registry;
pub mod template;
pub mod views;
pub mod xml;

#[cfg(test)]
mod names_proptest;
