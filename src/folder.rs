//! # Folder Jobs
//!
//! `com.cloudbees.hudson.plugins.folder.Folder`, the CloudBees Folder plugin's
//! job type. A folder carries a stock icon, its health metrics, the name of its
//! primary view and, when the job declares `views`, the expanded views.

use log::warn;

use crate::config::{get_sequence, lookup, render_value, Config};
use crate::error::Result;
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::registry::Registry;
use crate::views::build_views;
use crate::xml::XmlElement;

pub const FOLDER_CLASS: &str = "com.cloudbees.hudson.plugins.folder.Folder";
pub const STOCK_FOLDER_ICON: &str = "com.cloudbees.hudson.plugins.folder.icons.StockFolderIcon";

/// Health metric names accepted in `health-metrics`, with their classes.
pub const SUPPORTED_METRICS: &[(&str, &str)] = &[(
    "worst-child-health-metric",
    "com.cloudbees.hudson.plugins.folder.health.WorstChildHealthMetric",
)];

const PRIMARY_VIEW_FIELD: &[FieldMapping] =
    &[FieldMapping::new("primary-view", "primaryView", FieldDefault::Empty)];

fn health_metrics(config: &Config) -> Result<XmlElement> {
    let mut metrics = XmlElement::new("healthMetrics");
    for metric in get_sequence(config, "health-metrics").unwrap_or_default() {
        let name = render_value(metric)?;
        match SUPPORTED_METRICS.iter().find(|(key, _)| *key == name) {
            Some((_, class)) => metrics.push(XmlElement::new(*class)),
            None => warn!("Skipping unsupported folder health metric '{}'", name),
        }
    }
    Ok(metrics)
}

pub fn generate(registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut folder = XmlElement::new(FOLDER_CLASS);
    folder.push(XmlElement::new("icon").with_attr("class", STOCK_FOLDER_ICON));
    folder.push(health_metrics(config)?);
    convert_mapping_to_xml(&mut folder, config, PRIMARY_VIEW_FIELD, true)?;
    if lookup(config, "views").is_some() {
        folder.push(build_views(registry, config)?);
    }
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_mapping;

    #[test]
    fn test_folder_without_views() {
        let folder = generate(&Registry::default(), &parse_mapping("name: team").unwrap()).unwrap();
        assert_eq!(folder.child_names(), vec!["icon", "healthMetrics", "primaryView"]);
        assert_eq!(
            folder.to_xml_string().unwrap(),
            "<com.cloudbees.hudson.plugins.folder.Folder>\
             <icon class=\"com.cloudbees.hudson.plugins.folder.icons.StockFolderIcon\"/>\
             <healthMetrics/><primaryView/>\
             </com.cloudbees.hudson.plugins.folder.Folder>"
        );
    }

    #[test]
    fn test_unsupported_health_metrics_are_skipped() {
        testing_logger::setup();
        let config = parse_mapping(
            "health-metrics: [worst-child-health-metric, average-child-health-metric]",
        )
        .unwrap();
        let folder = generate(&Registry::default(), &config).unwrap();
        assert_eq!(
            folder.child("healthMetrics").unwrap().child_names(),
            vec!["com.cloudbees.hudson.plugins.folder.health.WorstChildHealthMetric"]
        );
        testing_logger::validate(|logs| {
            assert!(logs
                .iter()
                .any(|l| l.level == log::Level::Warn
                    && l.body.contains("average-child-health-metric")));
        });
    }

    #[test]
    fn test_folder_with_views() {
        let config = parse_mapping(
            r#"
name: team
primary-view: Services
views:
  - sublist:
      name: Services
      parent: folder
"#,
        )
        .unwrap();
        let folder = generate(&Registry::default(), &config).unwrap();
        assert_eq!(folder.child_text("primaryView"), Some("Services"));
        let views = folder.child("views").unwrap();
        assert_eq!(views.child_names(), vec!["hudson.model.ListView"]);
        assert_eq!(
            views.children[0].child("owner").and_then(|o| o.attr("class")),
            Some(FOLDER_CLASS)
        );
    }
}
