//! `BuildPipelineView` from the Build Pipeline plugin.

use crate::config::Config;
use crate::error::Result;
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::registry::Registry;
use crate::views::{properties_element, push_owner, FILTER_FIELDS};
use crate::xml::XmlElement;

pub const BUILD_PIPELINE_VIEW: &str =
    "au.com.centrumsystems.hudson.plugin.buildpipeline.BuildPipelineView";
pub const GRID_BUILDER: &str =
    "au.com.centrumsystems.hudson.plugin.buildpipeline.DownstreamProjectGridBuilder";

pub const CONSOLE_OUTPUT_LINK_STYLES: &[&str] = &["This Window", "New Window", "Light Box"];

const NAME_FIELD: &[FieldMapping] = &[FieldMapping::new("name", "name", FieldDefault::Required)];

const GRID_FIELDS: &[FieldMapping] =
    &[FieldMapping::new("first-job", "firstJob", FieldDefault::Empty)];

const DISPLAY_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("display-number-of-builds", "noOfDisplayedBuilds", FieldDefault::Int(10)),
    FieldMapping::new("build-view-title", "buildViewTitle", FieldDefault::Empty),
    FieldMapping::new(
        "console-output-link-style",
        "consoleOutputLinkStyle",
        FieldDefault::Str("Light Box"),
    )
    .one_of(CONSOLE_OUTPUT_LINK_STYLES),
    FieldMapping::new("css-url", "cssUrl", FieldDefault::Empty),
    FieldMapping::new("trigger-only-latest-job", "triggerOnlyLatestJob", FieldDefault::Bool(false)),
    FieldMapping::new(
        "always-allow-manual-trigger",
        "alwaysAllowManualTrigger",
        FieldDefault::Bool(false),
    ),
    FieldMapping::new("show-pipeline-parameters", "showPipelineParameters", FieldDefault::Bool(false)),
    FieldMapping::new(
        "show-pipeline-parameters-in-header",
        "showPipelineParametersInHeaders",
        FieldDefault::Bool(false),
    ),
    FieldMapping::new("start-with-parameters", "startsWithParameters", FieldDefault::Bool(false)),
    FieldMapping::new("refresh-frequency", "refreshFrequency", FieldDefault::Int(3)),
    FieldMapping::new(
        "show-pipeline-definition-in-headers",
        "showPipelineDefinitionHeader",
        FieldDefault::Bool(false),
    ),
];

pub fn generate(_registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = XmlElement::new(BUILD_PIPELINE_VIEW);
    push_owner(&mut view, config);
    convert_mapping_to_xml(&mut view, config, NAME_FIELD, true)?;
    convert_mapping_to_xml(&mut view, config, FILTER_FIELDS, true)?;
    view.push(properties_element());

    let grid = view.sub_element("gridBuilder");
    grid.set_attr("class", GRID_BUILDER);
    convert_mapping_to_xml(grid, config, GRID_FIELDS, true)?;

    convert_mapping_to_xml(&mut view, config, DISPLAY_FIELDS, true)?;
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_mapping;
    use crate::error::Error;

    #[test]
    fn test_build_pipeline_defaults() {
        let config = parse_mapping("name: Builds\nfirst-job: compile").unwrap();
        let view = generate(&Registry::default(), &config).unwrap();

        let grid = view.child("gridBuilder").unwrap();
        assert_eq!(grid.attr("class"), Some(GRID_BUILDER));
        assert_eq!(grid.child_text("firstJob"), Some("compile"));

        assert_eq!(view.child_text("noOfDisplayedBuilds"), Some("10"));
        assert_eq!(view.child_text("consoleOutputLinkStyle"), Some("Light Box"));
        assert_eq!(view.child_text("refreshFrequency"), Some("3"));
        assert_eq!(view.child_text("buildViewTitle"), None);
        assert_eq!(view.child_names().last(), Some(&"showPipelineDefinitionHeader"));
    }

    #[test]
    fn test_console_output_link_style_is_validated() {
        let config = parse_mapping("name: Builds\nconsole-output-link-style: Popup").unwrap();
        match generate(&Registry::default(), &config).unwrap_err() {
            Error::InvalidEnumValue { field, value, allowed } => {
                assert_eq!(field, "console-output-link-style");
                assert_eq!(value, "Popup");
                assert_eq!(allowed.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_accepted_console_output_link_style() {
        let config = parse_mapping("name: Builds\nconsole-output-link-style: New Window").unwrap();
        let view = generate(&Registry::default(), &config).unwrap();
        assert_eq!(view.child_text("consoleOutputLinkStyle"), Some("New Window"));
    }
}
