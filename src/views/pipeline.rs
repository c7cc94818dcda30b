//! # Delivery Pipeline Views
//!
//! Generators for the two views of the Delivery Pipeline plugin:
//! `se.diabol.jenkins.workflow.WorkflowPipelineView` (`workflow_pipeline`) and
//! `se.diabol.jenkins.pipeline.DeliveryPipelineView` (`delivery_pipeline`).
//!
//! Both list their pipelines as `components`, each with a `name` and the job
//! starting the pipeline, and both accept a `sorting` mode.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::config::{get_sequence, get_str, lookup, render_value, Config};
use crate::error::{Error, Result};
use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
use crate::registry::Registry;
use crate::views::{mapping_list, properties_element, push_owner, FILTER_FIELDS};
use crate::xml::XmlElement;

pub const WORKFLOW_PIPELINE_VIEW: &str = "se.diabol.jenkins.workflow.WorkflowPipelineView";
pub const WORKFLOW_COMPONENT_SPEC: &str =
    "se.diabol.jenkins.workflow.WorkflowPipelineView_-ComponentSpec";
pub const DELIVERY_PIPELINE_VIEW: &str = "se.diabol.jenkins.pipeline.DeliveryPipelineView";
pub const DELIVERY_COMPONENT_SPEC: &str =
    "se.diabol.jenkins.pipeline.DeliveryPipelineView_-ComponentSpec";
pub const REGEXP_SPEC: &str = "se.diabol.jenkins.pipeline.DeliveryPipelineView_-RegExpSpec";

const NAME_FIELD: &[FieldMapping] = &[FieldMapping::new("name", "name", FieldDefault::Required)];

const WORKFLOW_COMPONENT_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("name", "name", FieldDefault::Empty),
    FieldMapping::new("job", "job", FieldDefault::Empty),
];

const DELIVERY_COMPONENT_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("name", "name", FieldDefault::Empty),
    FieldMapping::new("first-job", "firstJob", FieldDefault::Empty),
];

const PIPELINES_FIELD: FieldMapping =
    FieldMapping::new("number-of-pipelines", "noOfPipelines", FieldDefault::Int(3));
const COLUMNS_FIELD: FieldMapping =
    FieldMapping::new("number-of-columns", "noOfColumns", FieldDefault::Int(1));
const UPDATE_INTERVAL_FIELD: FieldMapping =
    FieldMapping::new("update-interval", "updateInterval", FieldDefault::Int(1));
const SHOW_CHANGES_FIELD: FieldMapping =
    FieldMapping::new("show-changes", "showChanges", FieldDefault::Bool(false));
const PIPELINE_START_FIELD: FieldMapping =
    FieldMapping::new("allow-pipeline-start", "allowPipelineStart", FieldDefault::Bool(false));

/// How the pipelines of a view are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,
    Name,
    LatestActivity,
}

impl SortMode {
    pub const CHOICES: &'static [&'static str] = &["none", "Name", "LatestActivity"];

    /// Read `sorting`, defaulting to [`SortMode::None`].
    pub fn from_config(config: &Config) -> Result<SortMode> {
        match lookup(config, "sorting") {
            Some(value) => render_value(value)?.parse(),
            None => Ok(SortMode::None),
        }
    }

    /// Text of the `<sorting>` element.
    pub fn to_xml_text(self) -> String {
        match self {
            SortMode::None => "none".to_string(),
            other => format!("se.diabol.jenkins.pipeline.sort.{}Comparator", other),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::None => "none",
            SortMode::Name => "Name",
            SortMode::LatestActivity => "LatestActivity",
        };
        f.write_str(name)
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(SortMode::None),
            "Name" => Ok(SortMode::Name),
            "LatestActivity" => Ok(SortMode::LatestActivity),
            other => Err(Error::InvalidEnumValue {
                field: "sorting".to_string(),
                value: other.to_string(),
                allowed: SortMode::CHOICES.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

/// Owner, name, filters and properties, common to both pipeline views.
fn pipeline_header(class: &str, config: &Config) -> Result<XmlElement> {
    let mut view = XmlElement::new(class);
    push_owner(&mut view, config);
    convert_mapping_to_xml(&mut view, config, NAME_FIELD, true)?;
    convert_mapping_to_xml(&mut view, config, FILTER_FIELDS, true)?;
    view.push(properties_element());
    Ok(view)
}

fn component_specs(config: &Config, class: &str, fields: &[FieldMapping]) -> Result<XmlElement> {
    let mut specs = XmlElement::new("componentSpecs");
    for component in mapping_list(config, "components")? {
        debug!(
            "Adding pipeline component '{}'",
            get_str(component, "name").unwrap_or_default()
        );
        let spec = specs.sub_element(class);
        convert_mapping_to_xml(spec, component, fields, false)?;
    }
    Ok(specs)
}

fn push_field(view: &mut XmlElement, config: &Config, field: FieldMapping) -> Result<()> {
    convert_mapping_to_xml(view, config, &[field], true)
}

fn push_sorting(view: &mut XmlElement, config: &Config) -> Result<()> {
    let sorting = SortMode::from_config(config)?;
    view.text_element("sorting", sorting.to_xml_text());
    Ok(())
}

/// Generate a `WorkflowPipelineView`.
pub fn generate_workflow(_registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = pipeline_header(WORKFLOW_PIPELINE_VIEW, config)?;
    view.push(component_specs(
        config,
        WORKFLOW_COMPONENT_SPEC,
        WORKFLOW_COMPONENT_FIELDS,
    )?);
    push_field(&mut view, config, PIPELINES_FIELD)?;
    push_field(&mut view, config, COLUMNS_FIELD)?;
    push_sorting(&mut view, config)?;
    push_field(&mut view, config, UPDATE_INTERVAL_FIELD)?;
    push_field(&mut view, config, SHOW_CHANGES_FIELD)?;
    push_field(&mut view, config, PIPELINE_START_FIELD)?;
    Ok(view)
}

const DELIVERY_DISPLAY_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("show-avatars", "showAvatars", FieldDefault::Bool(false)),
    UPDATE_INTERVAL_FIELD,
    SHOW_CHANGES_FIELD,
    FieldMapping::new("allow-manual-triggers", "allowManualTriggers", FieldDefault::Bool(false)),
    FieldMapping::new("show-total-buildtime", "showTotalBuildTime", FieldDefault::Bool(false)),
    FieldMapping::new("allow-rebuild", "allowRebuild", FieldDefault::Bool(false)),
    PIPELINE_START_FIELD,
    FieldMapping::new("show-description", "showDescription", FieldDefault::Bool(false)),
    FieldMapping::new("show-promotions", "showPromotions", FieldDefault::Bool(false)),
];

const DELIVERY_CSS_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("fullscreen-css-url", "fullScreenCss", FieldDefault::Empty),
    FieldMapping::new("css-url", "embeddedCss", FieldDefault::Empty),
];

/// Generate a `DeliveryPipelineView`.
pub fn generate_delivery(_registry: &Registry<'_>, config: &Config) -> Result<XmlElement> {
    let mut view = pipeline_header(DELIVERY_PIPELINE_VIEW, config)?;
    view.push(component_specs(
        config,
        DELIVERY_COMPONENT_SPEC,
        DELIVERY_COMPONENT_FIELDS,
    )?);
    push_field(&mut view, config, PIPELINES_FIELD)?;
    push_field(
        &mut view,
        config,
        FieldMapping::new(
            "show-aggregated-pipeline",
            "showAggregatedPipeline",
            FieldDefault::Bool(false),
        ),
    )?;
    push_field(&mut view, config, COLUMNS_FIELD)?;
    push_sorting(&mut view, config)?;
    convert_mapping_to_xml(&mut view, config, DELIVERY_DISPLAY_FIELDS, true)?;

    let regexps = view.sub_element("regexpFirstJobs");
    for regexp in get_sequence(config, "regexp-first-jobs").unwrap_or_default() {
        regexps
            .sub_element(REGEXP_SPEC)
            .text_element("regexp", render_value(regexp)?);
    }

    convert_mapping_to_xml(&mut view, config, DELIVERY_CSS_FIELDS, true)?;
    Ok(view)
}
