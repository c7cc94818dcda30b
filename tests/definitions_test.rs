//! Definition file tests using datatest-stable for test data discovery
//!
//! Every YAML file under `tests/testdata/definitions` must load, generate at
//! least one unit, and serialize each unit into a well-formed document.

use jenkins_job_addons::definitions::Definitions;
use jenkins_job_addons::xml::XML_DECLARATION;
use std::path::Path;

fn test_definitions_generate(path: &Path) -> datatest_stable::Result<()> {
    let definitions = Definitions::load_paths(&[path])
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

    let units = definitions
        .generate(None)
        .map_err(|e| format!("Failed to generate {}: {}", path.display(), e))?;

    assert!(
        !units.is_empty(),
        "{} should define at least one job or view",
        path.display()
    );

    for unit in &units {
        assert!(!unit.name.is_empty(), "Unit in {} has no name", path.display());

        let document = unit.to_document()?;
        assert!(
            document.starts_with(XML_DECLARATION),
            "Document for '{}' is missing the XML declaration",
            unit.name
        );

        let body = unit.xml.to_xml_string()?;
        let mut xot = xot::Xot::new();
        xot.parse(&body)
            .map_err(|e| format!("Output for '{}' is not well-formed: {:?}", unit.name, e))?;
        assert!(
            body.starts_with(&format!("<{}", unit.xml.name)),
            "Output for '{}' does not start with its root element",
            unit.name
        );
    }

    println!(
        "Generated {} unit(s) from {}",
        units.len(),
        path.display()
    );
    Ok(())
}

// Register datatest harness to discover and run tests on all YAML files in testdata directory
datatest_stable::harness!(
    test_definitions_generate,
    "tests/testdata/definitions",
    r".*\.yaml$"
);
