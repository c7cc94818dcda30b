//! Property-based tests for job name sorting and field mapping.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::config::Config;
    use crate::mapping::{convert_mapping_to_xml, FieldDefault, FieldMapping};
    use crate::names::{job_names_element, sort_job_names};
    use crate::xml::XmlElement;
    use proptest::prelude::*;
    use serde_yaml::Value;

    // ============================================================================
    // sort_job_names property tests
    // ============================================================================

    proptest! {
        /// Property: sorting an already sorted list changes nothing
        #[test]
        fn sort_job_names_is_idempotent(names in prop::collection::vec("[a-zA-Z0-9_-]{0,12}", 0..20)) {
            let once = sort_job_names(&names);
            let twice = sort_job_names(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: the output is a permutation of the input
        #[test]
        fn sort_job_names_is_a_permutation(names in prop::collection::vec("[a-zA-Z]{1,8}", 0..20)) {
            let mut sorted = sort_job_names(&names);
            let mut input = names.clone();
            sorted.sort();
            input.sort();
            prop_assert_eq!(sorted, input);
        }

        /// Property: adjacent names are ordered by their lowercase form
        #[test]
        fn sort_job_names_orders_by_lowercase(names in prop::collection::vec("[a-zA-Z]{1,8}", 0..20)) {
            let sorted = sort_job_names(&names);
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
            }
        }

        /// Property: case changes do not affect the folded order
        #[test]
        fn sort_job_names_ignores_case(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let upper: Vec<String> = names.iter().map(|n| n.to_uppercase()).collect();
            let lower_sorted: Vec<String> = sort_job_names(&names);
            let upper_sorted: Vec<String> = sort_job_names(&upper)
                .into_iter()
                .map(|n| n.to_lowercase())
                .collect();
            prop_assert_eq!(lower_sorted, upper_sorted);
        }

        /// Property: the element holds the comparator plus one string per name
        #[test]
        fn job_names_element_has_one_string_per_name(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let element = job_names_element(&names);
            prop_assert_eq!(element.children.len(), names.len() + 1);
            prop_assert_eq!(element.children[0].name.as_str(), "comparator");
        }
    }

    // ============================================================================
    // convert_mapping_to_xml property tests
    // ============================================================================

    const FIELDS: &[FieldMapping] = &[
        FieldMapping::new("name", "name", FieldDefault::Required),
        FieldMapping::new("regex", "includeRegex", FieldDefault::Str("")),
        FieldMapping::new("amount", "amount", FieldDefault::Int(0)),
    ];

    proptest! {
        /// Property: with every key present, each value is reproduced verbatim in table order
        #[test]
        fn present_values_are_reproduced(
            name in "[a-zA-Z0-9 ._-]{1,16}",
            regex in "[a-z.*]{0,10}",
            amount in 0i64..10_000,
        ) {
            let mut config = Config::new();
            config.insert(Value::from("amount"), Value::from(amount));
            config.insert(Value::from("regex"), Value::from(regex.clone()));
            config.insert(Value::from("name"), Value::from(name.clone()));

            let mut parent = XmlElement::new("view");
            convert_mapping_to_xml(&mut parent, &config, FIELDS, true).unwrap();

            prop_assert_eq!(parent.child_names(), vec!["name", "includeRegex", "amount"]);
            prop_assert_eq!(parent.child_text("name"), Some(name.as_str()));
            prop_assert_eq!(parent.children[1].text.as_deref().unwrap_or(""), regex.as_str());
            let amount_text = amount.to_string();
            prop_assert_eq!(parent.child_text("amount"), Some(amount_text.as_str()));
        }

        /// Property: booleans are always rendered in lowercase
        #[test]
        fn booleans_render_lowercase(flag in any::<bool>()) {
            let mut config = Config::new();
            config.insert(Value::from("name"), Value::from(flag));
            let mut parent = XmlElement::new("view");
            convert_mapping_to_xml(&mut parent, &config, FIELDS, true).unwrap();
            let expected = if flag { "true" } else { "false" };
            prop_assert_eq!(parent.child_text("name"), Some(expected));
        }
    }
}
