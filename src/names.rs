//! Job name ordering for list views.
//!
//! A list view stores its explicit job list under a
//! `hudson.util.CaseInsensitiveComparator`, and Jenkins expects the entries to
//! already be in that comparator's order.

use crate::xml::XmlElement;

/// Comparator class recorded in front of the job names.
pub const CASE_INSENSITIVE_COMPARATOR: &str = "hudson.util.CaseInsensitiveComparator";

/// Sort job names case-insensitively. Names that compare equal once folded
/// keep their input order.
pub fn sort_job_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    sorted.sort_by_cached_key(|name| name.to_lowercase());
    sorted
}

/// Build the `<jobNames>` element: the comparator followed by one `<string>`
/// per job, sorted.
pub fn job_names_element<S: AsRef<str>>(names: &[S]) -> XmlElement {
    let mut element = XmlElement::new("jobNames");
    element.push(XmlElement::new("comparator").with_attr("class", CASE_INSENSITIVE_COMPARATOR));
    for name in sort_job_names(names) {
        element.text_element("string", name);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_case_insensitive() {
        assert_eq!(sort_job_names(&["Zebra", "apple"]), vec!["apple", "Zebra"]);
        assert_eq!(sort_job_names(&["b-job", "A-job"]), vec!["A-job", "b-job"]);
    }

    #[test]
    fn test_sort_is_stable_for_folded_duplicates() {
        assert_eq!(
            sort_job_names(&["Deploy", "build", "deploy", "DEPLOY"]),
            vec!["build", "Deploy", "deploy", "DEPLOY"]
        );
    }

    #[test]
    fn test_sort_empty() {
        let empty: [&str; 0] = [];
        assert!(sort_job_names(&empty).is_empty());
    }

    #[test]
    fn test_job_names_element_serializes_sorted() {
        let element = job_names_element(&["b-job", "A-job"]);
        assert_eq!(element.child_names(), vec!["comparator", "string", "string"]);
        assert_eq!(
            element.child("comparator").unwrap().attr("class"),
            Some(CASE_INSENSITIVE_COMPARATOR)
        );
        let xml = element.to_xml_string().unwrap();
        assert!(xml.contains("<string>A-job</string><string>b-job</string>"));
    }
}
