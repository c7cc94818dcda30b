//! # XML Element Tree
//!
//! Generators build their output as a small owned tree of [`XmlElement`]s:
//! named elements with ordered attributes, optional text and ordered
//! children. Child order is significant everywhere in Jenkins configuration
//! (filter evaluation order, column display order), so nothing here ever
//! reorders nodes.
//!
//! Serialization goes through `xot`, which takes care of escaping text and
//! attribute values.

use crate::error::{Error, Result};
use xot::Xot;

/// The declaration Jenkins expects at the top of every configuration file.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// A single element of the generated configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no attributes, text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style: set (or replace) an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style: set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, replacing an existing value with the same key.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Append a fully built child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Append a new empty child element and return it for further building.
    pub fn sub_element(&mut self, name: impl Into<String>) -> &mut XmlElement {
        self.children.push(XmlElement::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a child element holding `text`.
    pub fn text_element(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.children.push(XmlElement::new(name).with_text(text));
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given element name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// Names of the direct children, in document order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    /// Serialize this element (without an XML declaration).
    pub fn to_xml_string(&self) -> Result<String> {
        let mut xot = Xot::new();
        let element = self.build(&mut xot)?;
        xot.to_string(element).map_err(xml_error)
    }

    /// Serialize this element as a complete Jenkins configuration document.
    pub fn to_document(&self) -> Result<String> {
        Ok(format!("{}\n{}\n", XML_DECLARATION, self.to_xml_string()?))
    }

    fn build(&self, xot: &mut Xot) -> Result<xot::Node> {
        let name = xot.add_name(&self.name);
        let node = xot.new_element(name);
        for (key, value) in &self.attributes {
            let attr = xot.add_name(key);
            xot.attributes_mut(node).insert(attr, value.clone());
        }
        if let Some(text) = &self.text {
            if !text.is_empty() {
                xot.append_text(node, text).map_err(xml_error)?;
            }
        }
        for child in &self.children {
            let child_node = child.build(xot)?;
            xot.append(node, child_node).map_err(xml_error)?;
        }
        Ok(node)
    }
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml {
        message: err.to_string(),
    }
}
