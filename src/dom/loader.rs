//! MusicXML loading layer
//!
//! Parses MusicXML 3.x partwise documents with roxmltree and converts them
//! into the mutable [`ScoreTree`] the decorator works on. Comments and
//! processing instructions are dropped; only elements, their attributes and
//! their text content survive the conversion.

use crate::dom::{NodeId, ScoreTree};
use thiserror::Error;

/// Fatal loading errors
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// XML is malformed (not well-formed)
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// MusicXML format not supported (e.g., timewise instead of partwise)
    #[error("Unsupported MusicXML format: {0}")]
    UnsupportedFormat(String),
}

/// Parse MusicXML text into a [`ScoreTree`].
///
/// The root element must be `score-partwise`; timewise scores are rejected.
pub fn load_musicxml(xml: &str) -> Result<ScoreTree, ParseError> {
    // Strip DOCTYPE declarations (roxmltree rejects DTDs for security)
    let xml_without_dtd: String = if xml.contains("<!DOCTYPE") {
        xml.lines()
            .filter(|line| !line.trim_start().starts_with("<!DOCTYPE"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        xml.to_string()
    };

    let doc = roxmltree::Document::parse(&xml_without_dtd)
        .map_err(|e| ParseError::InvalidXml(format!("XML parse error: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "score-partwise" {
        return Err(ParseError::UnsupportedFormat(format!(
            "Expected score-partwise, found {}",
            root.tag_name().name()
        )));
    }

    let mut tree = ScoreTree::with_root(root.tag_name().name());
    let root_id = tree.root();
    copy_attributes_and_text(&mut tree, root_id, &root);
    for child in root.children().filter(|n| n.is_element()) {
        copy_element(&mut tree, root_id, &child);
    }
    Ok(tree)
}

fn copy_element(tree: &mut ScoreTree, parent: NodeId, node: &roxmltree::Node) {
    let id = tree.add_child(parent, node.tag_name().name());
    copy_attributes_and_text(tree, id, node);
    for child in node.children().filter(|n| n.is_element()) {
        copy_element(tree, id, &child);
    }
}

fn copy_attributes_and_text(tree: &mut ScoreTree, id: NodeId, node: &roxmltree::Node) {
    for attr in node.attributes() {
        tree.set_attribute(id, attr.name(), attr.value());
    }
    if let Some(text) = node.text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            tree.set_text(id, trimmed);
        }
    }
}
