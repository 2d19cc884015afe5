//! Per-kind default content, styles and props used when a node is created.

use crate::node::{NodeKind, PropMap, StyleMap};
use serde_json::Value;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x200";

pub fn default_content(kind: NodeKind) -> String {
    match kind {
        NodeKind::Heading => "Heading",
        NodeKind::Paragraph => "Enter your text here",
        NodeKind::Image => PLACEHOLDER_IMAGE_URL,
        NodeKind::List => "Item 1\nItem 2\nItem 3",
        NodeKind::Button => "Button",
        NodeKind::Link => "Link",
        NodeKind::Divider | NodeKind::Columns => "",
    }
    .to_string()
}

pub fn default_styles(kind: NodeKind) -> StyleMap {
    let mut styles = style_map(&[("padding", "1rem"), ("margin", "0.5rem")]);

    let extra: &[(&str, &str)] = match kind {
        NodeKind::Heading => &[("fontSize", "2rem"), ("fontWeight", "bold")],
        NodeKind::Paragraph => &[("fontSize", "1rem")],
        NodeKind::Image => &[("width", "100%"), ("maxWidth", "300px")],
        NodeKind::Columns => &[("display", "flex"), ("gap", "1rem")],
        NodeKind::Button => &[
            ("backgroundColor", "#4F46E5"),
            ("color", "white"),
            ("padding", "0.5rem 1rem"),
            ("borderRadius", "0.25rem"),
        ],
        NodeKind::Divider => &[("borderTop", "1px solid #E5E7EB"), ("margin", "1rem 0")],
        NodeKind::List | NodeKind::Link => &[],
    };

    for (key, value) in extra {
        styles.insert((*key).to_string(), (*value).to_string());
    }
    styles
}

pub fn default_props(kind: NodeKind) -> PropMap {
    let mut props = PropMap::new();
    match kind {
        NodeKind::Image => {
            props.insert("alt".to_string(), Value::from("Image description"));
        }
        NodeKind::List => {
            props.insert("ordered".to_string(), Value::Bool(false));
        }
        NodeKind::Columns => {
            props.insert("columns".to_string(), Value::from(2));
        }
        NodeKind::Link => {
            props.insert("url".to_string(), Value::from("#"));
        }
        _ => {}
    }
    props
}

/// Content and styles of the paragraphs synthesized inside a new columns node
pub fn column_cells() -> [(String, StyleMap); 2] {
    let styles = style_map(&[("padding", "1rem")]);
    [
        ("Column 1".to_string(), styles.clone()),
        ("Column 2".to_string(), styles),
    ]
}

fn style_map(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
