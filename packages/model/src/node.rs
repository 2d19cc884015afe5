use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque node identifier
pub type NodeId = String;

/// Style property name → value. Sorted so exports are deterministic.
pub type StyleMap = BTreeMap<String, String>;

/// Kind-specific flags (`ordered`, `alt`, `url`, ...)
pub type PropMap = BTreeMap<String, Value>;

/// Closed set of content block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Heading,
    Paragraph,
    Image,
    Columns,
    List,
    Button,
    Divider,
    Link,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Heading,
        NodeKind::Paragraph,
        NodeKind::Image,
        NodeKind::Columns,
        NodeKind::List,
        NodeKind::Button,
        NodeKind::Divider,
        NodeKind::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Image => "image",
            NodeKind::Columns => "columns",
            NodeKind::List => "list",
            NodeKind::Button => "button",
            NodeKind::Divider => "divider",
            NodeKind::Link => "link",
        }
    }

    /// Kinds that are created with a children sequence
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Columns)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown node kind: {}", s))
    }
}

/// A content node as stored in the document arena.
///
/// `children` holds child ids, not nodes. `None` means the node has never
/// been given children; `Some(vec![])` is an empty container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub content: String,
    #[serde(default)]
    pub styles: StyleMap,
    #[serde(default)]
    pub props: PropMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeId>>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            content: String::new(),
            styles: StyleMap::new(),
            props: PropMap::new(),
            children: None,
        }
    }

    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Deep, owned copy of a node and its subtree.
///
/// Export compilers only ever see snapshots, never the live arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub content: String,
    #[serde(default)]
    pub styles: StyleMap,
    #[serde(default)]
    pub props: PropMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSnapshot>>,
}

impl NodeSnapshot {
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn children(&self) -> &[NodeSnapshot] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(NodeSnapshot::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("section".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NodeKind::Columns).unwrap();
        assert_eq!(json, "\"columns\"");
    }

    #[test]
    fn test_snapshot_count_includes_descendants() {
        let leaf = |id: &str| NodeSnapshot {
            id: id.to_string(),
            kind: NodeKind::Paragraph,
            content: String::new(),
            styles: StyleMap::new(),
            props: PropMap::new(),
            children: None,
        };
        let mut columns = leaf("c");
        columns.kind = NodeKind::Columns;
        columns.children = Some(vec![leaf("a"), leaf("b")]);

        assert_eq!(columns.count(), 3);
        assert_eq!(leaf("x").count(), 1);
    }

    #[test]
    fn test_missing_children_is_not_serialized() {
        let node = Node::new("n-1".to_string(), NodeKind::Divider);
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("children").is_none());
    }
}
