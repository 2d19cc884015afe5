//! Tree invariants checked over scripted mutation sequences

use pagecraft_editor::{Document, MutationError, NodePatch, Position};
use pagecraft_model::{IDGenerator, NodeKind, NodeSnapshot};
use std::collections::HashSet;

fn document() -> Document {
    Document::with_id_generator(IDGenerator::from_seed("t".to_string()))
}

fn collect_ids(nodes: &[NodeSnapshot], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.id.clone());
        collect_ids(node.children(), out);
    }
}

fn all_ids(doc: &Document) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids(&doc.snapshot(), &mut ids);
    ids
}

/// Every node appears exactly once and the arena holds nothing unreachable
fn assert_well_formed(doc: &Document) {
    let ids = all_ids(doc);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate id in tree: {:?}", ids);
    assert_eq!(ids.len(), doc.len(), "arena holds unreachable nodes");

    for id in &ids {
        match doc.parent(id) {
            Some(parent) => assert!(doc.children(parent).contains(id)),
            None => assert!(doc.roots().contains(id)),
        }
    }
}

#[test]
fn test_ids_stay_unique_across_operations() {
    let mut doc = document();
    let mut created = Vec::new();

    for kind in NodeKind::ALL {
        created.push(doc.add_node(kind, None, None).unwrap());
    }
    let columns = created[3].clone();
    for kind in [NodeKind::Button, NodeKind::Link] {
        created.push(doc.add_node(kind, Some(&columns), Some(0)).unwrap());
    }

    let unique: HashSet<&String> = created.iter().collect();
    assert_eq!(unique.len(), created.len());
    assert_eq!(doc.len(), 8 + 2 + 2);
    assert_well_formed(&doc);

    doc.move_node(&created[0], &columns, Position::Inside).unwrap();
    doc.move_node(&created[7], &created[1], Position::Before).unwrap();
    doc.remove_node(&created[2]).unwrap();
    assert_well_formed(&doc);
}

#[test]
fn test_add_at_index_is_clamped() {
    let mut doc = document();
    let first = doc.add_node(NodeKind::Heading, None, None).unwrap();
    let second = doc.add_node(NodeKind::Paragraph, None, Some(0)).unwrap();
    let third = doc.add_node(NodeKind::Divider, None, Some(99)).unwrap();

    assert_eq!(doc.roots(), &[second, first, third]);
}

#[test]
fn test_add_under_missing_parent_creates_nothing() {
    let mut doc = document();
    doc.add_node(NodeKind::Heading, None, None).unwrap();

    let err = doc
        .add_node(NodeKind::Paragraph, Some("ghost"), None)
        .unwrap_err();
    assert_eq!(err, MutationError::ParentNotFound("ghost".to_string()));
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_removal_cascades_to_descendants() {
    let mut doc = document();
    let outer = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let inner = doc.add_node(NodeKind::Columns, Some(&outer), None).unwrap();
    let leaf = doc.add_node(NodeKind::Button, Some(&inner), None).unwrap();
    let survivor = doc.add_node(NodeKind::Heading, None, None).unwrap();

    let before = doc.len();
    let removed = doc.remove_node(&outer).unwrap();

    assert_eq!(removed[0], outer);
    assert!(removed.contains(&inner));
    assert!(removed.contains(&leaf));
    assert_eq!(doc.len(), before - removed.len());
    for id in &removed {
        assert!(doc.node(id).is_none());
    }
    assert_eq!(doc.roots(), &[survivor]);
    assert_well_formed(&doc);
}

#[test]
fn test_selection_cleared_when_ancestor_removed() {
    let mut doc = document();
    let columns = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let cell = doc.children(&columns)[1].clone();

    doc.select_node(Some(&cell)).unwrap();
    assert_eq!(doc.selected_node().map(|n| n.content.as_str()), Some("Column 2"));

    doc.remove_node(&columns).unwrap();
    assert_eq!(doc.selected_id(), None);
    assert!(doc.selected_node().is_none());
}

#[test]
fn test_selection_survives_unrelated_removal() {
    let mut doc = document();
    let keep = doc.add_node(NodeKind::Heading, None, None).unwrap();
    let drop = doc.add_node(NodeKind::Paragraph, None, None).unwrap();

    doc.select_node(Some(&keep)).unwrap();
    doc.remove_node(&drop).unwrap();
    assert_eq!(doc.selected_id(), Some(keep.as_str()));
}

#[test]
fn test_selected_node_reflects_updates() {
    let mut doc = document();
    let heading = doc.add_node(NodeKind::Heading, None, None).unwrap();
    doc.select_node(Some(&heading)).unwrap();

    doc.update_node(&heading, NodePatch::content("Fresh")).unwrap();
    doc.update_node_style(&heading, "color", "red").unwrap();

    let selected = doc.selected_node().unwrap();
    assert_eq!(selected.content, "Fresh");
    assert_eq!(selected.styles.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_move_after_then_before_restores_order() {
    let mut doc = document();
    let a = doc.add_node(NodeKind::Heading, None, None).unwrap();
    let b = doc.add_node(NodeKind::Paragraph, None, None).unwrap();
    let c = doc.add_node(NodeKind::Divider, None, None).unwrap();
    let original = doc.roots().to_vec();

    doc.move_node(&a, &c, Position::After).unwrap();
    assert_eq!(doc.roots(), &[b.clone(), c.clone(), a.clone()]);

    doc.move_node(&a, &b, Position::Before).unwrap();
    assert_eq!(doc.roots(), original.as_slice());
    assert_well_formed(&doc);
}

#[test]
fn test_move_across_containers() {
    let mut doc = document();
    let left = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let right = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let cell = doc.children(&left)[0].clone();
    let anchor = doc.children(&right)[1].clone();

    doc.move_node(&cell, &anchor, Position::Before).unwrap();

    assert_eq!(doc.children(&left).len(), 1);
    assert_eq!(doc.children(&right).len(), 3);
    assert_eq!(doc.parent(&cell), Some(right.as_str()));
    assert_eq!(doc.index_in_parent(&cell), Some(1));
    assert_well_formed(&doc);
}

#[test]
fn test_move_to_missing_target_keeps_node_in_place() {
    let mut doc = document();
    let columns = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let cell = doc.children(&columns)[1].clone();
    let count = doc.len();

    for position in [Position::Before, Position::After, Position::Inside] {
        let err = doc.move_node(&cell, "ghost", position).unwrap_err();
        assert_eq!(err, MutationError::TargetNotFound("ghost".to_string()));
    }

    assert_eq!(doc.len(), count);
    assert_eq!(doc.parent(&cell), Some(columns.as_str()));
    assert_eq!(doc.index_in_parent(&cell), Some(1));
    assert_well_formed(&doc);
}

#[test]
fn test_move_into_own_subtree_is_rejected() {
    let mut doc = document();
    let outer = doc.add_node(NodeKind::Columns, None, None).unwrap();
    let inner = doc.add_node(NodeKind::Columns, Some(&outer), None).unwrap();
    let deep = doc.children(&inner)[0].clone();
    let snapshot = doc.snapshot();

    for (target, position) in [
        (&outer, Position::Inside),
        (&inner, Position::Inside),
        (&deep, Position::Inside),
        (&deep, Position::After),
        (&inner, Position::Before),
    ] {
        let err = doc.move_node(&outer, target, position).unwrap_err();
        assert!(matches!(err, MutationError::CycleDetected { .. }));
    }

    assert_eq!(doc.snapshot(), snapshot);
}

#[test]
fn test_move_before_self_is_noop() {
    let mut doc = document();
    let a = doc.add_node(NodeKind::Heading, None, None).unwrap();
    let b = doc.add_node(NodeKind::Paragraph, None, None).unwrap();

    assert!(!doc.move_node(&b, &b, Position::Before).unwrap());
    assert!(!doc.move_node(&a, &a, Position::After).unwrap());
    assert_eq!(doc.roots(), &[a, b]);
}

#[test]
fn test_inside_leaf_creates_children() {
    let mut doc = document();
    let paragraph = doc.add_node(NodeKind::Paragraph, None, None).unwrap();
    let button = doc.add_node(NodeKind::Button, None, None).unwrap();
    assert!(doc.node(&paragraph).unwrap().children.is_none());

    doc.move_node(&button, &paragraph, Position::Inside).unwrap();

    assert_eq!(doc.children(&paragraph), &[button]);
    assert_eq!(doc.roots(), &[paragraph]);
}

#[test]
fn test_style_update_merges() {
    let mut doc = document();
    let button = doc.add_node(NodeKind::Button, None, None).unwrap();
    let before = doc.node(&button).unwrap().styles.clone();

    doc.update_node_style(&button, "color", "black").unwrap();
    doc.update_node_style(&button, "letterSpacing", "1px").unwrap();

    let after = &doc.node(&button).unwrap().styles;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.get("color").map(String::as_str), Some("black"));
    assert_eq!(after.get("backgroundColor"), before.get("backgroundColor"));
}

#[test]
fn test_failed_operations_leave_tree_unchanged() {
    let mut doc = document();
    doc.add_node(NodeKind::Columns, None, None).unwrap();
    let snapshot = doc.snapshot();

    assert!(doc.update_node("ghost", NodePatch::content("x")).is_err());
    assert!(doc.update_node_style("ghost", "color", "red").is_err());
    assert!(doc.remove_node("ghost").is_err());
    assert!(doc.select_node(Some("ghost")).is_err());

    assert_eq!(doc.snapshot(), snapshot);
    assert_eq!(doc.selected_id(), None);
}
