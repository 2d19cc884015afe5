use crate::{compile_to_react, CompileError, CompileOptions};
use pagecraft_editor::{Document, NodePatch, Position};
use pagecraft_model::{IDGenerator, NodeKind};
use serde_json::json;

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn document() -> Document {
    Document::with_id_generator(IDGenerator::from_seed("n".to_string()))
}

#[test]
fn test_empty_component() {
    let result = compile_to_react(&[], CompileOptions::default()).expect("Failed to compile");

    println!("Generated code:\n{}", result);

    assert!(result.starts_with("import React from \"react\";\n"));
    assert!(result.contains("const Website = () => ("));
    assert!(result.contains("<div className=\"website-container\">"));
    assert!(result.trim_end().ends_with("export default Website;"));
}

#[test]
fn test_heading_style_object() {
    let mut doc = document();
    doc.add_node(NodeKind::Heading, None, None).unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();

    println!("Generated code:\n{}", result);

    assert!(result.contains(
        "<h2 style={{ fontSize: \"2rem\", fontWeight: \"bold\", margin: \"0.5rem\", padding: \"1rem\" }}>Heading</h2>"
    ));
}

#[test]
fn test_kebab_case_style_keys_are_camel_cased() {
    let mut doc = document();
    let button = doc.add_node(NodeKind::Button, None, None).unwrap();
    doc.update_node_style(&button, "text-align", "center").unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();

    assert!(result.contains("textAlign: \"center\""));
    assert!(!result.contains("text-align"));
}

#[test]
fn test_columns_and_moved_child() {
    let mut doc = document();
    let heading = doc.add_node(NodeKind::Heading, None, None).unwrap();
    let columns = doc.add_node(NodeKind::Columns, None, None).unwrap();
    doc.move_node(&heading, &columns, Position::Inside).unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();

    println!("Generated code:\n{}", result);

    assert_eq!(result.matches("<div style={{ flex: 1 }}>").count(), 3);
    let normalized = normalize_whitespace(&result);
    assert!(normalized.contains("display: \"flex\""));
    assert!(normalized.find("Column 2").unwrap() < normalized.find(">Heading<").unwrap());
}

#[test]
fn test_list_and_ordered_prop() {
    let mut doc = document();
    let list = doc.add_node(NodeKind::List, None, None).unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();
    assert!(result.contains("<ul"));
    assert!(result.contains("<li>Item 2</li>"));

    let mut props = doc.node(&list).unwrap().props.clone();
    props.insert("ordered".to_string(), json!(1));
    doc.update_node(&list, NodePatch::props(props)).unwrap();

    let err = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap_err();
    assert_eq!(
        err,
        CompileError::InvalidProp {
            node_id: list,
            name: "ordered".to_string(),
            reason: "expected a boolean, got 1".to_string(),
        }
    );
}

#[test]
fn test_text_with_braces_is_escaped() {
    let mut doc = document();
    let paragraph = doc.add_node(NodeKind::Paragraph, None, None).unwrap();
    doc.update_node(&paragraph, NodePatch::content("Use {curly} & <angle>"))
        .unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();

    println!("Generated code:\n{}", result);

    assert!(result.contains("{\"Use {curly} & <angle>\"}"));
}

#[test]
fn test_image_and_link_attributes() {
    let mut doc = document();
    doc.add_node(NodeKind::Image, None, None).unwrap();
    doc.add_node(NodeKind::Link, None, None).unwrap();
    doc.add_node(NodeKind::Divider, None, None).unwrap();

    let result = compile_to_react(&doc.snapshot(), CompileOptions::default()).unwrap();

    assert!(result.contains("<img src=\"https://via.placeholder.com/300x200\" alt=\"Image description\""));
    assert!(result.contains("<a href=\"#\""));
    assert!(result.contains("<hr style={{"));
    assert!(result.contains(" />"));
}

#[test]
fn test_typescript_and_custom_name() {
    let options = CompileOptions {
        component_name: "LandingPage".to_string(),
        use_typescript: true,
        ..Default::default()
    };
    let result = compile_to_react(&[], options).unwrap();

    assert!(result.contains("const LandingPage: React.FC = () => ("));
    assert!(result.contains("export default LandingPage;"));
}

#[test]
fn test_invalid_component_name() {
    let options = CompileOptions {
        component_name: "my-site".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        compile_to_react(&[], options),
        Err(CompileError::Generic(_))
    ));
}
