use crate::context::{CompileOptions, CompilerContext};
use pagecraft_model::{NodeKind, NodeSnapshot, StyleMap};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid prop `{name}` on node {node_id}: {reason}")]
    InvalidProp {
        node_id: String,
        name: String,
        reason: String,
    },

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Compile a document snapshot to a React function component module
pub fn compile_to_react(
    nodes: &[NodeSnapshot],
    options: CompileOptions,
) -> Result<String, CompileError> {
    validate_component_name(&options.component_name)?;

    let ctx = CompilerContext::new(options);
    let name = ctx.options.component_name.clone();

    ctx.add_line("import React from \"react\";");
    ctx.add("\n");

    if ctx.options.use_typescript {
        ctx.add_line(&format!("const {}: React.FC = () => (", name));
    } else {
        ctx.add_line(&format!("const {} = () => (", name));
    }
    ctx.indent();

    ctx.add_line(&format!(
        "<div className={}>",
        jsx_attribute_value(&ctx.options.container_class)
    ));
    ctx.indent();
    for node in nodes {
        compile_node(node, &ctx)?;
    }
    ctx.dedent();
    ctx.add_line("</div>");

    ctx.dedent();
    ctx.add_line(");");
    ctx.add("\n");
    ctx.add_line(&format!("export default {};", name));

    debug!(component = %name, roots = nodes.len(), "Compiled document to React");
    Ok(ctx.get_output())
}

fn validate_component_name(name: &str) -> Result<(), CompileError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if valid {
        Ok(())
    } else {
        Err(CompileError::Generic(format!(
            "invalid component name `{}`: expected a capitalized identifier",
            name
        )))
    }
}

fn compile_node(node: &NodeSnapshot, ctx: &CompilerContext) -> Result<(), CompileError> {
    match node.kind {
        NodeKind::Heading => compile_text_element("h2", "", node, ctx),
        NodeKind::Paragraph => compile_text_element("p", "", node, ctx),
        NodeKind::Button => compile_text_element("button", "", node, ctx),
        NodeKind::Link => {
            let href = string_prop(node, "url")?.unwrap_or("#");
            let attrs = format!(" href={}", jsx_attribute_value(href));
            compile_text_element("a", &attrs, node, ctx)
        }
        NodeKind::Image => {
            let alt = string_prop(node, "alt")?.unwrap_or("Image");
            ctx.add_line(&format!(
                "<img src={} alt={}{} />",
                jsx_attribute_value(&node.content),
                jsx_attribute_value(alt),
                style_attribute(&node.styles)
            ));
            compile_children(node, ctx)
        }
        NodeKind::Divider => {
            ctx.add_line(&format!("<hr{} />", style_attribute(&node.styles)));
            compile_children(node, ctx)
        }
        NodeKind::List => compile_list(node, ctx),
        NodeKind::Columns => compile_columns(node, ctx),
    }
}

fn compile_text_element(
    tag: &str,
    attrs: &str,
    node: &NodeSnapshot,
    ctx: &CompilerContext,
) -> Result<(), CompileError> {
    let open = format!("<{}{}{}>", tag, attrs, style_attribute(&node.styles));
    let text = jsx_text(&node.content);

    if node.children().is_empty() {
        ctx.add_line(&format!("{}{}</{}>", open, text, tag));
        return Ok(());
    }

    ctx.add_line(&open);
    ctx.indent();
    if !text.is_empty() {
        ctx.add_line(&text);
    }
    compile_children(node, ctx)?;
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
    Ok(())
}

fn compile_children(node: &NodeSnapshot, ctx: &CompilerContext) -> Result<(), CompileError> {
    for child in node.children() {
        compile_node(child, ctx)?;
    }
    Ok(())
}

fn compile_list(node: &NodeSnapshot, ctx: &CompilerContext) -> Result<(), CompileError> {
    let tag = if is_ordered(node)? { "ol" } else { "ul" };

    ctx.add_line(&format!("<{}{}>", tag, style_attribute(&node.styles)));
    ctx.indent();

    for item in node.content.lines() {
        ctx.add_line(&format!("<li>{}</li>", jsx_text(item)));
    }
    for child in node.children() {
        ctx.add_line("<li>");
        ctx.indent();
        compile_node(child, ctx)?;
        ctx.dedent();
        ctx.add_line("</li>");
    }

    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
    Ok(())
}

fn compile_columns(node: &NodeSnapshot, ctx: &CompilerContext) -> Result<(), CompileError> {
    let mut styles = node.styles.clone();
    styles
        .entry("display".to_string())
        .or_insert_with(|| "flex".to_string());

    ctx.add_line(&format!("<div{}>", style_attribute(&styles)));
    ctx.indent();

    for child in node.children() {
        ctx.add_line("<div style={{ flex: 1 }}>");
        ctx.indent();
        compile_node(child, ctx)?;
        ctx.dedent();
        ctx.add_line("</div>");
    }

    ctx.dedent();
    ctx.add_line("</div>");
    Ok(())
}

fn is_ordered(node: &NodeSnapshot) -> Result<bool, CompileError> {
    match node.prop("ordered") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(ordered)) => Ok(*ordered),
        Some(other) => Err(CompileError::InvalidProp {
            node_id: node.id.clone(),
            name: "ordered".to_string(),
            reason: format!("expected a boolean, got {}", other),
        }),
    }
}

fn string_prop<'a>(node: &'a NodeSnapshot, name: &str) -> Result<Option<&'a str>, CompileError> {
    match node.prop(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(CompileError::InvalidProp {
            node_id: node.id.clone(),
            name: name.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

/// ` style={{ fontSize: "2rem" }}`, or nothing for empty styles
fn style_attribute(styles: &StyleMap) -> String {
    if styles.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = styles
        .iter()
        .map(|(key, value)| {
            let key = style_key(key);
            let key = if is_identifier(&key) {
                key
            } else {
                quote(&key)
            };
            format!("{}: {}", key, quote(value))
        })
        .collect();

    format!(" style={{{{ {} }}}}", entries.join(", "))
}

/// Convert a CSS property name to the camelCase key React expects.
/// Keys that are already camelCase pass through.
///
/// ```
/// use pagecraft_compiler_react::style_key;
///
/// assert_eq!(style_key("background-color"), "backgroundColor");
/// assert_eq!(style_key("fontSize"), "fontSize");
/// assert_eq!(style_key("-webkit-transition"), "WebkitTransition");
/// ```
pub fn style_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}

/// JavaScript string literal
fn quote(value: &str) -> String {
    Value::from(value).to_string()
}

/// Attribute value: a plain string when JSX can hold it verbatim,
/// otherwise a string expression
fn jsx_attribute_value(value: &str) -> String {
    if value.chars().any(|ch| matches!(ch, '"' | '\\' | '&' | '{' | '}' | '\n')) {
        format!("{{{}}}", quote(value))
    } else {
        format!("\"{}\"", value)
    }
}

/// Text child: verbatim when it is plain, otherwise a string expression
fn jsx_text(text: &str) -> String {
    let needs_expression = text != text.trim()
        || text
            .chars()
            .any(|ch| matches!(ch, '{' | '}' | '<' | '>' | '&' | '"' | '\'' | '\n'));

    if needs_expression {
        format!("{{{}}}", quote(text))
    } else {
        text.to_string()
    }
}
