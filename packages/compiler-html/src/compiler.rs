use pagecraft_model::{NodeKind, NodeSnapshot, StyleMap};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
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

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit node styles as inline `style` attributes
    pub inline_styles: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Contents of `<title>`
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            pretty: true,
            indent: "  ".to_string(),
            title: "Generated Website".to_string(),
        }
    }
}

pub(crate) struct Context {
    pub(crate) options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    pub(crate) fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn get_output(self) -> String {
        self.buffer
    }

    /// ` style="..."`, or nothing when there is nothing to emit
    fn style_attribute(&self, styles: &StyleMap) -> String {
        if !self.options.inline_styles || styles.is_empty() {
            return String::new();
        }
        format!(" style=\"{}\"", escape_html(&style_declarations(styles)))
    }
}

/// Compile a document snapshot to a standalone HTML page
pub fn compile_to_html(
    nodes: &[NodeSnapshot],
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&mut ctx, None);

    ctx.add_line("<body>");
    ctx.indent();

    for node in nodes {
        compile_node(node, &mut ctx)?;
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(roots = nodes.len(), "Compiled document to HTML");
    Ok(ctx.get_output())
}

pub(crate) fn compile_head(ctx: &mut Context, stylesheet: Option<&[&str]>) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = escape_html(&ctx.options.title);
    ctx.add_line(&format!("<title>{}</title>", title));

    if let Some(rules) = stylesheet {
        ctx.add_line("<style>");
        ctx.indent();
        for rule in rules {
            ctx.add_line(rule);
        }
        ctx.dedent();
        ctx.add_line("</style>");
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_node(node: &NodeSnapshot, ctx: &mut Context) -> Result<(), CompileError> {
    match node.kind {
        NodeKind::Heading => compile_text_element("h2", "", node, ctx),
        NodeKind::Paragraph => compile_text_element("p", "", node, ctx),
        NodeKind::Button => compile_text_element("button", "", node, ctx),
        NodeKind::Link => {
            let href = string_prop(node, "url")?.unwrap_or("#");
            let attrs = format!(" href=\"{}\"", escape_html(href));
            compile_text_element("a", &attrs, node, ctx)
        }
        NodeKind::Image => {
            let alt = string_prop(node, "alt")?.unwrap_or("Image");
            let style = ctx.style_attribute(&node.styles);
            ctx.add_line(&format!(
                "<img src=\"{}\" alt=\"{}\"{} />",
                escape_html(&node.content),
                escape_html(alt),
                style
            ));
            // Void elements cannot hold children; keep them right after
            compile_children(node, ctx)
        }
        NodeKind::Divider => {
            let style = ctx.style_attribute(&node.styles);
            ctx.add_line(&format!("<hr{} />", style));
            compile_children(node, ctx)
        }
        NodeKind::List => compile_list(node, ctx),
        NodeKind::Columns => compile_columns(node, ctx),
    }
}

/// Element whose content is escaped text, followed by any children
fn compile_text_element(
    tag: &str,
    attrs: &str,
    node: &NodeSnapshot,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    let open = format!("<{}{}{}>", tag, attrs, ctx.style_attribute(&node.styles));
    let text = escape_html(&node.content);

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

fn compile_children(node: &NodeSnapshot, ctx: &mut Context) -> Result<(), CompileError> {
    for child in node.children() {
        compile_node(child, ctx)?;
    }
    Ok(())
}

fn compile_list(node: &NodeSnapshot, ctx: &mut Context) -> Result<(), CompileError> {
    let tag = if is_ordered(node)? { "ol" } else { "ul" };

    ctx.add_line(&format!("<{}{}>", tag, ctx.style_attribute(&node.styles)));
    ctx.indent();

    for item in node.content.lines() {
        ctx.add_line(&format!("<li>{}</li>", escape_html(item)));
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

fn compile_columns(node: &NodeSnapshot, ctx: &mut Context) -> Result<(), CompileError> {
    let mut styles = node.styles.clone();
    styles
        .entry("display".to_string())
        .or_insert_with(|| "flex".to_string());

    ctx.add_line(&format!("<div{}>", ctx.style_attribute(&styles)));
    ctx.indent();

    for child in node.children() {
        ctx.add_line("<div style=\"flex: 1;\">");
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

/// `fontSize: 2rem; padding: 1rem;` in key order
fn style_declarations(styles: &StyleMap) -> String {
    styles
        .iter()
        .map(|(key, value)| format!("{}: {};", css_property_name(key), value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a camelCase style key to its CSS property name.
///
/// ```
/// use pagecraft_compiler_html::css_property_name;
///
/// assert_eq!(css_property_name("backgroundColor"), "background-color");
/// assert_eq!(css_property_name("margin"), "margin");
/// assert_eq!(css_property_name("WebkitTransition"), "-webkit-transition");
/// ```
pub fn css_property_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }

    if name.starts_with("ms-") {
        name.insert(0, '-');
    }
    name
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
