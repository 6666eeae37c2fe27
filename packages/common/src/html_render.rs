//! Serialize [`VNode`] trees to HTML markup

use crate::{escape_html, VNode};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl HtmlOptions {
    /// Single-line output, suitable for `innerHTML`
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
    }

    fn add_newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a node (and its subtree) to HTML
pub fn to_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx);
    ctx.get_output()
}

fn compile_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
        } => {
            ctx.add_indent();
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                ctx.add_newline();
                return;
            }

            ctx.add(">");

            // Text-only content stays on the opening line so textarea and
            // span values are not padded with whitespace.
            let block = has_element_children(children);
            if block {
                ctx.add_newline();
                ctx.indent();
                for child in children {
                    compile_node(child, ctx);
                }
                ctx.dedent();
                ctx.add_indent();
            } else {
                for child in children {
                    if let VNode::Text { content } = child {
                        ctx.add(&escape_html(content));
                    }
                }
            }

            ctx.add(&format!("</{}>", tag));
            ctx.add_newline();
        }

        VNode::Text { content } => {
            ctx.add_indent();
            ctx.add(&escape_html(content));
            ctx.add_newline();
        }
    }
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "area" | "base" | "col" | "embed"
            | "param" | "source" | "track" | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
