use std::borrow::Cow;

use super::parser::{Node, Path, PathRoot};
use super::value::Value;

/// `each` iteration state visible through `@` paths
#[derive(Debug, Clone)]
struct LoopData {
    index: usize,
    len: usize,
    key: Option<String>,
}

struct Frame<'a> {
    value: &'a Value,
    data: Option<LoopData>,
}

pub(super) struct Renderer<'a> {
    frames: Vec<Frame<'a>>,
    out: String,
}

impl<'a> Renderer<'a> {
    pub fn new(context: &'a Value) -> Self {
        Self {
            frames: vec![Frame {
                value: context,
                data: None,
            }],
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    pub fn render_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    fn render_node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.out.push_str(text),
            Node::Expression { path, escape } => {
                let value = self.resolve(path).to_string();
                if *escape {
                    escape_html_into(&value, &mut self.out);
                } else {
                    self.out.push_str(&value);
                }
            }
            Node::If {
                path,
                body,
                inverse,
            } => {
                if self.resolve(path).is_truthy() {
                    self.render_nodes(body);
                } else {
                    self.render_nodes(inverse);
                }
            }
            Node::Each {
                path,
                body,
                inverse,
            } => self.render_each(path, body, inverse),
        }
    }

    fn render_each(&mut self, path: &Path, body: &[Node], inverse: &[Node]) {
        let Some(collection) = self.resolve_ref(path) else {
            self.render_nodes(inverse);
            return;
        };

        let items: Vec<(Option<String>, &'a Value)> = match collection {
            Value::List(items) => items.iter().map(|item| (None, item)).collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (Some(k.clone()), v)).collect(),
            _ => Vec::new(),
        };

        if items.is_empty() {
            self.render_nodes(inverse);
            return;
        }

        let len = items.len();
        for (index, (key, value)) in items.into_iter().enumerate() {
            self.frames.push(Frame {
                value,
                data: Some(LoopData { index, len, key }),
            });
            self.render_nodes(body);
            self.frames.pop();
        }
    }

    fn frame_at_depth(&self, depth: usize) -> Option<&Frame<'a>> {
        self.frames
            .len()
            .checked_sub(depth + 1)
            .and_then(|i| self.frames.get(i))
    }

    /// Resolves a context path to a reference into the render context
    fn resolve_ref(&self, path: &Path) -> Option<&'a Value> {
        let PathRoot::Context { depth } = &path.root else {
            return None;
        };
        let mut value: &'a Value = self.frame_at_depth(*depth)?.value;
        for segment in &path.segments {
            value = value.get(segment)?;
        }
        Some(value)
    }

    fn resolve(&self, path: &Path) -> Cow<'a, Value> {
        match &path.root {
            PathRoot::Context { .. } => match self.resolve_ref(path) {
                Some(value) => Cow::Borrowed(value),
                None => Cow::Owned(Value::Null),
            },
            PathRoot::Data(name) => Cow::Owned(self.loop_data(name)),
        }
    }

    fn loop_data(&self, name: &str) -> Value {
        let Some(data) = self.frames.iter().rev().find_map(|f| f.data.as_ref()) else {
            return Value::Null;
        };
        match name {
            "index" => Value::Number(data.index as f64),
            "first" => Value::Bool(data.index == 0),
            "last" => Value::Bool(data.index + 1 == data.len),
            "key" => data.key.clone().into(),
            _ => Value::Null,
        }
    }
}

/// Escapes the characters HTML-escaping template engines escape by default
fn escape_html_into(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_html(input: &str) -> String {
        let mut out = String::new();
        escape_html_into(input, &mut out);
        out
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"O'Neil" & `co` = 1</b>"#),
            "&lt;b&gt;&quot;O&#x27;Neil&quot; &amp; &#x60;co&#x60; &#x3D; 1&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
