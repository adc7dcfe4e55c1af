//! Citation templates: a handlebars-compatible subset.
//!
//! Supported: `{{path}}` (HTML-escaped), `{{{path}}}` and `{{& path}}` (raw),
//! `{{#each}}` and `{{#if}}` blocks with `{{else}}`, comments, `~` whitespace
//! control, and standalone-line stripping for block tags. Paths may use
//! `this`, `../` and `@index`/`@first`/`@last`/`@key`. Anything else fails
//! to compile.

mod lexer;
mod parser;
mod render;
mod value;

use thiserror::Error;

pub use value::Value;

use parser::Node;
use render::Renderer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unclosed tag on line {line}")]
    UnclosedTag { line: usize },

    #[error("Empty expression on line {line}")]
    EmptyExpression { line: usize },

    #[error("Unknown helper: {0}")]
    UnknownHelper(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Helper '{helper}' expects exactly one argument")]
    InvalidArguments { helper: String },

    #[error("'{open}' doesn't match '{close}'")]
    MismatchedBlock { open: String, close: String },

    #[error("Unclosed block: {0}")]
    UnclosedBlock(String),

    #[error("Unexpected closing tag: {0}")]
    UnexpectedClose(String),

    #[error("Unexpected else")]
    UnexpectedElse,

    #[error("Unsupported syntax: {0}")]
    Unsupported(String),
}

/// A compiled template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let tokens = lexer::tokenize(source)?;
        let nodes = parser::parse(tokens)?;
        Ok(Self { nodes })
    }

    /// Renders against `context`. Missing values render as empty text.
    pub fn render(&self, context: &Value) -> String {
        let mut renderer = Renderer::new(context);
        renderer.render_nodes(&self.nodes);
        renderer.finish()
    }
}

/// Compiles and renders in one step
pub fn render(source: &str, context: &Value) -> Result<String, TemplateError> {
    Ok(Template::compile(source)?.render(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::DEFAULT_TEMPLATE;

    fn charge(value: &str, label: &str) -> Value {
        Value::object().with("value", value).with("label", label)
    }

    fn citation_context(points: Value) -> Value {
        Value::object()
            .with("rank", "Undersheriff")
            .with("officerName", "Matt Rhodes")
            .with("department", "The Bay")
            .with("callsign", "320")
            .with("fullName", "Bryan Barker")
            .with(
                "charges",
                Value::List(vec![
                    charge("A", "Petty Theft"),
                    charge("F", "Jaywalking"),
                ]),
            )
            .with("fine", "400.00")
            .with("points", points)
            .with("dateTime", "Thursday, January 15, 2026 at 12:00:00 PM EST")
    }

    #[test]
    fn test_default_template_renders_one_bullet_per_charge() {
        let output = render(DEFAULT_TEMPLATE, &citation_context(Value::from(2u32))).unwrap();
        let expected = "Undersheriff Matt Rhodes of the The Bay has hereby cited Bryan Barker with the following charges:
    \u{2022} Petty Theft
    \u{2022} Jaywalking

This citation amounts to a $400.00 fine and 2 points on their driver's license.

Please note that signing this citation is not an admission of guilt, and that you have 60 days to contest these charges.

320 Undersheriff Matt Rhodes
Thursday, January 15, 2026 at 12:00:00 PM EST";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_points_clause_is_skipped_when_unset_or_zero() {
        for points in [Value::Null, Value::from(0u32)] {
            let output = render(DEFAULT_TEMPLATE, &citation_context(points)).unwrap();
            assert!(output.contains("amounts to a $400.00 fine.\n"));
            assert!(!output.contains("driver's license"));
        }
    }

    #[test]
    fn test_expressions_are_escaped_unless_raw() {
        let context = Value::object().with("name", "<Tom & \"Jerry\">");
        assert_eq!(
            render("{{name}}", &context).unwrap(),
            "&lt;Tom &amp; &quot;Jerry&quot;&gt;"
        );
        assert_eq!(render("{{{name}}}", &context).unwrap(), "<Tom & \"Jerry\">");
        assert_eq!(render("{{& name}}", &context).unwrap(), "<Tom & \"Jerry\">");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let context = Value::object();
        assert_eq!(render("[{{nope}}] [{{a.b.c}}]", &context).unwrap(), "[] []");
    }

    #[test]
    fn test_each_loop_data_and_parent_access() {
        let context = Value::object().with("sep", "/").with(
            "xs",
            Value::List(vec!["a".into(), "b".into(), "c".into()]),
        );
        let output = render(
            "{{#each xs}}{{@index}}={{this}}{{#unless}}{{/unless}}{{/each}}",
            &context,
        );
        assert_eq!(output, Err(TemplateError::UnknownHelper("unless".into())));

        let output = render(
            "{{#each xs}}{{@index}}={{this}}{{#if @last}}.{{else}}{{../sep}}{{/if}}{{/each}}",
            &context,
        )
        .unwrap();
        assert_eq!(output, "0=a/1=b/2=c.");
    }

    #[test]
    fn test_each_over_empty_list_renders_else() {
        let context = Value::object().with("xs", Value::List(vec![]));
        assert_eq!(
            render("{{#each xs}}x{{else}}none{{/each}}", &context).unwrap(),
            "none"
        );
        assert_eq!(
            render("{{#each missing}}x{{else}}none{{/each}}", &context).unwrap(),
            "none"
        );
    }

    #[test]
    fn test_each_over_object_exposes_key() {
        let context = Value::object().with("o", Value::object().with("a", 1u32).with("b", 2u32));
        assert_eq!(
            render("{{#each o}}{{@key}}:{{this}};{{/each}}", &context).unwrap(),
            "a:1;b:2;"
        );
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(
            Template::compile("{{#each charges}}").unwrap_err(),
            TemplateError::UnclosedBlock("each".into())
        );
        assert_eq!(
            Template::compile("Hello {{name").unwrap_err(),
            TemplateError::UnclosedTag { line: 1 }
        );
    }

    #[test]
    fn test_compiled_template_is_reusable() {
        let template = Template::compile("Hi {{who}}").unwrap();
        assert_eq!(template.render(&Value::object().with("who", "A")), "Hi A");
        assert_eq!(template.render(&Value::object().with("who", "B")), "Hi B");
    }
}
