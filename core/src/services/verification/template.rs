//! Code message templates
//!
//! Templates use `{{ ... }}` actions. The only data available is the code,
//! addressed as `{{.Code}}`. `{{- ` and ` -}}` trim the whitespace of the
//! adjacent text and `{{/* ... */}}` is a comment. The whole template is
//! parsed before anything is rendered, so a syntax error anywhere wins over
//! an unknown field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TemplateError;

// `.Field` optionally followed by more `.Field` segments
static FIELD_CHAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const CODE_FIELD: &str = "Code";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Vec<String>),
}

/// A parsed code template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTemplate {
    nodes: Vec<Node>,
}

impl CodeTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut nodes = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            let inner_start = start + OPEN.len();
            let after_open = &rest[inner_start..];

            let trim_left = has_left_trim_marker(after_open);
            let mut text = &rest[..start];
            if trim_left {
                text = text.trim_end();
            }
            if !text.is_empty() {
                nodes.push(Node::Text(text.to_string()));
            }

            let close = after_open.find(CLOSE).ok_or_else(|| TemplateError::Syntax {
                position: offset + start,
                message: "unclosed action".to_string(),
            })?;
            let mut inner = &after_open[..close];
            if trim_left {
                inner = &inner[1..];
            }
            let trim_right = has_right_trim_marker(inner);
            if trim_right {
                inner = &inner[..inner.len() - 1];
            }

            if let Some(node) = parse_action(inner.trim(), offset + start)? {
                nodes.push(node);
            }

            let consumed = inner_start + close + CLOSE.len();
            let mut after = &rest[consumed..];
            if trim_right {
                after = after.trim_start();
            }
            offset += rest.len() - after.len();
            rest = after;
        }

        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_string()));
        }

        Ok(Self { nodes })
    }

    pub fn render(&self, code: &str) -> Result<String, TemplateError> {
        let mut output = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Field(path) => output.push_str(resolve_field(path, code)?),
            }
        }
        Ok(output)
    }
}

/// Parse `template` and render it with `code`
pub fn render_template(template: &str, code: &str) -> Result<String, TemplateError> {
    CodeTemplate::parse(template)?.render(code)
}

fn has_left_trim_marker(after_open: &str) -> bool {
    let mut chars = after_open.chars();
    chars.next() == Some('-') && chars.next().map_or(false, char::is_whitespace)
}

fn has_right_trim_marker(inner: &str) -> bool {
    let mut chars = inner.chars().rev();
    chars.next() == Some('-') && chars.next().map_or(false, char::is_whitespace)
}

fn parse_action(action: &str, position: usize) -> Result<Option<Node>, TemplateError> {
    if action.starts_with("/*") && action.ends_with("*/") && action.len() >= 4 {
        return Ok(None);
    }
    if action.is_empty() {
        return Err(TemplateError::Syntax {
            position,
            message: "missing value for command".to_string(),
        });
    }
    if !FIELD_CHAIN_REGEX.is_match(action) {
        return Err(TemplateError::Syntax {
            position,
            message: format!("unsupported action {:?}", action),
        });
    }

    let path = action[1..].split('.').map(str::to_string).collect();
    Ok(Some(Node::Field(path)))
}

fn resolve_field<'a>(path: &[String], code: &'a str) -> Result<&'a str, TemplateError> {
    match path {
        [field] if field == CODE_FIELD => Ok(code),
        [field, nested, ..] if field == CODE_FIELD => Err(TemplateError::Execution {
            message: format!("can't evaluate field {} in type string", nested),
        }),
        [field, ..] => Err(TemplateError::Execution {
            message: format!("can't evaluate field {} in verification data", field),
        }),
        [] => Err(TemplateError::Execution {
            message: "empty field reference".to_string(),
        }),
    }
}
