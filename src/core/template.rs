//! Brace templates: types, parsing, and loading for HTML pages.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Node field interpolation: `{node.field}`.
    NodeField { field: String },
    /// Named slot filled by the caller: `{content}`.
    Slot(String),
    /// Conditional block: `{if:predicate}` ... `{end}`, or
    /// `{if:not_predicate}` for the negation.
    If {
        predicate: String,
        negate: bool,
        body: Vec<Segment>,
    },
}

/// A parsed template: a sequence of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// Flat tag stream produced before block structure is resolved.
enum Token {
    Literal(String),
    NodeField(String),
    Slot(String),
    Open { predicate: String, negate: bool },
    End,
}

impl Template {
    /// Parse a template string into a tree of segments.
    ///
    /// Syntax:
    /// - `{node.field}` → `NodeField`
    /// - `{if:pred}` / `{if:not_pred}` ... `{end}` → `If`
    /// - `{name}` → `Slot`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let tokens = Self::tokenize(input)?;
        let mut stack: Vec<(String, bool, Vec<Segment>)> = Vec::new();
        let mut top: Vec<Segment> = Vec::new();

        for token in tokens {
            let segment = match token {
                Token::Literal(text) => Segment::Literal(text),
                Token::NodeField(field) => Segment::NodeField { field },
                Token::Slot(name) => Segment::Slot(name),
                Token::Open { predicate, negate } => {
                    stack.push((predicate, negate, std::mem::take(&mut top)));
                    continue;
                }
                Token::End => {
                    let (predicate, negate, outer) = stack.pop().ok_or_else(|| {
                        TemplateError::Parse("{end} without matching {if:...}".to_string())
                    })?;
                    let body = std::mem::replace(&mut top, outer);
                    Segment::If {
                        predicate,
                        negate,
                        body,
                    }
                }
            };
            top.push(segment);
        }

        if let Some((predicate, _, _)) = stack.last() {
            return Err(TemplateError::Parse(format!(
                "unclosed block {{if:{}}}",
                predicate
            )));
        }

        Ok(Template { segments: top })
    }

    /// Load and parse a template file.
    pub fn load(path: &Path) -> Result<Template, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Names of all slots referenced anywhere in the template.
    pub fn slots(&self) -> Vec<&str> {
        fn collect<'a>(segments: &'a [Segment], out: &mut Vec<&'a str>) {
            for segment in segments {
                match segment {
                    Segment::Slot(name) => out.push(name),
                    Segment::If { body, .. } => collect(body, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.segments, &mut out);
        out
    }

    fn tokenize(input: &str) -> Result<Vec<Token>, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }
                if end == len {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let content: String = chars[start..end].iter().collect();
                tokens.push(Self::parse_tag(content.trim())?);
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            tokens.push(Token::Literal(literal_buf));
        }

        Ok(tokens)
    }

    fn parse_tag(content: &str) -> Result<Token, TemplateError> {
        if content.is_empty() {
            return Err(TemplateError::Parse("empty braces".to_string()));
        }

        if content == "end" {
            return Ok(Token::End);
        }

        if let Some(predicate) = content.strip_prefix("if:") {
            let (predicate, negate) = match predicate.strip_prefix("not_") {
                Some(inner) => (inner, true),
                None => (predicate, false),
            };
            if predicate.is_empty() {
                return Err(TemplateError::Parse(format!(
                    "empty predicate in '{}'",
                    content
                )));
            }
            return Ok(Token::Open {
                predicate: predicate.to_string(),
                negate,
            });
        }

        if let Some(field) = content.strip_prefix("node.") {
            if field.is_empty() {
                return Err(TemplateError::Parse(
                    "empty node field name".to_string(),
                ));
            }
            return Ok(Token::NodeField(field.to_string()));
        }

        if !content
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(TemplateError::Parse(format!(
                "invalid slot name '{}'",
                content
            )));
        }

        Ok(Token::Slot(content.to_string()))
    }
}
