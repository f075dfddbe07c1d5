//! Snippet templates.
//!
//! Snippets use TextMate-style placeholders:
//!
//! - `$name` and `${name}` insert a bound parameter
//! - `${name:fallback}` inserts `fallback` when `name` is not bound
//! - `$1`, `${1}` and `${1:placeholder}` are tabstops, rendered as their
//!   placeholder text
//! - `\$`, `\}` and `\\` are literal characters

use crate::binder::BoundParams;
use crate::error::{EvalError, EvalResult};

const ENTITY: &str = "snippet";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Variable {
        name: String,
        fallback: Option<String>,
    },
    Tabstop {
        placeholder: String,
    },
}

/// A parsed snippet, ready to evaluate against bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetTemplate {
    segments: Vec<Segment>,
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(line: usize, column: usize, message: impl Into<String>) -> EvalError {
        EvalError::Syntax {
            entity: ENTITY.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl SnippetTemplate {
    /// Parse snippet source text.
    pub fn parse(source: &str) -> EvalResult<Self> {
        let mut cursor = Cursor::new(source);
        let mut segments = Vec::new();
        let mut text = String::new();

        while let Some(c) = cursor.bump() {
            match c {
                '\\' => match cursor.peek() {
                    Some(next @ ('$' | '}' | '\\')) => {
                        cursor.bump();
                        text.push(next);
                    }
                    _ => text.push('\\'),
                },
                '$' => {
                    let (line, column) = (cursor.line, cursor.column - 1);
                    let segment = match cursor.peek() {
                        Some('{') => {
                            cursor.bump();
                            Some(Self::parse_braced(&mut cursor, line, column)?)
                        }
                        Some(d) if d.is_ascii_digit() => {
                            while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                                cursor.bump();
                            }
                            Some(Segment::Tabstop {
                                placeholder: String::new(),
                            })
                        }
                        Some(s) if is_name_start(s) => {
                            let mut name = String::new();
                            while let Some(n) = cursor.peek().filter(|c| is_name_char(*c)) {
                                cursor.bump();
                                name.push(n);
                            }
                            Some(Segment::Variable {
                                name,
                                fallback: None,
                            })
                        }
                        _ => None,
                    };

                    match segment {
                        Some(segment) => {
                            if !text.is_empty() {
                                segments.push(Segment::Text(std::mem::take(&mut text)));
                            }
                            segments.push(segment);
                        }
                        None => text.push('$'),
                    }
                }
                other => text.push(other),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Parse the inside of `${...}`; the opening brace is already consumed.
    fn parse_braced(cursor: &mut Cursor<'_>, line: usize, column: usize) -> EvalResult<Segment> {
        let mut name = String::new();
        let mut fallback: Option<String> = None;

        loop {
            let Some(c) = cursor.bump() else {
                return Err(Cursor::error(line, column, "unterminated '${' placeholder"));
            };
            match c {
                '}' => break,
                ':' if fallback.is_none() => fallback = Some(String::new()),
                _ => match fallback.as_mut() {
                    Some(buf) if c == '\\' => match cursor.peek() {
                        Some(next @ ('$' | '}' | '\\')) => {
                            cursor.bump();
                            buf.push(next);
                        }
                        _ => buf.push('\\'),
                    },
                    Some(buf) => buf.push(c),
                    None => name.push(c),
                },
            }
        }

        if name.is_empty() {
            return Err(Cursor::error(line, column, "placeholder has no name"));
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Segment::Tabstop {
                placeholder: fallback.unwrap_or_default(),
            });
        }
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(is_name_start) && chars.all(is_name_char);
        if !valid {
            return Err(Cursor::error(
                line,
                column,
                format!("invalid placeholder name '{}'", name),
            ));
        }
        Ok(Segment::Variable { name, fallback })
    }

    /// Names of every variable the snippet references, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Render the snippet with `params`.
    pub fn evaluate(&self, params: &BoundParams) -> EvalResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Tabstop { placeholder } => out.push_str(placeholder),
                Segment::Variable { name, fallback } => {
                    match (params.get(name), fallback) {
                        (Some(value), _) => out.push_str(value),
                        (None, Some(fallback)) => out.push_str(fallback),
                        (None, None) => return Err(EvalError::UnboundVariable(name.clone())),
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use protokit_catalog::{ParamSchema, ParamType, Prototype, PrototypeTemplate};
    use std::collections::HashMap;

    fn params(pairs: &[(&str, &str)]) -> BoundParams {
        let mut proto = Prototype::new(
            "io.x.test",
            PrototypeTemplate {
                yaml_body: Some(vec![]),
                ..Default::default()
            },
        );
        for (name, _) in pairs {
            proto = proto.with_param(ParamSchema::required(*name, ParamType::NumberOrString, ""));
        }
        let supplied: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        bind(&proto, &supplied).unwrap()
    }

    #[test]
    fn test_variables_are_substituted() {
        let snippet = SnippetTemplate::parse("name: ${name}\nport: $port").unwrap();
        let out = snippet
            .evaluate(&params(&[("name", "nginx"), ("port", "80")]))
            .unwrap();
        assert_eq!(out, "name: \"nginx\"\nport: 80");
    }

    #[test]
    fn test_fallback_and_tabstops() {
        let snippet = SnippetTemplate::parse("${tier:backend} $1 ${2:two} ${0}").unwrap();
        assert_eq!(snippet.evaluate(&BoundParams::default()).unwrap(), "backend  two ");
    }

    #[test]
    fn test_escapes() {
        let snippet = SnippetTemplate::parse(r"cost: \$5 \} \\ \n").unwrap();
        assert_eq!(
            snippet.evaluate(&BoundParams::default()).unwrap(),
            r"cost: $5 } \ \n"
        );
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let snippet = SnippetTemplate::parse("price $ and $-").unwrap();
        assert_eq!(snippet.evaluate(&BoundParams::default()).unwrap(), "price $ and $-");
    }

    #[test]
    fn test_unbound_variable() {
        let snippet = SnippetTemplate::parse("${missing}").unwrap();
        assert_eq!(
            snippet.evaluate(&BoundParams::default()),
            Err(EvalError::UnboundVariable("missing".to_string()))
        );
    }

    #[test]
    fn test_unterminated_placeholder_position() {
        match SnippetTemplate::parse("a: 1\nb: ${name") {
            Err(EvalError::Syntax { line, column, .. }) => {
                assert_eq!((line, column), (2, 4));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_names() {
        assert!(SnippetTemplate::parse("${}").is_err());
        assert!(SnippetTemplate::parse("${bad-name}").is_err());
    }

    #[test]
    fn test_variables_listed_once() {
        let snippet = SnippetTemplate::parse("$a ${b} ${a:x} $1").unwrap();
        assert_eq!(snippet.variables(), vec!["a", "b"]);
    }
}
