//! Structural checking of Jsonnet source.
//!
//! This is not a Jsonnet interpreter. It tokenizes just enough of the
//! language (strings, text blocks, comments, brackets) to reject sources
//! with unbalanced delimiters or unterminated literals, then normalizes
//! whitespace.

use crate::error::{EvalError, EvalResult};

/// A Jsonnet document that passed the structural check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonnetSource {
    lines: Vec<String>,
}

struct Scanner<'a> {
    entity: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_at(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> EvalError {
        EvalError::Syntax {
            entity: self.entity.to_string(),
            line,
            column,
            message: message.into(),
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> EvalResult<()> {
        loop {
            if self.starts_with("*/") {
                self.bump();
                self.bump();
                return Ok(());
            }
            if self.bump().is_none() {
                return Err(self.error(line, column, "unterminated block comment"));
            }
        }
    }

    fn skip_string(&mut self, quote: char, verbatim: bool, line: usize, column: usize) -> EvalResult<()> {
        loop {
            match self.bump() {
                None => return Err(self.error(line, column, "unterminated string literal")),
                Some('\\') if !verbatim => {
                    self.bump();
                }
                Some(c) if c == quote => {
                    // Verbatim strings escape the quote by doubling it.
                    if verbatim && self.peek_at(0) == Some(quote) {
                        self.bump();
                    } else {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn skip_text_block(&mut self, line: usize, column: usize) -> EvalResult<()> {
        loop {
            if self.starts_with("|||") {
                for _ in 0..3 {
                    self.bump();
                }
                return Ok(());
            }
            if self.bump().is_none() {
                return Err(self.error(line, column, "unterminated text block"));
            }
        }
    }
}

fn closing_for(open: char) -> char {
    match open {
        '{' => '}',
        '[' => ']',
        _ => ')',
    }
}

impl JsonnetSource {
    /// Check `source` and keep it for formatting.
    pub fn parse(entity: &str, source: &str) -> EvalResult<Self> {
        let mut scanner = Scanner {
            entity,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        };
        let mut stack: Vec<(char, usize, usize)> = Vec::new();

        while let Some(c) = scanner.peek_at(0) {
            let (line, column) = (scanner.line, scanner.column);

            if scanner.starts_with("|||") {
                for _ in 0..3 {
                    scanner.bump();
                }
                scanner.skip_text_block(line, column)?;
                continue;
            }
            if scanner.starts_with("/*") {
                scanner.bump();
                scanner.bump();
                scanner.skip_block_comment(line, column)?;
                continue;
            }
            if scanner.starts_with("//") || c == '#' {
                scanner.skip_line();
                continue;
            }
            if c == '@' && matches!(scanner.peek_at(1), Some('"' | '\'')) {
                scanner.bump();
                let quote = scanner.bump().unwrap_or('"');
                scanner.skip_string(quote, true, line, column)?;
                continue;
            }

            scanner.bump();
            match c {
                '"' | '\'' => scanner.skip_string(c, false, line, column)?,
                '{' | '[' | '(' => stack.push((c, line, column)),
                '}' | ']' | ')' => match stack.pop() {
                    Some((open, _, _)) if closing_for(open) == c => {}
                    Some((open, open_line, open_column)) => {
                        return Err(scanner.error(
                            line,
                            column,
                            format!(
                                "unexpected '{}', expected '{}' to close '{}' at {}:{}",
                                c,
                                closing_for(open),
                                open,
                                open_line,
                                open_column
                            ),
                        ));
                    }
                    None => {
                        return Err(scanner.error(line, column, format!("unexpected '{}'", c)));
                    }
                },
                _ => {}
            }
        }

        if let Some((open, line, column)) = stack.pop() {
            return Err(scanner.error(line, column, format!("unclosed '{}'", open)));
        }

        Ok(Self {
            lines: source.lines().map(|l| l.trim_end().to_string()).collect(),
        })
    }

    /// Source with trailing whitespace and trailing blank lines removed.
    pub fn format(&self) -> String {
        let end = self
            .lines
            .iter()
            .rposition(|l| !l.is_empty())
            .map_or(0, |i| i + 1);
        self.lines[..end].join("\n")
    }
}
