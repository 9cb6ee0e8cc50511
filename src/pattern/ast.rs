//! Tokenizer and AST for a single sub-pattern (protocol, hostname, pathname or
//! search).

use std::collections::HashMap;

use super::error::ParseError;

/// One lexical element of a sub-pattern.
///
/// Parameter and wildcard names are stored as indices into
/// [`Ast::param_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, matched verbatim
    Text(String),
    /// `:name`, one segment of the component
    Param(usize),
    /// `*` or `*name`, the rest of the component
    Wildcard(Option<usize>),
    /// `(`
    GroupOpen,
    /// `)`
    GroupClose,
}

/// Parsed sub-pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ast {
    /// Token sequence in source order
    pub tokens: Vec<Token>,
    /// Parameter and named-wildcard names, unique, in order of first appearance
    pub param_names: Vec<String>,
    /// Index of each `GroupOpen` token mapped to the index of its `GroupClose`
    pub optionals: HashMap<usize, usize>,
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl Ast {
    /// Parse a sub-pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for unbalanced parentheses, a `:` with no
    /// name, or a name used twice.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut ast = Ast::default();
        let mut text = String::new();
        // (token index, byte offset) of every group still open
        let mut open_groups: Vec<(usize, usize)> = Vec::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '(' => {
                    ast.flush_text(&mut text);
                    open_groups.push((ast.tokens.len(), offset));
                    ast.tokens.push(Token::GroupOpen);
                }
                ')' => {
                    ast.flush_text(&mut text);
                    let Some((open, _)) = open_groups.pop() else {
                        return Err(ParseError::UnmatchedClose {
                            source: source.to_string(),
                            offset,
                        });
                    };
                    ast.optionals.insert(open, ast.tokens.len());
                    ast.tokens.push(Token::GroupClose);
                }
                ':' | '*' => {
                    ast.flush_text(&mut text);
                    let mut name = String::new();
                    while let Some(&(_, next)) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }

                    if ch == '*' && name.is_empty() {
                        ast.tokens.push(Token::Wildcard(None));
                        continue;
                    }
                    if name.is_empty() {
                        return Err(ParseError::MissingParamName {
                            source: source.to_string(),
                            offset,
                        });
                    }
                    if ast.param_names.contains(&name) {
                        return Err(ParseError::DuplicateParam {
                            pattern: source.to_string(),
                            name,
                        });
                    }

                    let index = ast.param_names.len();
                    ast.param_names.push(name);
                    ast.tokens.push(if ch == ':' {
                        Token::Param(index)
                    } else {
                        Token::Wildcard(Some(index))
                    });
                }
                _ => text.push(ch),
            }
        }
        ast.flush_text(&mut text);

        if let Some(&(_, offset)) = open_groups.first() {
            return Err(ParseError::UnclosedGroup {
                source: source.to_string(),
                offset,
            });
        }

        Ok(ast)
    }

    fn flush_text(&mut self, text: &mut String) {
        if !text.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(text)));
        }
    }

    /// True when the AST contains no parameters, wildcards or groups.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.tokens.iter().all(|t| matches!(t, Token::Text(_)))
    }
}
